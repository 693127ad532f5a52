use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;

use api::{routes::routes, state::AppState};
use common::clock;
use db::models::{class_session, timetable_slot, user};
use db::test_utils::setup_test_db;
use services::attendance::AttendanceService;

pub const TEST_RADIUS_M: f64 = 50.0;
pub const IST_OFFSET_MINUTES: i32 = 330;

/// Delhi. Anchor used throughout the attendance tests.
pub const ANCHOR_LAT: f64 = 28.7041;
pub const ANCHOR_LON: f64 = 77.1025;

pub struct TestApp {
    pub app: Router,
    pub db: DatabaseConnection,
}

/// Assembles the real router around an in-memory store, with a fixed radius
/// and timezone so tests never depend on the environment.
pub async fn make_test_app() -> TestApp {
    let db = setup_test_db().await;
    let attendance = AttendanceService::new(db.clone(), TEST_RADIUS_M, IST_OFFSET_MINUTES);
    let app_state = AppState::new(db.clone(), attendance);
    let app = Router::new().nest("/api", routes(app_state));
    TestApp { app, db }
}

/// Seeds the demo fixtures the tests lean on: two students and a teacher on
/// the `cse-sem5` timetable, one all-day slot for whatever weekday "today"
/// is, and a zero-state session row for its code.
pub async fn seed_fixtures(db: &DatabaseConnection) {
    user::Model::create(
        db,
        user::Role::Student,
        "101",
        "Priya Sharma",
        "12345",
        Some("cse-sem5"),
    )
    .await
    .unwrap();
    user::Model::create(
        db,
        user::Role::Student,
        "102",
        "Rahul Verma",
        "12345",
        Some("cse-sem5"),
    )
    .await
    .unwrap();
    user::Model::create(
        db,
        user::Role::Teacher,
        "201",
        "Anil Mehta",
        "12345",
        Some("cse-sem5"),
    )
    .await
    .unwrap();

    // Spanning the whole day keeps the slot inside its window no matter when
    // the test runs.
    let today = timetable_slot::DayOfWeek::from(clock::current_weekday(IST_OFFSET_MINUTES));
    timetable_slot::Model::create(
        db,
        "cse-sem5",
        today,
        0,
        "CS501",
        "Distributed Systems",
        Some("Block A-101"),
        "00:00",
        "23:59",
    )
    .await
    .unwrap();

    class_session::Model::provision(db, "CS501").await.unwrap();
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}
