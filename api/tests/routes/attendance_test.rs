use axum::http::StatusCode;
use serde_json::json;

use db::models::{attendance_entry, class_session};

use crate::helpers::app::{
    ANCHOR_LAT, ANCHOR_LON, get_json, make_test_app, post_json, seed_fixtures,
};

fn anchor_body() -> serde_json::Value {
    json!({ "coords": { "lat": ANCHOR_LAT, "lon": ANCHOR_LON } })
}

// ---------------------------
// Start session
// ---------------------------

#[tokio::test]
async fn start_session_opens_and_resets() {
    let ctx = make_test_app().await;
    seed_fixtures(&ctx.db).await;

    let (status, json) = post_json(
        &ctx.app,
        "/api/classes/CS501/attendance/start",
        anchor_body(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Session for CS501 started.");

    let session = class_session::Model::find_by_code(&ctx.db, "CS501")
        .await
        .unwrap()
        .unwrap();
    assert!(session.active);
    assert_eq!(session.present_count, 0);
    assert_eq!(session.anchor_lat, Some(ANCHOR_LAT));
    assert_eq!(session.anchor_lng, Some(ANCHOR_LON));
}

#[tokio::test]
async fn start_session_for_unknown_code_is_404() {
    let ctx = make_test_app().await;
    seed_fixtures(&ctx.db).await;

    let (status, json) = post_json(
        &ctx.app,
        "/api/classes/CS999/attendance/start",
        anchor_body(),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn start_session_requires_coords() {
    let ctx = make_test_app().await;
    seed_fixtures(&ctx.db).await;

    let (status, json) = post_json(
        &ctx.app,
        "/api/classes/CS501/attendance/start",
        json!({ "coords": null }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Coordinates are required.");
}

#[tokio::test]
async fn reopening_wipes_previous_attendance() {
    let ctx = make_test_app().await;
    seed_fixtures(&ctx.db).await;

    post_json(&ctx.app, "/api/classes/CS501/attendance/start", anchor_body()).await;
    post_json(
        &ctx.app,
        "/api/classes/CS501/attendance/mark",
        json!({ "studentId": "101" }),
    )
    .await;

    let (status, _) = post_json(
        &ctx.app,
        "/api/classes/CS501/attendance/start",
        anchor_body(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let session = class_session::Model::find_by_code(&ctx.db, "CS501")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.present_count, 0);
    assert!(
        attendance_entry::Model::for_class(&ctx.db, "CS501")
            .await
            .unwrap()
            .is_empty()
    );
}

// ---------------------------
// Verify location
// ---------------------------

#[tokio::test]
async fn verify_before_start_is_session_not_open() {
    let ctx = make_test_app().await;
    seed_fixtures(&ctx.db).await;

    let (status, json) = post_json(
        &ctx.app,
        "/api/classes/CS501/attendance/verify-location",
        anchor_body(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Teacher has not started this session yet.");
}

#[tokio::test]
async fn verify_at_anchor_succeeds() {
    let ctx = make_test_app().await;
    seed_fixtures(&ctx.db).await;
    post_json(&ctx.app, "/api/classes/CS501/attendance/start", anchor_body()).await;

    let (status, json) = post_json(
        &ctx.app,
        "/api/classes/CS501/attendance/verify-location",
        anchor_body(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Location Verified.");
}

#[tokio::test]
async fn verify_outside_radius_reports_distance() {
    let ctx = make_test_app().await;
    seed_fixtures(&ctx.db).await;
    post_json(&ctx.app, "/api/classes/CS501/attendance/start", anchor_body()).await;

    // ~1112 m north of the anchor, against a 50 m radius.
    let (status, json) = post_json(
        &ctx.app,
        "/api/classes/CS501/attendance/verify-location",
        json!({ "coords": { "lat": ANCHOR_LAT + 0.01, "lon": ANCHOR_LON } }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = json["message"].as_str().unwrap();
    assert!(message.starts_with("Location Mismatch. You are "), "{message}");
    assert!(message.ends_with(" meters away from class."), "{message}");
}

// ---------------------------
// Mark attendance
// ---------------------------

#[tokio::test]
async fn mark_twice_is_marked_then_already_marked() {
    let ctx = make_test_app().await;
    seed_fixtures(&ctx.db).await;
    post_json(&ctx.app, "/api/classes/CS501/attendance/start", anchor_body()).await;

    let (status, json) = post_json(
        &ctx.app,
        "/api/classes/CS501/attendance/mark",
        json!({ "studentId": "101" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Attendance Marked!");
    assert_eq!(json["data"]["alreadyMarked"], false);

    let (status, json) = post_json(
        &ctx.app,
        "/api/classes/CS501/attendance/mark",
        json!({ "studentId": "101" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Attendance Already Marked.");
    assert_eq!(json["data"]["alreadyMarked"], true);

    let session = class_session::Model::find_by_code(&ctx.db, "CS501")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.present_count, 1);
}

#[tokio::test]
async fn mark_without_student_id_is_400() {
    let ctx = make_test_app().await;
    seed_fixtures(&ctx.db).await;

    let (status, json) = post_json(
        &ctx.app,
        "/api/classes/CS501/attendance/mark",
        json!({}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Missing class code or user ID.");
}

#[tokio::test]
async fn mark_for_unknown_code_is_404() {
    let ctx = make_test_app().await;
    seed_fixtures(&ctx.db).await;

    let (status, _) = post_json(
        &ctx.app,
        "/api/classes/CS999/attendance/mark",
        json!({ "studentId": "101" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn concurrent_marks_lose_no_updates() {
    let ctx = make_test_app().await;
    seed_fixtures(&ctx.db).await;
    post_json(&ctx.app, "/api/classes/CS501/attendance/start", anchor_body()).await;

    let marks = (0..8).map(|i| {
        let app = ctx.app.clone();
        async move {
            post_json(
                &app,
                "/api/classes/CS501/attendance/mark",
                json!({ "studentId": format!("s{i}") }),
            )
            .await
        }
    });

    for (status, json) in futures::future::join_all(marks).await {
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["alreadyMarked"], false);
    }

    let session = class_session::Model::find_by_code(&ctx.db, "CS501")
        .await
        .unwrap()
        .unwrap();
    let entries = attendance_entry::Model::for_class(&ctx.db, "CS501")
        .await
        .unwrap();
    assert_eq!(session.present_count, 8);
    assert_eq!(entries.len(), 8);
}

// ---------------------------
// Roster
// ---------------------------

#[tokio::test]
async fn roster_resolves_names_in_arrival_order() {
    let ctx = make_test_app().await;
    seed_fixtures(&ctx.db).await;
    post_json(&ctx.app, "/api/classes/CS501/attendance/start", anchor_body()).await;

    post_json(
        &ctx.app,
        "/api/classes/CS501/attendance/mark",
        json!({ "studentId": "102" }),
    )
    .await;
    post_json(
        &ctx.app,
        "/api/classes/CS501/attendance/mark",
        json!({ "studentId": "101" }),
    )
    .await;
    post_json(
        &ctx.app,
        "/api/classes/CS501/attendance/mark",
        json!({ "studentId": "999" }),
    )
    .await;

    let (status, json) = get_json(&ctx.app, "/api/classes/CS501/attendance/roster").await;
    assert_eq!(status, StatusCode::OK);

    let roster = json["data"].as_array().unwrap();
    assert_eq!(roster.len(), 3);
    assert_eq!(roster[0]["userId"], "102");
    assert_eq!(roster[0]["name"], "Rahul Verma");
    assert_eq!(roster[1]["userId"], "101");
    assert_eq!(roster[1]["name"], "Priya Sharma");
    assert_eq!(roster[2]["name"], "Unknown Student");

    // Arrival stamps are zero-padded "HH:MM".
    let time = roster[0]["time"].as_str().unwrap();
    assert_eq!(time.len(), 5);
    assert_eq!(&time[2..3], ":");
}

#[tokio::test]
async fn roster_is_empty_when_nobody_marked() {
    let ctx = make_test_app().await;
    seed_fixtures(&ctx.db).await;

    let (status, json) = get_json(&ctx.app, "/api/classes/CS501/attendance/roster").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}
