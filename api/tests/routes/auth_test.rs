use axum::http::StatusCode;
use serde_json::json;

use db::models::user;

use crate::helpers::app::{make_test_app, post_json};

// ---------------------------
// Login
// ---------------------------

#[tokio::test]
async fn login_returns_profile_and_schedule() {
    let ctx = make_test_app().await;
    crate::helpers::app::seed_fixtures(&ctx.db).await;

    let (status, json) = post_json(
        &ctx.app,
        "/api/auth/login",
        json!({ "role": "student", "userId": "101", "password": "12345" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["user"]["userId"], "101");
    assert_eq!(json["data"]["user"]["name"], "Priya Sharma");
    assert_eq!(json["data"]["user"]["role"], "student");
    assert_eq!(json["data"]["user"]["timetableId"], "cse-sem5");

    // The credential digest must never appear anywhere in the payload.
    assert!(json["data"]["user"].get("passwordHash").is_none());
    assert!(json["data"]["user"].get("password_hash").is_none());

    let schedule = json["data"]["schedule"].as_array().unwrap();
    assert_eq!(schedule.len(), 1);
    assert_eq!(schedule[0]["code"], "CS501");
    assert_eq!(schedule[0]["subject"], "Distributed Systems");
    // Inside the window but the teacher has not opened the session.
    assert_eq!(schedule[0]["live"], false);
    assert_eq!(schedule[0]["isMarked"], false);
    assert!(schedule[0].get("presentCount").is_none());
}

#[tokio::test]
async fn teacher_login_sees_live_slot_with_count() {
    let ctx = make_test_app().await;
    crate::helpers::app::seed_fixtures(&ctx.db).await;

    let (status, json) = post_json(
        &ctx.app,
        "/api/auth/login",
        json!({ "role": "teacher", "userId": "201", "password": "12345" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let schedule = json["data"]["schedule"].as_array().unwrap();
    // Teacher liveness is the time window alone.
    assert_eq!(schedule[0]["live"], true);
    assert_eq!(schedule[0]["presentCount"], 0);
    assert!(schedule[0].get("isMarked").is_none());
}

#[tokio::test]
async fn login_without_password_is_400() {
    let ctx = make_test_app().await;
    crate::helpers::app::seed_fixtures(&ctx.db).await;

    let (status, json) = post_json(
        &ctx.app,
        "/api/auth/login",
        json!({ "role": "student", "userId": "101" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Password is required.");
}

#[tokio::test]
async fn unknown_user_and_bad_password_get_the_same_message() {
    let ctx = make_test_app().await;
    crate::helpers::app::seed_fixtures(&ctx.db).await;

    let (unknown_status, unknown_json) = post_json(
        &ctx.app,
        "/api/auth/login",
        json!({ "role": "student", "userId": "999", "password": "12345" }),
    )
    .await;
    let (bad_status, bad_json) = post_json(
        &ctx.app,
        "/api/auth/login",
        json!({ "role": "student", "userId": "101", "password": "wrong" }),
    )
    .await;

    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(bad_status, StatusCode::UNAUTHORIZED);
    // Identity enumeration guard: both failures are indistinguishable.
    assert_eq!(unknown_json["message"], "Invalid User ID or Password");
    assert_eq!(bad_json["message"], unknown_json["message"]);
}

#[tokio::test]
async fn login_with_no_digest_is_500() {
    let ctx = make_test_app().await;
    user::Model::create_without_credential(
        &ctx.db,
        user::Role::Student,
        "103",
        "Legacy Account",
        None,
    )
    .await
    .unwrap();

    let (status, json) = post_json(
        &ctx.app,
        "/api/auth/login",
        json!({ "role": "student", "userId": "103", "password": "12345" }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["message"], "User has no password set.");
}

// ---------------------------
// Refresh
// ---------------------------

#[tokio::test]
async fn refresh_returns_details_without_password() {
    let ctx = make_test_app().await;
    crate::helpers::app::seed_fixtures(&ctx.db).await;

    let (status, json) = post_json(
        &ctx.app,
        "/api/auth/refresh",
        json!({ "role": "student", "userId": "101" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["user"]["name"], "Priya Sharma");
    assert!(json["data"]["schedule"].is_array());
}

#[tokio::test]
async fn refresh_unknown_user_is_404() {
    let ctx = make_test_app().await;
    crate::helpers::app::seed_fixtures(&ctx.db).await;

    let (status, json) = post_json(
        &ctx.app,
        "/api/auth/refresh",
        json!({ "role": "student", "userId": "999" }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "User not found.");
}

#[tokio::test]
async fn refresh_picks_up_newly_opened_session() {
    let ctx = make_test_app().await;
    crate::helpers::app::seed_fixtures(&ctx.db).await;

    post_json(
        &ctx.app,
        "/api/classes/CS501/attendance/start",
        json!({ "coords": { "lat": crate::helpers::app::ANCHOR_LAT, "lon": crate::helpers::app::ANCHOR_LON } }),
    )
    .await;

    let (_, json) = post_json(
        &ctx.app,
        "/api/auth/refresh",
        json!({ "role": "student", "userId": "101" }),
    )
    .await;

    // Session open + inside the window: now live for the student.
    assert_eq!(json["data"]["schedule"][0]["live"], true);
}
