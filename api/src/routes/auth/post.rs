use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use validator::Validate;

use common::format_validation_errors;
use db::models::user::Role;
use services::attendance::{UserDetails, UserProfile};
use services::error::AttendanceError;
use services::schedule::AnnotatedSlot;

use crate::response::ApiResponse;
use crate::routes::common::error_response;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(required(message = "Role is required."))]
    pub role: Option<String>,
    #[validate(required(message = "User ID is required."))]
    pub user_id: Option<String>,
    #[validate(required(message = "Password is required."))]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    #[validate(required(message = "Role is required."))]
    pub role: Option<String>,
    #[validate(required(message = "User ID is required."))]
    pub user_id: Option<String>,
}

/// Wire form of a login/refresh result. `user` never includes the credential
/// digest.
#[derive(Debug, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
    pub schedule: Vec<AnnotatedSlot>,
}

impl From<UserDetails> for UserDetailsResponse {
    fn from(details: UserDetails) -> Self {
        Self {
            user: Some(details.user),
            schedule: details.schedule,
        }
    }
}

/// POST /auth/login
///
/// Authenticates a user and returns the profile plus today's annotated
/// schedule.
///
/// ### Request Body
/// ```json
/// { "role": "student", "userId": "101", "password": "12345" }
/// ```
///
/// ### Responses
/// - `200 OK` — profile (digest stripped) and schedule
/// - `400 Bad Request` — missing field, e.g. "Password is required."
/// - `401 Unauthorized` — always the generic "Invalid User ID or Password",
///   whether the user is unknown or the password wrong
/// - `500 Internal Server Error` — "User has no password set."
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> (StatusCode, Json<ApiResponse<UserDetailsResponse>>) {
    if let Err(errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(&errors))),
        );
    }
    let role = req.role.unwrap_or_default();
    let user_id = req.user_id.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    // An unparseable role is just an unknown identity; keep the generic
    // message so nothing about valid identities leaks.
    let Ok(role) = role.parse::<Role>() else {
        return error_response(AttendanceError::InvalidCredentials);
    };

    match state.attendance().login(role, &user_id, &password).await {
        Ok(details) => (
            StatusCode::OK,
            Json(ApiResponse::success(details.into(), "Login successful.")),
        ),
        Err(err) => error_response(err),
    }
}

/// POST /auth/refresh
///
/// Re-resolves a known user's profile and today's schedule without a
/// password check. Clients poll this to pick up sessions opened since login.
///
/// ### Responses
/// - `200 OK` — same payload as login
/// - `404 Not Found` — "User not found."
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> (StatusCode, Json<ApiResponse<UserDetailsResponse>>) {
    if let Err(errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(&errors))),
        );
    }
    let role = req.role.unwrap_or_default();
    let user_id = req.user_id.unwrap_or_default();

    let Ok(role) = role.parse::<Role>() else {
        return error_response(AttendanceError::NotFound("User not found.".into()));
    };

    match state.attendance().refresh(role, &user_id).await {
        Ok(details) => (
            StatusCode::OK,
            Json(ApiResponse::success(details.into(), "User details refreshed.")),
        ),
        Err(err) => error_response(err),
    }
}
