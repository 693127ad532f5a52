use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use common::format_validation_errors;
use services::attendance::MarkOutcome;
use validator::Validate;

use super::common::{CoordsRequest, MarkRequest, MarkResponse};
use crate::response::ApiResponse;
use crate::routes::common::error_response;
use crate::state::AppState;

/// POST /classes/{class_code}/attendance/start
///
/// Teacher opens (or re-opens) the session for a class, anchored at the
/// reported location. Attendance is always reset, and every other class's
/// session is deactivated.
///
/// ### Request Body
/// ```json
/// { "coords": { "lat": 28.7041, "lon": 77.1025 } }
/// ```
///
/// ### Responses
/// - `200 OK` — "Session for {class_code} started."
/// - `400 Bad Request` — missing or non-finite coordinates
/// - `404 Not Found` — class code appears in no timetable
pub async fn start_session(
    State(state): State<AppState>,
    Path(class_code): Path<String>,
    Json(req): Json<CoordsRequest>,
) -> (StatusCode, Json<ApiResponse<()>>) {
    if let Err(errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(&errors))),
        );
    }
    let coords = req.coords.unwrap_or_default();

    match state.attendance().start_session(&class_code, coords).await {
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                (),
                format!("Session for {class_code} started."),
            )),
        ),
        Err(err) => error_response(err),
    }
}

/// POST /classes/{class_code}/attendance/verify-location
///
/// Student checks their reported location against the session anchor. A
/// separate call from marking; marking does not re-run this check.
///
/// ### Responses
/// - `200 OK` — "Location Verified."
/// - `400 Bad Request` — "Teacher has not started this session yet.", or
///   "Location Mismatch. You are {n} meters away from class."
pub async fn verify_location(
    State(state): State<AppState>,
    Path(class_code): Path<String>,
    Json(req): Json<CoordsRequest>,
) -> (StatusCode, Json<ApiResponse<()>>) {
    if let Err(errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(&errors))),
        );
    }
    let coords = req.coords.unwrap_or_default();

    match state.attendance().verify_location(&class_code, coords).await {
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse::success((), "Location Verified.")),
        ),
        Err(err) => error_response(err),
    }
}

/// POST /classes/{class_code}/attendance/mark
///
/// Marks a student present. Idempotent: the duplicate case is a `200` with
/// `alreadyMarked: true`, never an error.
///
/// ### Request Body
/// ```json
/// { "studentId": "101" }
/// ```
///
/// ### Responses
/// - `200 OK` — "Attendance Marked!" or "Attendance Already Marked."
/// - `400 Bad Request` — "Missing class code or user ID."
/// - `404 Not Found` — no session record for this class code
pub async fn mark_attendance(
    State(state): State<AppState>,
    Path(class_code): Path<String>,
    Json(req): Json<MarkRequest>,
) -> (StatusCode, Json<ApiResponse<MarkResponse>>) {
    if let Err(errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(&errors))),
        );
    }
    let student_id = req.student_id.unwrap_or_default();

    match state
        .attendance()
        .mark_attendance(&class_code, &student_id)
        .await
    {
        Ok(MarkOutcome::Marked) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                MarkResponse {
                    already_marked: false,
                },
                "Attendance Marked!",
            )),
        ),
        Ok(MarkOutcome::AlreadyMarked) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                MarkResponse {
                    already_marked: true,
                },
                "Attendance Already Marked.",
            )),
        ),
        Err(err) => error_response(err),
    }
}
