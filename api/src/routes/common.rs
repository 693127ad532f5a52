use axum::{Json, http::StatusCode};
use serde::Serialize;
use services::error::AttendanceError;

use crate::response::ApiResponse;

/// Maps each failure variant to its HTTP status. The mapping lives here so
/// every route renders the taxonomy identically.
pub fn error_status(err: &AttendanceError) -> StatusCode {
    match err {
        AttendanceError::Validation(_)
        | AttendanceError::SessionNotOpen
        | AttendanceError::LocationMismatch { .. } => StatusCode::BAD_REQUEST,
        AttendanceError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AttendanceError::NotFound(_) => StatusCode::NOT_FOUND,
        AttendanceError::MissingCredential
        | AttendanceError::Db(_)
        | AttendanceError::Hash(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Renders a failed operation as the standard envelope. Store errors are the
/// only variants worth an error log; the rest are client mistakes.
pub fn error_response<T>(err: AttendanceError) -> (StatusCode, Json<ApiResponse<T>>)
where
    T: Serialize + Default,
{
    if matches!(err, AttendanceError::Db(_) | AttendanceError::Hash(_)) {
        log::error!("{err}");
    }
    (error_status(&err), Json(ApiResponse::error(err.to_string())))
}
