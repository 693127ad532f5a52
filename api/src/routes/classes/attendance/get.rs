use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use services::attendance::RosterEntry;

use crate::response::ApiResponse;
use crate::routes::common::error_response;
use crate::state::AppState;

/// GET /classes/{class_code}/attendance/roster
///
/// The present-student list for a class in arrival order, with display names
/// resolved. An unknown or never-marked class yields an empty list, not an
/// error.
///
/// ### Response
/// ```json
/// {
///   "success": true,
///   "data": [
///     { "userId": "101", "name": "Priya Sharma", "time": "09:05" }
///   ],
///   "message": "Attendance list retrieved."
/// }
/// ```
pub async fn roster(
    State(state): State<AppState>,
    Path(class_code): Path<String>,
) -> (StatusCode, Json<ApiResponse<Vec<RosterEntry>>>) {
    match state.attendance().roster(&class_code).await {
        Ok(entries) => (
            StatusCode::OK,
            Json(ApiResponse::success(entries, "Attendance list retrieved.")),
        ),
        Err(err) => error_response(err),
    }
}
