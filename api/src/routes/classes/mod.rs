use axum::Router;

use crate::state::AppState;

pub mod attendance;

/// Builds the `/classes` route group. Everything hangs off the class code
/// path parameter.
pub fn classes_routes() -> Router<AppState> {
    Router::new().nest(
        "/{class_code}/attendance",
        attendance::attendance_routes(),
    )
}
