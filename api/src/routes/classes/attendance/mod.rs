use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

mod common;
mod get;
mod post;

pub use get::roster;
pub use post::{mark_attendance, start_session, verify_location};

/// Routes under `/classes/{class_code}/attendance`.
///
/// No auth middleware: role and identity are client-asserted throughout, and
/// verify-then-mark sequencing is a client responsibility (the two calls
/// carry no linking proof).
pub fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route("/start", post(start_session))
        .route("/verify-location", post(verify_location))
        .route("/mark", post(mark_attendance))
        .route("/roster", get(roster))
}
