use axum::{Json, Router, response::IntoResponse, routing::get};

use crate::response::ApiResponse;
use crate::state::AppState;

/// Builds the `/health` route group: a single public `GET /health` endpoint
/// for uptime checks and deployment probes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// GET /health
///
/// Returns a simple success response to indicate the API is running.
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::success("OK", "API is up and running"))
}
