//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → liveness probe (public)
//! - `/auth` → login and refresh (public; no tokens are issued — each
//!   request re-authenticates or trusts client-supplied identifiers)
//! - `/classes/{class_code}/attendance` → session start, location
//!   verification, attendance marking, and roster retrieval

use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod classes;
pub mod common;
pub mod health;

/// Builds the complete application router for all HTTP endpoints.
///
/// The returned router is fully stateful: callers only nest it under their
/// base path. Centralizing route registration here keeps `main` to pure
/// startup logic and lets integration tests assemble the identical router
/// around an in-memory store.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health::health_routes())
        .nest("/auth", auth::auth_routes())
        .nest("/classes", classes::classes_routes())
        .with_state(app_state)
}
