use axum::{Router, routing::post};

use crate::state::AppState;

mod post;

pub use post::{login, refresh};

/// Builds the `/auth` route group. Both endpoints are public: this system
/// issues no tokens, so login is re-run whenever the client needs proof and
/// refresh trusts the client-supplied identity.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh))
}
