//! Defines the HTTP routes specifically for authentication.
//!
//! Neither route requires a session; they are merged into the main router
//! alongside the public food routes.

use axum::{routing::post, Router};

use super::handlers::{clear_session, issue_session};
use crate::state::AppState;

pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/jwt", post(issue_session))
        .route("/logout", post(clear_session))
}
