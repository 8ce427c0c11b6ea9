//! Middleware for protecting authenticated routes and handling authorization.
//!
//! `require_session` validates the session cookie before any protected
//! handler runs; `resource_owner_matches` is the one ownership predicate
//! every handler uses.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use tracing::debug;

use super::errors::AuthError;
use super::models::{Session, SESSION_COOKIE};
use crate::errors::AppResult;
use crate::state::AppState;

/// Rejects the request with 401 unless it carries a valid session cookie,
/// otherwise stores the decoded `Session` in the request extensions.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
        .ok_or(AuthError::MissingToken)?;

    let session = state.sessions.verify(token).inspect_err(|err| {
        debug!(error = %err, "rejected session token");
    })?;

    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

/// True only when both the session email and the owner email are present
/// and equal.
pub fn resource_owner_matches(session: &Session, owner_email: Option<&str>) -> bool {
    matches!((session.email(), owner_email), (Some(current), Some(owner)) if current == owner)
}
