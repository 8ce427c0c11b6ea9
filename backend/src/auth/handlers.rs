//! Handler functions for authentication-related API endpoints.
//!
//! `/jwt` signs whatever identity the client posts and hands it back in the
//! session cookie; `/logout` expires that cookie.

use axum::{extract::State, Json};
use axum_extra::extract::CookieJar;
use serde_json::{Map, Value};
use tracing::info;

use super::models::SessionResponse;
use super::service::{cleared_cookie, session_cookie};
use crate::errors::AppResult;
use crate::state::AppState;

pub async fn issue_session(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(identity): Json<Map<String, Value>>,
) -> AppResult<(CookieJar, Json<SessionResponse>)> {
    info!(email = ?identity.get("email"), "issuing session");
    let token = state.sessions.issue(identity)?;
    Ok((jar.add(session_cookie(token)), Json(SessionResponse::ok())))
}

pub async fn clear_session(jar: CookieJar) -> (CookieJar, Json<SessionResponse>) {
    (jar.add(cleared_cookie()), Json(SessionResponse::ok()))
}
