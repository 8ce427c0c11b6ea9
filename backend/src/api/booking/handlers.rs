//! Handler functions for the booking API.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde_json::{json, Map, Value};

use crate::auth::{resource_owner_matches, Session};
use crate::database::models::{documents_to_json, payload_to_document, InsertResponse};
use crate::errors::{AppError, AppResult};
use crate::services::booking_ledger::{self, BookingOutcome};
use crate::state::AppState;

/// Bookings where the email is the donor or the requester; the email must
/// be the session's own.
pub async fn list_my_bookings(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(email): Path<String>,
) -> AppResult<Json<Vec<Value>>> {
    if !resource_owner_matches(&session, Some(&email)) {
        return Err(AppError::Forbidden);
    }
    let bookings = state.store.bookings_for(&email).await?;
    Ok(Json(documents_to_json(bookings)))
}

pub async fn create_booking(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(payload): Json<Map<String, Value>>,
) -> AppResult<Response> {
    let booking = payload_to_document(&payload)?;
    let response = match booking_ledger::reserve(state.store.as_ref(), &session, booking).await? {
        BookingOutcome::Created(outcome) => Json(InsertResponse::from(outcome)).into_response(),
        BookingOutcome::AlreadyExists => Json(json!({ "message": "already exist" })).into_response(),
    };
    Ok(response)
}
