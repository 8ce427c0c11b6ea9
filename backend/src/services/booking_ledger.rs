//! Booking creation: ownership check, duplicate check, insert.
//!
//! The duplicate check and the insert are separate store calls, so two
//! identical requests racing each other can both pass the check.

use adapters::{InsertOutcome, StoreAdapter, FIELD_FOOD_ID, FIELD_REQUESTER_EMAIL};
use mongodb::bson::Document;
use tracing::{debug, info};

use crate::auth::{resource_owner_matches, Session};
use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq)]
pub enum BookingOutcome {
    Created(InsertOutcome),
    /// The requester already holds a booking for this food item.
    AlreadyExists,
}

/// Stores `booking` verbatim unless the requester already booked this food.
///
/// The payload's `Requester_Email` must belong to the session; `food_id`
/// must be a string since it is the duplicate-check key.
pub async fn reserve(store: &dyn StoreAdapter, session: &Session, booking: Document) -> AppResult<BookingOutcome> {
    let requester = booking.get_str(FIELD_REQUESTER_EMAIL).ok();
    if !resource_owner_matches(session, requester) {
        return Err(AppError::Forbidden);
    }
    let requester = requester.unwrap_or_default();
    let food_id = booking
        .get_str(FIELD_FOOD_ID)
        .map_err(|_| AppError::MalformedPayload(format!("{FIELD_FOOD_ID} must be a string")))?;

    if store.find_booking(requester, food_id).await?.is_some() {
        debug!(requester, food_id, "duplicate booking ignored");
        return Ok(BookingOutcome::AlreadyExists);
    }

    info!(requester, food_id, "booking food");
    let outcome = store.insert_booking(booking).await?;
    Ok(BookingOutcome::Created(outcome))
}
