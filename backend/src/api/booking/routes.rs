//! Defines the HTTP routes for listing and creating bookings.
//!
//! Every route here must sit behind `require_session`.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_booking, list_my_bookings};
use crate::state::AppState;

pub fn booking_router() -> Router<AppState> {
    Router::new()
        .route("/booking-food/:email", get(list_my_bookings))
        .route("/bookings-food", post(create_booking))
}
