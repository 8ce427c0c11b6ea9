//! Module for the booking API.
//!
//! Both routes require a session and only act on bookings that belong to the
//! session's email.

pub mod handlers;
pub mod routes;
