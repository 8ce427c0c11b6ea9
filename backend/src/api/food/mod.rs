//! Module for the food listing API.
//!
//! Public browsing of donated items plus the session-protected routes a donor
//! uses to create, replace, retire and delete them.

pub mod handlers;
pub mod routes;
