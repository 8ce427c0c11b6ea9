//! Module for core business logic services.
//!
//! This module holds the operations that take more than one store call:
//! the food status and delete cascades, and booking creation with its
//! duplicate check.

pub mod booking_ledger;
pub mod food_lifecycle;
