//! Central module for organizing the application's main API endpoints.
//!
//! This module acts as a top-level container for the food listing and
//! booking domains, excluding the session routes which are handled by
//! `auth`.

pub mod booking;
pub mod food;
