//! Authentication module for cookie-based sessions and access control.
//!
//! This module provides session issuance and logout, token verification
//! middleware for protected routes, and the ownership predicate used by the
//! booking handlers.

pub mod routes;
pub mod handlers;
pub mod models;
pub mod middleware;
pub mod service;
pub mod errors;

// Re-exports for convenience
pub use handlers::*;
pub use models::*;
pub use middleware::*;
pub use routes::*;
pub use service::*;
pub use errors::*;
