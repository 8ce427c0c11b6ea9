//! Main entry point for the Food Share Hub backend.
//!
//! Everything past process startup lives in the library crate so the
//! integration tests can build the same router.

use backend::errors::AppError;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    backend::start_server().await
}
