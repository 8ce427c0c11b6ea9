//! Custom error types specific to the `adapters` crate.
//!
//! Covers identifier parsing, driver failures and document encoding, so the
//! backend deals with a single error type whichever store is configured.

use thiserror::Error;

pub type AdapterResult<T> = Result<T, AdapterError>;

#[derive(Error, Debug)]
pub enum AdapterError {
    /// The given string is not a 24-character hex ObjectId.
    #[error("invalid id: {0}")]
    InvalidId(String),

    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] mongodb::bson::ser::Error),
}
