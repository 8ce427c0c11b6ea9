//! Core `adapters` crate for abstracting the document store behind Food Share Hub.
//!
//! This crate defines the `StoreAdapter` trait, which lists every read and
//! write the backend performs against the food and booking collections, and
//! provides the concrete implementations (MongoDB, in-memory).

pub mod errors;
pub mod memory;
pub mod models;
pub mod mongo;
mod ordering;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::Document;

pub use errors::{AdapterError, AdapterResult};
pub use memory::MemoryAdapter;
pub use models::*;
pub use mongo::{MongoAdapter, MongoSettings};

/// Direct CRUD access to the `featured-foods` and `bookings-food` collections.
///
/// Every method maps to a single store call. Callers that need two writes
/// (the status and delete cascades) issue two calls; nothing here groups
/// them.
#[async_trait]
pub trait StoreAdapter: Send + Sync {
    /// Items not marked `Not_Available`, highest `Food_Quantity` first,
    /// at most `limit` of them.
    async fn featured_foods(&self, limit: usize) -> AdapterResult<Vec<Document>>;

    /// Items sorted by `Expired_Date` ascending. With a donor email, only that
    /// donor's items regardless of status; otherwise every item not marked
    /// `Not_Available`.
    async fn list_foods(&self, donor_email: Option<&str>) -> AdapterResult<Vec<Document>>;

    async fn find_food(&self, id: &str) -> AdapterResult<Option<Document>>;

    /// Stores the document as given, generating an `_id` when absent.
    async fn insert_food(&self, food: Document) -> AdapterResult<InsertOutcome>;

    /// Overwrites the six replacement fields, inserting the item when no
    /// document has this id.
    async fn replace_food(&self, id: &str, fields: FoodFields) -> AdapterResult<UpdateOutcome>;

    async fn set_food_status(&self, id: &str, status: FoodStatus) -> AdapterResult<UpdateOutcome>;

    async fn delete_food(&self, id: &str) -> AdapterResult<DeleteOutcome>;

    /// Bookings where the email is either the donor or the requester.
    async fn bookings_for(&self, email: &str) -> AdapterResult<Vec<Document>>;

    async fn find_booking(&self, requester_email: &str, food_id: &str) -> AdapterResult<Option<Document>>;

    async fn insert_booking(&self, booking: Document) -> AdapterResult<InsertOutcome>;

    /// Sets the nested status copy on every booking referencing `food_id`.
    async fn set_booking_status(&self, food_id: &str, status: FoodStatus) -> AdapterResult<UpdateOutcome>;

    async fn delete_bookings(&self, food_id: &str) -> AdapterResult<DeleteOutcome>;

    /// Round trip to the store, used once at startup.
    async fn ping(&self) -> AdapterResult<()>;
}

/// Parses a food identifier the way every adapter stores it.
pub fn parse_id(id: &str) -> AdapterResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| AdapterError::InvalidId(id.to_string()))
}
