//! Cascading writes triggered by a food item leaving circulation.
//!
//! Each cascade is two independent store calls with no transaction and no
//! compensation. When the second call fails the first stays applied and the
//! error is returned to the caller as-is.

use adapters::{parse_id, DeleteOutcome, FoodStatus, StoreAdapter, UpdateOutcome};
use tracing::{info, warn};

use crate::errors::AppResult;

#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub food: UpdateOutcome,
    pub bookings: UpdateOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Removal {
    pub food: DeleteOutcome,
    pub bookings: DeleteOutcome,
}

/// Marks every booking of the item, then the item itself, `Not_Available`.
pub async fn mark_unavailable(store: &dyn StoreAdapter, id: &str) -> AppResult<StatusChange> {
    parse_id(id)?;

    let bookings = store.set_booking_status(id, FoodStatus::NotAvailable).await?;
    let food = store
        .set_food_status(id, FoodStatus::NotAvailable)
        .await
        .inspect_err(|err| warn!(food_id = id, error = %err, "bookings updated but food status write failed"))?;

    info!(food_id = id, bookings = bookings.modified_count, "food marked unavailable");
    Ok(StatusChange { food, bookings })
}

/// Deletes the item, then every booking referencing it.
pub async fn delete_with_bookings(store: &dyn StoreAdapter, id: &str) -> AppResult<Removal> {
    parse_id(id)?;

    let food = store.delete_food(id).await?;
    let bookings = store
        .delete_bookings(id)
        .await
        .inspect_err(|err| warn!(food_id = id, error = %err, "food deleted but its bookings were not"))?;

    info!(food_id = id, bookings = bookings.deleted_count, "food deleted");
    Ok(Removal { food, bookings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    use adapters::{AdapterError, AdapterResult, FoodFields, InsertOutcome, MemoryAdapter};
    use async_trait::async_trait;
    use mongodb::bson::{doc, Document};

    use crate::errors::AppError;

    /// Memory store whose food-status update and booking delete fail.
    #[derive(Default)]
    struct SecondWriteFails {
        inner: MemoryAdapter,
    }

    fn outage() -> AdapterError {
        mongodb::error::Error::from(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset")).into()
    }

    #[async_trait]
    impl StoreAdapter for SecondWriteFails {
        async fn featured_foods(&self, limit: usize) -> AdapterResult<Vec<Document>> {
            self.inner.featured_foods(limit).await
        }

        async fn list_foods(&self, donor_email: Option<&str>) -> AdapterResult<Vec<Document>> {
            self.inner.list_foods(donor_email).await
        }

        async fn find_food(&self, id: &str) -> AdapterResult<Option<Document>> {
            self.inner.find_food(id).await
        }

        async fn insert_food(&self, food: Document) -> AdapterResult<InsertOutcome> {
            self.inner.insert_food(food).await
        }

        async fn replace_food(&self, id: &str, fields: FoodFields) -> AdapterResult<UpdateOutcome> {
            self.inner.replace_food(id, fields).await
        }

        async fn set_food_status(&self, _id: &str, _status: FoodStatus) -> AdapterResult<UpdateOutcome> {
            Err(outage())
        }

        async fn delete_food(&self, id: &str) -> AdapterResult<DeleteOutcome> {
            self.inner.delete_food(id).await
        }

        async fn bookings_for(&self, email: &str) -> AdapterResult<Vec<Document>> {
            self.inner.bookings_for(email).await
        }

        async fn find_booking(&self, requester_email: &str, food_id: &str) -> AdapterResult<Option<Document>> {
            self.inner.find_booking(requester_email, food_id).await
        }

        async fn insert_booking(&self, booking: Document) -> AdapterResult<InsertOutcome> {
            self.inner.insert_booking(booking).await
        }

        async fn set_booking_status(&self, food_id: &str, status: FoodStatus) -> AdapterResult<UpdateOutcome> {
            self.inner.set_booking_status(food_id, status).await
        }

        async fn delete_bookings(&self, _food_id: &str) -> AdapterResult<DeleteOutcome> {
            Err(outage())
        }

        async fn ping(&self) -> AdapterResult<()> {
            self.inner.ping().await
        }
    }

    async fn food_with_booking(store: &dyn StoreAdapter) -> String {
        let id = store
            .insert_food(doc! { "Food_Name": "rice", "Food_Status": "Available" })
            .await
            .unwrap()
            .inserted_id
            .as_object_id()
            .unwrap()
            .to_hex();
        store
            .insert_booking(doc! { "food_id": id.as_str(), "Requester_Email": "r@x.com", "Food_Status": "Available" })
            .await
            .unwrap();
        id
    }

    #[tokio::test]
    async fn status_cascade_reaches_every_booking() {
        let store = MemoryAdapter::new();
        let id = store
            .insert_food(doc! { "Food_Name": "rice", "Food_Status": "Available" })
            .await
            .unwrap()
            .inserted_id
            .as_object_id()
            .unwrap()
            .to_hex();
        store.insert_booking(doc! { "food_id": id.as_str(), "Food_Status": "Available" }).await.unwrap();
        store.insert_booking(doc! { "food_id": id.as_str() }).await.unwrap();

        let change = mark_unavailable(&store, &id).await.unwrap();
        assert_eq!(change.food.modified_count, 1);
        assert_eq!(change.bookings.modified_count, 2);
        assert!(FoodStatus::hides(&store.find_food(&id).await.unwrap().unwrap()));
    }

    #[tokio::test]
    async fn failed_food_status_write_leaves_bookings_updated() {
        let store = SecondWriteFails::default();
        let id = food_with_booking(&store).await;

        let err = mark_unavailable(&store, &id).await.unwrap_err();
        assert!(matches!(err, AppError::Store(_)));
        assert!(err.is_server_error());

        let booking = store.find_booking("r@x.com", &id).await.unwrap().unwrap();
        assert_eq!(booking.get_str("Food_Status").unwrap(), "Not_Available");
        let food = store.find_food(&id).await.unwrap().unwrap();
        assert_eq!(food.get_str("Food_Status").unwrap(), "Available");
    }

    #[tokio::test]
    async fn failed_booking_delete_leaves_food_deleted() {
        let store = SecondWriteFails::default();
        let id = food_with_booking(&store).await;

        let err = delete_with_bookings(&store, &id).await.unwrap_err();
        assert!(matches!(err, AppError::Store(_)));

        assert!(store.find_food(&id).await.unwrap().is_none());
        assert_eq!(store.inner.booking_count().await, 1);
    }

    #[tokio::test]
    async fn malformed_ids_write_nothing() {
        let store = MemoryAdapter::new();
        store.insert_booking(doc! { "food_id": "123" }).await.unwrap();

        assert!(matches!(mark_unavailable(&store, "123").await, Err(AppError::InvalidId(_))));
        assert!(matches!(delete_with_bookings(&store, "123").await, Err(AppError::InvalidId(_))));
        assert_eq!(store.booking_count().await, 1);
    }
}
