//! MongoDB implementation of `StoreAdapter`.
//!
//! One `Client` is opened at startup and shared for the process lifetime; the
//! driver's own connection pool is left at its defaults. Each trait method is
//! exactly one driver call.

use async_trait::async_trait;
use futures::TryStreamExt;
use log::{debug, info};
use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, FindOptions, ServerApi, ServerApiVersion, UpdateOptions};
use mongodb::results::UpdateResult;
use mongodb::{Client, Collection};

use crate::errors::AdapterResult;
use crate::models::*;
use crate::{parse_id, StoreAdapter};

/// Connection parameters for `MongoAdapter::connect`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoSettings {
    pub uri: String,
    pub database: String,
}

pub struct MongoAdapter {
    client: Client,
    foods: Collection<Document>,
    bookings: Collection<Document>,
}

fn not_hidden() -> Document {
    doc! { FIELD_FOOD_STATUS: { "$ne": FoodStatus::NotAvailable.as_str() } }
}

impl MongoAdapter {
    /// Builds the client with Stable API v1 (strict, deprecation errors).
    ///
    /// The driver connects lazily; call `ping` to force a round trip.
    pub async fn connect(settings: &MongoSettings) -> AdapterResult<Self> {
        let mut options = ClientOptions::parse(&settings.uri).await?;
        options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );
        let client = Client::with_options(options)?;
        let db = client.database(&settings.database);
        info!("mongodb client ready for database {}", settings.database);

        Ok(Self {
            foods: db.collection(FOODS_COLLECTION),
            bookings: db.collection(BOOKINGS_COLLECTION),
            client,
        })
    }
}

impl From<UpdateResult> for UpdateOutcome {
    fn from(result: UpdateResult) -> Self {
        Self {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_id: result.upserted_id,
        }
    }
}

#[async_trait]
impl StoreAdapter for MongoAdapter {
    async fn featured_foods(&self, limit: usize) -> AdapterResult<Vec<Document>> {
        let options = FindOptions::builder()
            .sort(doc! { FIELD_FOOD_QUANTITY: -1 })
            .limit(limit as i64)
            .build();
        let cursor = self.foods.find(not_hidden(), options).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn list_foods(&self, donor_email: Option<&str>) -> AdapterResult<Vec<Document>> {
        let filter = match donor_email {
            Some(email) => doc! { FIELD_DONATOR_EMAIL: email },
            None => not_hidden(),
        };
        let options = FindOptions::builder().sort(doc! { FIELD_EXPIRED_DATE: 1 }).build();
        let cursor = self.foods.find(filter, options).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_food(&self, id: &str) -> AdapterResult<Option<Document>> {
        let oid = parse_id(id)?;
        Ok(self.foods.find_one(doc! { FIELD_ID: oid }, None).await?)
    }

    async fn insert_food(&self, food: Document) -> AdapterResult<InsertOutcome> {
        let result = self.foods.insert_one(food, None).await?;
        debug!("inserted food {}", result.inserted_id);
        Ok(InsertOutcome {
            inserted_id: result.inserted_id,
        })
    }

    async fn replace_food(&self, id: &str, fields: FoodFields) -> AdapterResult<UpdateOutcome> {
        let oid = parse_id(id)?;
        let options = UpdateOptions::builder().upsert(true).build();
        let result = self
            .foods
            .update_one(doc! { FIELD_ID: oid }, doc! { "$set": fields.to_document() }, options)
            .await?;
        Ok(result.into())
    }

    async fn set_food_status(&self, id: &str, status: FoodStatus) -> AdapterResult<UpdateOutcome> {
        let oid = parse_id(id)?;
        let result = self
            .foods
            .update_one(doc! { FIELD_ID: oid }, doc! { "$set": { FIELD_FOOD_STATUS: status } }, None)
            .await?;
        Ok(result.into())
    }

    async fn delete_food(&self, id: &str) -> AdapterResult<DeleteOutcome> {
        let oid = parse_id(id)?;
        let result = self.foods.delete_one(doc! { FIELD_ID: oid }, None).await?;
        Ok(DeleteOutcome {
            deleted_count: result.deleted_count,
        })
    }

    async fn bookings_for(&self, email: &str) -> AdapterResult<Vec<Document>> {
        let filter = doc! {
            "$or": [
                { FIELD_DONATOR_EMAIL: email },
                { FIELD_REQUESTER_EMAIL: email }
            ]
        };
        let cursor = self.bookings.find(filter, None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_booking(&self, requester_email: &str, food_id: &str) -> AdapterResult<Option<Document>> {
        let filter = doc! {
            "$and": [
                { FIELD_REQUESTER_EMAIL: requester_email },
                { FIELD_FOOD_ID: food_id }
            ]
        };
        Ok(self.bookings.find_one(filter, None).await?)
    }

    async fn insert_booking(&self, booking: Document) -> AdapterResult<InsertOutcome> {
        let result = self.bookings.insert_one(booking, None).await?;
        debug!("inserted booking {}", result.inserted_id);
        Ok(InsertOutcome {
            inserted_id: result.inserted_id,
        })
    }

    async fn set_booking_status(&self, food_id: &str, status: FoodStatus) -> AdapterResult<UpdateOutcome> {
        let result = self
            .bookings
            .update_many(doc! { FIELD_FOOD_ID: food_id }, doc! { "$set": { FIELD_FOOD_STATUS: status } }, None)
            .await?;
        Ok(result.into())
    }

    async fn delete_bookings(&self, food_id: &str) -> AdapterResult<DeleteOutcome> {
        let result = self.bookings.delete_many(doc! { FIELD_FOOD_ID: food_id }, None).await?;
        Ok(DeleteOutcome {
            deleted_count: result.deleted_count,
        })
    }

    async fn ping(&self) -> AdapterResult<()> {
        self.client.database("admin").run_command(doc! { "ping": 1 }, None).await?;
        info!("Pinged your deployment. You successfully connected to MongoDB!");
        Ok(())
    }
}
