//! In-process implementation of `StoreAdapter`.
//!
//! Keeps each collection in insertion order behind its own lock and answers
//! the same queries the MongoDB adapter issues, including the type-bracketed
//! sort order. Used by the test suite and by `STORE=memory` local runs.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document};
use tokio::sync::RwLock;

use crate::errors::AdapterResult;
use crate::models::*;
use crate::ordering::sort_by_field;
use crate::{parse_id, StoreAdapter};

#[derive(Default)]
pub struct MemoryAdapter {
    foods: RwLock<Vec<Document>>,
    bookings: RwLock<Vec<Document>>,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored bookings, for assertions in tests.
    pub async fn booking_count(&self) -> usize {
        self.bookings.read().await.len()
    }

    pub async fn food_count(&self) -> usize {
        self.foods.read().await.len()
    }
}

fn has_id(doc: &Document, oid: &ObjectId) -> bool {
    matches!(doc.get(FIELD_ID), Some(Bson::ObjectId(id)) if id == oid)
}

/// Equality as a MongoDB filter sees it: an array field matches when any
/// element equals `value`.
fn field_is(doc: &Document, key: &str, value: &str) -> bool {
    match doc.get(key) {
        Some(Bson::String(s)) => s == value,
        Some(Bson::Array(items)) => items.iter().any(|item| matches!(item, Bson::String(s) if s == value)),
        _ => false,
    }
}

fn with_id(mut doc: Document) -> (Document, Bson) {
    let id = match doc.get(FIELD_ID) {
        Some(id) => id.clone(),
        None => {
            let id = Bson::ObjectId(ObjectId::new());
            doc.insert(FIELD_ID, id.clone());
            id
        }
    };
    (doc, id)
}

/// Applies a `$set`, reporting whether any value actually changed.
fn apply_set(target: &mut Document, set: &Document) -> bool {
    let mut modified = false;
    for (key, value) in set {
        if target.get(key) != Some(value) {
            target.insert(key.clone(), value.clone());
            modified = true;
        }
    }
    modified
}

#[async_trait]
impl StoreAdapter for MemoryAdapter {
    async fn featured_foods(&self, limit: usize) -> AdapterResult<Vec<Document>> {
        let mut docs: Vec<Document> = self
            .foods
            .read()
            .await
            .iter()
            .filter(|doc| !FoodStatus::hides(doc))
            .cloned()
            .collect();
        sort_by_field(&mut docs, FIELD_FOOD_QUANTITY, true);
        docs.truncate(limit);
        Ok(docs)
    }

    async fn list_foods(&self, donor_email: Option<&str>) -> AdapterResult<Vec<Document>> {
        let mut docs: Vec<Document> = self
            .foods
            .read()
            .await
            .iter()
            .filter(|doc| match donor_email {
                Some(email) => field_is(doc, FIELD_DONATOR_EMAIL, email),
                None => !FoodStatus::hides(doc),
            })
            .cloned()
            .collect();
        sort_by_field(&mut docs, FIELD_EXPIRED_DATE, false);
        Ok(docs)
    }

    async fn find_food(&self, id: &str) -> AdapterResult<Option<Document>> {
        let oid = parse_id(id)?;
        let foods = self.foods.read().await;
        Ok(foods.iter().find(|doc| has_id(doc, &oid)).cloned())
    }

    async fn insert_food(&self, food: Document) -> AdapterResult<InsertOutcome> {
        let (food, inserted_id) = with_id(food);
        self.foods.write().await.push(food);
        Ok(InsertOutcome { inserted_id })
    }

    async fn replace_food(&self, id: &str, fields: FoodFields) -> AdapterResult<UpdateOutcome> {
        let oid = parse_id(id)?;
        let set = fields.to_document();
        let mut foods = self.foods.write().await;
        if let Some(doc) = foods.iter_mut().find(|doc| has_id(doc, &oid)) {
            let modified = apply_set(doc, &set);
            return Ok(UpdateOutcome {
                matched_count: 1,
                modified_count: u64::from(modified),
                upserted_id: None,
            });
        }

        let mut doc = Document::new();
        doc.insert(FIELD_ID, oid);
        apply_set(&mut doc, &set);
        foods.push(doc);
        Ok(UpdateOutcome {
            matched_count: 0,
            modified_count: 0,
            upserted_id: Some(Bson::ObjectId(oid)),
        })
    }

    async fn set_food_status(&self, id: &str, status: FoodStatus) -> AdapterResult<UpdateOutcome> {
        let oid = parse_id(id)?;
        let mut set = Document::new();
        set.insert(FIELD_FOOD_STATUS, status);
        let mut foods = self.foods.write().await;
        let mut outcome = UpdateOutcome::default();
        if let Some(doc) = foods.iter_mut().find(|doc| has_id(doc, &oid)) {
            outcome.matched_count = 1;
            outcome.modified_count = u64::from(apply_set(doc, &set));
        }
        Ok(outcome)
    }

    async fn delete_food(&self, id: &str) -> AdapterResult<DeleteOutcome> {
        let oid = parse_id(id)?;
        let mut foods = self.foods.write().await;
        let deleted_count = match foods.iter().position(|doc| has_id(doc, &oid)) {
            Some(index) => {
                foods.remove(index);
                1
            }
            None => 0,
        };
        Ok(DeleteOutcome { deleted_count })
    }

    async fn bookings_for(&self, email: &str) -> AdapterResult<Vec<Document>> {
        let bookings = self.bookings.read().await;
        Ok(bookings
            .iter()
            .filter(|doc| field_is(doc, FIELD_DONATOR_EMAIL, email) || field_is(doc, FIELD_REQUESTER_EMAIL, email))
            .cloned()
            .collect())
    }

    async fn find_booking(&self, requester_email: &str, food_id: &str) -> AdapterResult<Option<Document>> {
        let bookings = self.bookings.read().await;
        Ok(bookings
            .iter()
            .find(|doc| field_is(doc, FIELD_REQUESTER_EMAIL, requester_email) && field_is(doc, FIELD_FOOD_ID, food_id))
            .cloned())
    }

    async fn insert_booking(&self, booking: Document) -> AdapterResult<InsertOutcome> {
        let (booking, inserted_id) = with_id(booking);
        self.bookings.write().await.push(booking);
        Ok(InsertOutcome { inserted_id })
    }

    async fn set_booking_status(&self, food_id: &str, status: FoodStatus) -> AdapterResult<UpdateOutcome> {
        let mut set = Document::new();
        set.insert(FIELD_FOOD_STATUS, status);
        let mut bookings = self.bookings.write().await;
        let mut outcome = UpdateOutcome::default();
        for doc in bookings.iter_mut().filter(|doc| field_is(doc, FIELD_FOOD_ID, food_id)) {
            outcome.matched_count += 1;
            outcome.modified_count += u64::from(apply_set(doc, &set));
        }
        Ok(outcome)
    }

    async fn delete_bookings(&self, food_id: &str) -> AdapterResult<DeleteOutcome> {
        let mut bookings = self.bookings.write().await;
        let before = bookings.len();
        bookings.retain(|doc| !field_is(doc, FIELD_FOOD_ID, food_id));
        Ok(DeleteOutcome {
            deleted_count: (before - bookings.len()) as u64,
        })
    }

    async fn ping(&self) -> AdapterResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AdapterError;
    use mongodb::bson::doc;

    fn food(name: &str, quantity: i32, expires: &str, status: &str) -> Document {
        doc! {
            "Food_Name": name,
            "Food_Quantity": quantity,
            "Expired_Date": expires,
            "Donator_Email": "donor@x.com",
            "Food_Status": status,
        }
    }

    fn names(docs: &[Document]) -> Vec<&str> {
        docs.iter().map(|d| d.get_str("Food_Name").unwrap()).collect()
    }

    async fn seeded() -> MemoryAdapter {
        let store = MemoryAdapter::new();
        for (i, status) in ["Available", "Not_Available", "Available"].iter().cycle().take(9).enumerate() {
            let doc = food(&format!("f{i}"), i as i32, &format!("2024-01-{:02}", 20 - i), status);
            store.insert_food(doc).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn featured_is_limited_filtered_and_ranked() {
        let store = seeded().await;
        let featured = store.featured_foods(FEATURED_LIMIT).await.unwrap();
        assert_eq!(names(&featured), ["f8", "f6", "f5", "f3", "f2", "f0"]);
        assert!(featured.iter().all(|d| !FoodStatus::hides(d)));
    }

    #[tokio::test]
    async fn list_by_donor_ignores_status_and_sorts_by_expiry() {
        let store = seeded().await;
        store
            .insert_food(doc! { "Food_Name": "other", "Donator_Email": "else@x.com", "Expired_Date": "2023-01-01" })
            .await
            .unwrap();

        let mine = store.list_foods(Some("donor@x.com")).await.unwrap();
        assert_eq!(mine.len(), 9);
        assert_eq!(names(&mine)[0], "f8");

        let public = store.list_foods(None).await.unwrap();
        assert_eq!(names(&public)[0], "other");
        assert_eq!(public.len(), 7);
    }

    #[tokio::test]
    async fn replace_overwrites_fields_and_upserts_missing_ids() {
        let store = MemoryAdapter::new();
        let id = store.insert_food(food("rice", 1, "2024-02-01", "Available")).await.unwrap();
        let id = id.inserted_id.as_object_id().unwrap().to_hex();

        let fields = FoodFields::from_document(&doc! { "Food_Name": "beans", "Food_Quantity": 3 });
        let outcome = store.replace_food(&id, fields.clone()).await.unwrap();
        assert_eq!((outcome.matched_count, outcome.modified_count), (1, 1));

        let stored = store.find_food(&id).await.unwrap().unwrap();
        assert_eq!(stored.get_str("Food_Name").unwrap(), "beans");
        assert_eq!(stored.get("Pickup_Location"), Some(&Bson::Null));
        assert_eq!(stored.get_str("Donator_Email").unwrap(), "donor@x.com");

        let again = store.replace_food(&id, fields.clone()).await.unwrap();
        assert_eq!(again.modified_count, 0);

        let fresh = ObjectId::new().to_hex();
        let upserted = store.replace_food(&fresh, fields).await.unwrap();
        assert_eq!(upserted.upserted_id, Some(Bson::ObjectId(parse_id(&fresh).unwrap())));
        assert_eq!(store.food_count().await, 2);
    }

    #[tokio::test]
    async fn booking_cascades_touch_only_matching_food_ids() {
        let store = MemoryAdapter::new();
        store.insert_booking(doc! { "food_id": "a", "Requester_Email": "r@x.com" }).await.unwrap();
        store.insert_booking(doc! { "food_id": "a", "Requester_Email": "s@x.com" }).await.unwrap();
        store.insert_booking(doc! { "food_id": "b", "Requester_Email": "r@x.com" }).await.unwrap();

        let updated = store.set_booking_status("a", FoodStatus::NotAvailable).await.unwrap();
        assert_eq!(updated.matched_count, 2);

        let deleted = store.delete_bookings("a").await.unwrap();
        assert_eq!(deleted.deleted_count, 2);
        assert_eq!(store.booking_count().await, 1);
        assert!(store.find_booking("r@x.com", "b").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn bookings_for_matches_either_party() {
        let store = MemoryAdapter::new();
        store.insert_booking(doc! { "Donator_Email": "d@x.com", "Requester_Email": "r@x.com" }).await.unwrap();
        store.insert_booking(doc! { "Donator_Email": "r@x.com", "Requester_Email": "q@x.com" }).await.unwrap();
        store.insert_booking(doc! { "Donator_Email": "d@x.com", "Requester_Email": "q@x.com" }).await.unwrap();

        assert_eq!(store.bookings_for("r@x.com").await.unwrap().len(), 2);
        assert_eq!(store.bookings_for("nobody@x.com").await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn array_fields_match_on_any_element() {
        let store = MemoryAdapter::new();
        store
            .insert_booking(doc! { "Requester_Email": ["r@x.com", "q@x.com"], "food_id": ["a", "b"] })
            .await
            .unwrap();
        store.insert_booking(doc! { "Requester_Email": "r@x.com", "food_id": [1, 2] }).await.unwrap();

        assert_eq!(store.bookings_for("q@x.com").await.unwrap().len(), 1);
        assert!(store.find_booking("r@x.com", "b").await.unwrap().is_some());
        assert_eq!(store.set_booking_status("a", FoodStatus::NotAvailable).await.unwrap().matched_count, 1);
        assert_eq!(store.delete_bookings("b").await.unwrap().deleted_count, 1);
        assert_eq!(store.booking_count().await, 1);
    }

    #[tokio::test]
    async fn malformed_ids_are_rejected() {
        let store = MemoryAdapter::new();
        assert!(matches!(store.find_food("not-an-id").await, Err(AdapterError::InvalidId(_))));
        assert!(matches!(store.delete_food("123").await, Err(AdapterError::InvalidId(_))));
    }
}
