//! Storage-level models shared by every `StoreAdapter` implementation.
//!
//! Documents themselves stay schemaless (`bson::Document`); these types cover
//! the handful of fields the backend reads or writes by name and the outcomes
//! reported back from each write.

use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Serialize};

/// Database holding both collections.
pub const DEFAULT_DATABASE: &str = "Food-Share-Hub";
/// Collection of donated food items.
pub const FOODS_COLLECTION: &str = "featured-foods";
/// Collection of bookings made against food items.
pub const BOOKINGS_COLLECTION: &str = "bookings-food";

pub const FIELD_ID: &str = "_id";
pub const FIELD_FOOD_NAME: &str = "Food_Name";
pub const FIELD_FOOD_IMAGE: &str = "Food_Image";
pub const FIELD_FOOD_QUANTITY: &str = "Food_Quantity";
pub const FIELD_PICKUP_LOCATION: &str = "Pickup_Location";
pub const FIELD_EXPIRED_DATE: &str = "Expired_Date";
pub const FIELD_ADDITIONAL_NOTES: &str = "Additional_Notes";
pub const FIELD_DONATOR_EMAIL: &str = "Donator_Email";
pub const FIELD_FOOD_STATUS: &str = "Food_Status";
pub const FIELD_REQUESTER_EMAIL: &str = "Requester_Email";
pub const FIELD_FOOD_ID: &str = "food_id";

/// Number of items returned by the featured listing.
pub const FEATURED_LIMIT: usize = 6;

/// Availability of a food item. Bookings carry a copy of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodStatus {
    Available,
    #[serde(rename = "Not_Available")]
    NotAvailable,
}

impl FoodStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FoodStatus::Available => "Available",
            FoodStatus::NotAvailable => "Not_Available",
        }
    }

    /// Whether a document's stored status hides it from public listings.
    ///
    /// Anything other than the exact string `Not_Available`, including a
    /// missing field, counts as available.
    pub fn hides(doc: &Document) -> bool {
        matches!(
            doc.get(FIELD_FOOD_STATUS),
            Some(Bson::String(s)) if s == FoodStatus::NotAvailable.as_str()
        )
    }
}

impl From<FoodStatus> for Bson {
    fn from(status: FoodStatus) -> Self {
        Bson::String(status.as_str().to_string())
    }
}

/// The six fields overwritten by a food replacement.
///
/// A field the client left out is written as `null`, never skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodFields {
    pub food_name: Bson,
    pub food_image: Bson,
    pub food_quantity: Bson,
    pub pickup_location: Bson,
    pub expired_date: Bson,
    pub additional_notes: Bson,
}

impl FoodFields {
    /// Picks the six replacement fields out of an arbitrary payload.
    pub fn from_document(doc: &Document) -> Self {
        let pick = |key: &str| doc.get(key).cloned().unwrap_or(Bson::Null);
        Self {
            food_name: pick(FIELD_FOOD_NAME),
            food_image: pick(FIELD_FOOD_IMAGE),
            food_quantity: pick(FIELD_FOOD_QUANTITY),
            pickup_location: pick(FIELD_PICKUP_LOCATION),
            expired_date: pick(FIELD_EXPIRED_DATE),
            additional_notes: pick(FIELD_ADDITIONAL_NOTES),
        }
    }

    /// The fields as a `$set` body.
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.insert(FIELD_FOOD_NAME, self.food_name.clone());
        doc.insert(FIELD_FOOD_IMAGE, self.food_image.clone());
        doc.insert(FIELD_FOOD_QUANTITY, self.food_quantity.clone());
        doc.insert(FIELD_PICKUP_LOCATION, self.pickup_location.clone());
        doc.insert(FIELD_EXPIRED_DATE, self.expired_date.clone());
        doc.insert(FIELD_ADDITIONAL_NOTES, self.additional_notes.clone());
        doc
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsertOutcome {
    pub inserted_id: Bson,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<Bson>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteOutcome {
    pub deleted_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn status_wire_names() {
        assert_eq!(Bson::from(FoodStatus::NotAvailable), Bson::String("Not_Available".into()));
        assert_eq!(FoodStatus::Available.as_str(), "Available");
    }

    #[test]
    fn only_exact_not_available_hides() {
        assert!(FoodStatus::hides(&doc! { "Food_Status": "Not_Available" }));
        assert!(!FoodStatus::hides(&doc! { "Food_Status": "Available" }));
        assert!(!FoodStatus::hides(&doc! { "Food_Name": "rice" }));
        assert!(!FoodStatus::hides(&doc! { "Food_Status": 0 }));
    }

    #[test]
    fn missing_replacement_fields_become_null() {
        let fields = FoodFields::from_document(&doc! {
            "Food_Name": "bread",
            "Food_Quantity": 4,
            "Donator_Email": "d@x.com",
        });
        let set = fields.to_document();
        assert_eq!(set.len(), 6);
        assert_eq!(set.get("Food_Name"), Some(&Bson::String("bread".into())));
        assert_eq!(set.get("Food_Quantity"), Some(&Bson::Int32(4)));
        assert_eq!(set.get("Additional_Notes"), Some(&Bson::Null));
        assert!(!set.contains_key("Donator_Email"));
    }
}
