//! Conversions between JSON request/response bodies and stored documents.
//!
//! Stored documents are rendered the way the MongoDB Node driver would send
//! them: ObjectIds as hex strings, dates as RFC 3339 strings. Write outcomes
//! keep the driver's camelCase result shapes clients already parse.

use adapters::{DeleteOutcome, InsertOutcome, UpdateOutcome};
use mongodb::bson::{self, Bson, Document};
use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::errors::{AppError, AppResult};

/// Converts a request body into a document without filtering any field.
pub fn payload_to_document(payload: &Map<String, Value>) -> AppResult<Document> {
    bson::to_document(payload).map_err(|err| AppError::MalformedPayload(err.to_string()))
}

pub fn document_to_json(doc: Document) -> Value {
    Value::Object(doc.into_iter().map(|(key, value)| (key, bson_to_json(value))).collect())
}

pub fn documents_to_json(docs: Vec<Document>) -> Vec<Value> {
    docs.into_iter().map(document_to_json).collect()
}

pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::String(s) => Value::String(s),
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Int32(i) => Value::from(i),
        Bson::Int64(i) => Value::from(i),
        Bson::Double(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Document(doc) => document_to_json(doc),
        Bson::DateTime(dt) => dt
            .try_to_rfc3339_string()
            .map(Value::String)
            .unwrap_or_else(|_| Value::from(dt.timestamp_millis())),
        other => other.into_relaxed_extjson(),
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsertResponse {
    pub acknowledged: bool,
    pub inserted_id: Value,
}

impl From<InsertOutcome> for InsertResponse {
    fn from(outcome: InsertOutcome) -> Self {
        Self {
            acknowledged: true,
            inserted_id: bson_to_json(outcome.inserted_id),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub acknowledged: bool,
    pub modified_count: u64,
    pub upserted_id: Value,
    pub upserted_count: u64,
    pub matched_count: u64,
}

impl From<UpdateOutcome> for UpdateResponse {
    fn from(outcome: UpdateOutcome) -> Self {
        let upserted_count = u64::from(outcome.upserted_id.is_some());
        Self {
            acknowledged: true,
            modified_count: outcome.modified_count,
            upserted_id: outcome.upserted_id.map(bson_to_json).unwrap_or(Value::Null),
            upserted_count,
            matched_count: outcome.matched_count,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl From<DeleteOutcome> for DeleteResponse {
    fn from(outcome: DeleteOutcome) -> Self {
        Self {
            acknowledged: true,
            deleted_count: outcome.deleted_count,
        }
    }
}
