//! Handler functions for the food listing API.
//!
//! Bodies are stored verbatim and documents are returned as stored; the
//! only field-level logic is the six-field replacement and the status
//! cascade, both delegated to the store and `services::food_lifecycle`.

use adapters::{FoodFields, FEATURED_LIMIT};
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::auth::Session;
use crate::database::models::{
    document_to_json, documents_to_json, payload_to_document, DeleteResponse, InsertResponse, UpdateResponse,
};
use crate::errors::AppResult;
use crate::services::food_lifecycle;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FoodQuery {
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StatusChangeResponse {
    pub result: UpdateResponse,
    #[serde(rename = "bookResult")]
    pub book_result: UpdateResponse,
}

#[derive(Debug, Serialize)]
pub struct DeleteFoodResponse {
    /// Outcome of deleting the item's bookings.
    pub result: DeleteResponse,
    /// Outcome of deleting the item itself.
    pub success: DeleteResponse,
}

pub async fn list_featured(State(state): State<AppState>) -> AppResult<Json<Vec<Value>>> {
    let foods = state.store.featured_foods(FEATURED_LIMIT).await?;
    Ok(Json(documents_to_json(foods)))
}

/// With `?email=`, that donor's items whatever their status.
pub async fn list_food(State(state): State<AppState>, Query(query): Query<FoodQuery>) -> AppResult<Json<Vec<Value>>> {
    let donor = query.email.as_deref().filter(|email| !email.is_empty());
    let foods = state.store.list_foods(donor).await?;
    Ok(Json(documents_to_json(foods)))
}

/// Responds `null` rather than 404 when nothing matches.
pub async fn get_food(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Json<Value>> {
    let food = state.store.find_food(&id).await?;
    Ok(Json(food.map(document_to_json).unwrap_or(Value::Null)))
}

pub async fn create_food(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(payload): Json<Map<String, Value>>,
) -> AppResult<Json<InsertResponse>> {
    info!(session = ?session.email(), "adding food");
    let food = payload_to_document(&payload)?;
    let outcome = state.store.insert_food(food).await?;
    Ok(Json(outcome.into()))
}

/// Ownership of the item is not checked.
pub async fn replace_food(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Map<String, Value>>,
) -> AppResult<Json<UpdateResponse>> {
    let fields = FoodFields::from_document(&payload_to_document(&payload)?);
    let outcome = state.store.replace_food(&id, fields).await?;
    Ok(Json(outcome.into()))
}

pub async fn mark_unavailable(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<StatusChangeResponse>> {
    let change = food_lifecycle::mark_unavailable(state.store.as_ref(), &id).await?;
    Ok(Json(StatusChangeResponse {
        result: change.food.into(),
        book_result: change.bookings.into(),
    }))
}

pub async fn delete_food(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteFoodResponse>> {
    let removal = food_lifecycle::delete_with_bookings(state.store.as_ref(), &id).await?;
    Ok(Json(DeleteFoodResponse {
        result: removal.bookings.into(),
        success: removal.food.into(),
    }))
}
