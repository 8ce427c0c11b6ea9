//! Defines the HTTP routes for browsing and managing food items.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use super::handlers::{create_food, delete_food, get_food, list_featured, list_food, mark_unavailable, replace_food};
use crate::state::AppState;

pub fn public_food_router() -> Router<AppState> {
    Router::new()
        .route("/feature-food", get(list_featured))
        .route("/food", get(list_food))
        .route("/food/:id", get(get_food))
}

/// Routes that must sit behind `require_session`.
pub fn protected_food_router() -> Router<AppState> {
    Router::new()
        .route("/food", post(create_food))
        .route("/food/:id", put(replace_food))
        .route("/status/:id", patch(mark_unavailable))
        .route("/delete/:id", delete(delete_food))
}
