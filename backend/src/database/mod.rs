//! Module for document store setup and common utilities.
//!
//! This module opens the configured `StoreAdapter` once at startup and
//! confirms it answers before the server starts accepting requests.

pub mod models;

use std::sync::Arc;

use adapters::{MemoryAdapter, MongoAdapter, StoreAdapter};
use tracing::info;

use crate::config::StoreKind;
use crate::errors::AppResult;

pub async fn connect_store(kind: &StoreKind) -> AppResult<Arc<dyn StoreAdapter>> {
    let store: Arc<dyn StoreAdapter> = match kind {
        StoreKind::Mongo(settings) => {
            info!(database = %settings.database, "connecting to mongodb");
            Arc::new(MongoAdapter::connect(settings).await?)
        }
        StoreKind::Memory => Arc::new(MemoryAdapter::new()),
    };
    store.ping().await?;
    Ok(store)
}
