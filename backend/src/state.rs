//! Application context shared by every handler.

use std::sync::Arc;

use adapters::StoreAdapter;

use crate::auth::SessionKeys;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StoreAdapter>,
    pub sessions: Arc<SessionKeys>,
}

impl AppState {
    pub fn new(store: Arc<dyn StoreAdapter>, sessions: SessionKeys) -> Self {
        Self {
            store,
            sessions: Arc::new(sessions),
        }
    }
}
