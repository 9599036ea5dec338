//! History Store: the bounded, newest-first list of past generations.
//!
//! Every change writes the full list back to the key-value store. A missing or
//! unreadable stored list loads as empty; the failure is logged, never surfaced.

pub mod handlers;
pub mod preferences;
pub mod store;

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::models::NoteHistoryItem;

pub use store::{FileStore, KeyValueStore, StoreError};

#[cfg(test)]
pub use store::MemoryStore;

pub const HISTORY_KEY: &str = "studypack.history";
pub const HISTORY_CAPACITY: usize = 10;

pub struct HistoryStore {
    items: Vec<NoteHistoryItem>,
    store: Arc<dyn KeyValueStore>,
}

impl HistoryStore {
    /// Restores the persisted list. Never fails: bad data means empty history.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let items = match store.get(HISTORY_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<NoteHistoryItem>>(&raw) {
                Ok(mut items) => {
                    items.truncate(HISTORY_CAPACITY);
                    items
                }
                Err(e) => {
                    warn!("Stored history is unreadable, starting empty: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Could not read stored history, starting empty: {e}");
                Vec::new()
            }
        };

        info!("History loaded with {} entries", items.len());
        Self { items, store }
    }

    /// Newest first.
    pub fn items(&self) -> &[NoteHistoryItem] {
        &self.items
    }

    pub fn get(&self, id: Uuid) -> Option<&NoteHistoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Prepends `item`, evicts anything past capacity, and persists the result.
    pub fn record(&mut self, item: NoteHistoryItem) -> Result<(), StoreError> {
        self.items.insert(0, item);
        self.items.truncate(HISTORY_CAPACITY);
        self.persist()
    }

    /// Drops every entry and persists the empty list.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.items.clear();
        self.persist()
    }

    fn persist(&self) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.items).map_err(|source| StoreError::Encode {
            key: HISTORY_KEY.to_string(),
            source,
        })?;
        self.store.set(HISTORY_KEY, &raw)
    }
}
