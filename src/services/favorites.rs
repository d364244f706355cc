use std::sync::Arc;

use crate::storage::KeyValueStore;

/// Storage key holding the array of favorited resource IDs
const FAVORITES_KEY: &str = "favorites";

/// Client-side persistence of favorited resources
///
/// Persistence is best-effort: read failures and corrupt data fall back to an
/// empty list, write failures are logged and swallowed. Nothing here ever
/// propagates to the caller.
#[derive(Clone)]
pub struct FavoritesService {
    store: Arc<dyn KeyValueStore>,
}

impl FavoritesService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Returns the current list of favorite resource IDs
    ///
    /// Empty if storage is empty, unreadable, or corrupted.
    pub fn get_favorites(&self) -> Vec<u32> {
        match self.store.get(FAVORITES_KEY) {
            Ok(Some(value)) => match serde_json::from_value(value) {
                Ok(ids) => ids,
                Err(e) => {
                    tracing::warn!(error = %e, "Corrupt favorites entry, resetting to empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read favorites, resetting to empty");
                Vec::new()
            }
        }
    }

    /// Adds a resource ID to the favorites list, ignoring duplicates
    pub fn add_favorite(&self, id: u32) {
        let mut favorites = self.get_favorites();
        if !favorites.contains(&id) {
            favorites.push(id);
            self.save(&favorites);
        }
    }

    /// Removes a resource ID from the favorites list
    pub fn remove_favorite(&self, id: u32) {
        let mut favorites = self.get_favorites();
        favorites.retain(|fav_id| *fav_id != id);
        self.save(&favorites);
    }

    fn save(&self, ids: &[u32]) {
        match serde_json::to_value(ids) {
            Ok(value) => {
                if let Err(e) = self.store.set(FAVORITES_KEY, value) {
                    tracing::error!(error = %e, "Failed to persist favorites");
                }
            }
            Err(e) => tracing::error!(error = %e, "Failed to serialize favorites"),
        }
    }
}
