//! Favorites service — the saved id set and its resolved details.
//!
//! DESIGN
//! ======
//! The id set is the only durable state in the application. Every change
//! goes through the pure mutators below, is written through `Durable`, and
//! is followed by a fresh batched resolve, so displayed favorites always
//! match the stored ids.
//!
//! TRADE-OFFS
//! ==========
//! Resolution failures keep the previously displayed list. After a failed
//! resolve the list can briefly lag behind the id set; the next successful
//! resolve catches up.

use std::sync::Arc;

use tracing::{info, warn};

use crate::reddit::{ContentApi, Item};
use crate::store::{Durable, KeyValueStore, LoadOutcome};

// =============================================================================
// MUTATORS
// =============================================================================

/// Append `id` unless it is already present.
#[must_use]
pub fn add_favorite(current: &[String], id: &str) -> Vec<String> {
    let mut next = current.to_vec();
    if !current.iter().any(|existing| existing == id) {
        next.push(id.to_owned());
    }
    next
}

/// Drop every occurrence of `id`, keeping the order of the rest.
#[must_use]
pub fn remove_favorite(current: &[String], id: &str) -> Vec<String> {
    current.iter().filter(|existing| *existing != id).cloned().collect()
}

// =============================================================================
// RESOLVER
// =============================================================================

/// Fetch current details for `ids` in one batched request.
///
/// Empty `ids` resolve to an empty list without a request. On failure the
/// `previous` list is returned unchanged.
pub async fn resolve_favorites(api: &dyn ContentApi, ids: &[String], previous: Vec<Item>) -> Vec<Item> {
    if ids.is_empty() {
        return Vec::new();
    }

    match api.info(ids).await {
        Ok(items) => {
            if items.len() < ids.len() {
                info!(requested = ids.len(), resolved = items.len(), "some favorites no longer resolve");
            }
            items
        }
        Err(e) => {
            warn!(count = ids.len(), error = %e, "error fetching favorite details");
            previous
        }
    }
}

// =============================================================================
// FAVORITES
// =============================================================================

/// Saved favorite ids plus their most recently resolved details.
pub struct Favorites {
    ids: Durable<Vec<String>>,
    items: Vec<Item>,
}

impl Favorites {
    /// Open the id set stored under `key`. Details are empty until
    /// [`Favorites::refresh`] runs.
    pub fn open(store: Arc<dyn KeyValueStore>, key: &str) -> Self {
        Self { ids: Durable::open(store, key, Vec::new()), items: Vec::new() }
    }

    #[must_use]
    pub fn ids(&self) -> &[String] {
        self.ids.value()
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn load_outcome(&self) -> &LoadOutcome {
        self.ids.load_outcome()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids().iter().any(|existing| existing == id)
    }

    /// Re-resolve details for the current id set.
    pub async fn refresh(&mut self, api: &dyn ContentApi) {
        let previous = std::mem::take(&mut self.items);
        self.items = resolve_favorites(api, self.ids.value(), previous).await;
    }

    /// Add `id`. Returns `false` if it was already a favorite.
    pub async fn add(&mut self, api: &dyn ContentApi, id: &str) -> bool {
        let next = add_favorite(self.ids(), id);
        self.apply(api, next).await
    }

    /// Remove `id`. Returns `false` if it was not a favorite.
    pub async fn remove(&mut self, api: &dyn ContentApi, id: &str) -> bool {
        let next = remove_favorite(self.ids(), id);
        self.apply(api, next).await
    }

    /// Wait for pending writes of the id set.
    pub async fn flush(&self) {
        self.ids.flush().await;
    }

    async fn apply(&mut self, api: &dyn ContentApi, next: Vec<String>) -> bool {
        if next.as_slice() == self.ids() {
            return false;
        }
        self.ids.set(next);
        self.refresh(api).await;
        true
    }
}

#[cfg(test)]
#[path = "favorites_test.rs"]
mod tests;
