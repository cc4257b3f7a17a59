//! Application controller.
//!
//! DESIGN
//! ======
//! `App` owns everything the user sees: the current topic feed and the
//! favorites. The CLI drives it one command at a time; each command awaits
//! its remote calls before the next one runs, so state is never shared
//! across tasks and needs no locking.
//!
//! ERROR HANDLING
//! ==============
//! Remote failures are logged inside the services and leave state as it
//! was. The only error surfaced here is a rank that names no visible item.

use std::sync::Arc;

use tracing::info;

use crate::config::{Config, FAVORITES_KEY};
use crate::reddit::{ContentApi, Item};
use crate::services::{Favorites, FeedRefresh, TopicFeed};
use crate::store::KeyValueStore;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AppError {
    #[error("no item at rank {rank}; the feed shows {visible}")]
    NoSuchRank { rank: usize, visible: usize },
}

pub struct App {
    api: Arc<dyn ContentApi>,
    feed: TopicFeed,
    favorites: Favorites,
    feed_limit: usize,
}

impl App {
    /// Open saved favorites and resolve their details.
    pub async fn open(config: &Config, api: Arc<dyn ContentApi>, store: Arc<dyn KeyValueStore>) -> Self {
        let mut favorites = Favorites::open(store, FAVORITES_KEY);
        info!(count = favorites.ids().len(), outcome = ?favorites.load_outcome(), "favorites opened");
        favorites.refresh(api.as_ref()).await;
        Self { api, feed: TopicFeed::new(), favorites, feed_limit: config.feed_limit }
    }

    #[must_use]
    pub fn feed(&self) -> &TopicFeed {
        &self.feed
    }

    #[must_use]
    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub async fn search(&mut self, topic: &str) -> FeedRefresh {
        self.feed.refresh(self.api.as_ref(), topic, self.feed_limit).await
    }

    /// Favorite the item shown at `rank` (1-based) in the current feed.
    ///
    /// Returns the favorited item and whether it was newly added.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NoSuchRank`] when the feed has no item there.
    pub async fn favorite_rank(&mut self, rank: usize) -> Result<(Item, bool), AppError> {
        let item = self
            .feed
            .item_at_rank(rank)
            .cloned()
            .ok_or(AppError::NoSuchRank { rank, visible: self.feed.items.len() })?;
        let added = self.add_favorite(&item.id).await;
        Ok((item, added))
    }

    pub async fn add_favorite(&mut self, id: &str) -> bool {
        self.favorites.add(self.api.as_ref(), id).await
    }

    pub async fn remove_favorite(&mut self, id: &str) -> bool {
        self.favorites.remove(self.api.as_ref(), id).await
    }

    /// Re-resolve favorite details without changing the id set.
    pub async fn refresh_favorites(&mut self) {
        self.favorites.refresh(self.api.as_ref()).await;
    }

    /// Wait for pending favorites writes to finish.
    pub async fn shutdown(self) {
        self.favorites.flush().await;
    }
}

#[cfg(test)]
#[path = "app_test.rs"]
mod tests;
