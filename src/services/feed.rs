//! Topic feed service — top items and icon for a topic.
//!
//! DESIGN
//! ======
//! The listing and the metadata are independent requests issued together.
//! Each half of the feed is replaced only when its own request succeeds, so
//! a failed icon lookup never blanks a freshly fetched list and vice versa.

use tracing::{info, warn};

use crate::reddit::{ContentApi, Item};

/// What a refresh did to the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedRefresh {
    /// Blank topic; no request was issued.
    Skipped,
    /// Requests were issued; flags say which halves were replaced.
    Applied { items: bool, icon: bool },
}

/// The currently displayed topic feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicFeed {
    pub topic: Option<String>,
    pub items: Vec<Item>,
    pub icon: String,
}

impl TopicFeed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch up to `limit` items and the icon for `topic`.
    ///
    /// Failures are logged and leave the corresponding state untouched.
    pub async fn refresh(&mut self, api: &dyn ContentApi, topic: &str, limit: usize) -> FeedRefresh {
        let topic = topic.trim();
        if topic.is_empty() {
            return FeedRefresh::Skipped;
        }

        let (listing, about) = tokio::join!(api.hot(topic, limit), api.about(topic));

        let items = match listing {
            Ok(mut items) => {
                items.truncate(limit);
                info!(topic = %topic, count = items.len(), "topic feed fetched");
                self.topic = Some(topic.to_owned());
                self.items = items;
                true
            }
            Err(e) => {
                warn!(topic = %topic, error = %e, "error fetching topic feed");
                false
            }
        };

        let icon = match about {
            Ok(about) => {
                self.icon = about.icon;
                true
            }
            Err(e) => {
                warn!(topic = %topic, error = %e, "error fetching topic icon");
                false
            }
        };

        FeedRefresh::Applied { items, icon }
    }

    /// Item at 1-based `rank`, as numbered on screen.
    #[must_use]
    pub fn item_at_rank(&self, rank: usize) -> Option<&Item> {
        rank.checked_sub(1).and_then(|index| self.items.get(index))
    }
}

#[cfg(test)]
#[path = "feed_test.rs"]
mod tests;
