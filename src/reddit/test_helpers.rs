//! In-memory `ContentApi` for service and app tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use super::types::{ApiError, ContentApi, Item, TopicAbout};

/// One request seen by [`MockApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Hot { topic: String, limit: usize },
    About { topic: String },
    Info { ids: Vec<String> },
}

#[derive(Default)]
pub struct MockApi {
    feeds: Mutex<HashMap<String, Vec<Item>>>,
    icons: Mutex<HashMap<String, String>>,
    known: Mutex<HashMap<String, Item>>,
    failing: Mutex<HashSet<&'static str>>,
    calls: Mutex<Vec<Call>>,
}

/// Build an item the way the fake backend would.
#[must_use]
pub fn item(id: &str, title: &str, score: i64) -> Item {
    Item {
        id: id.to_owned(),
        title: title.to_owned(),
        score,
        comments_link: format!("https://www.reddit.com/r/test/comments/{id}/"),
    }
}

impl MockApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `items` for `topic` and make each of them resolvable by id.
    #[must_use]
    pub fn with_feed(self, topic: &str, items: Vec<Item>) -> Self {
        {
            let mut known = self.known.lock().unwrap();
            for item in &items {
                known.insert(item.id.clone(), item.clone());
            }
        }
        self.feeds.lock().unwrap().insert(topic.to_owned(), items);
        self
    }

    #[must_use]
    pub fn with_icon(self, topic: &str, icon: &str) -> Self {
        self.icons.lock().unwrap().insert(topic.to_owned(), icon.to_owned());
        self
    }

    /// Make an item resolvable by `info` without it being in any feed.
    #[must_use]
    pub fn with_known(self, item: Item) -> Self {
        self.known.lock().unwrap().insert(item.id.clone(), item);
        self
    }

    /// Make `endpoint` (`"hot"`, `"about"` or `"info"`) fail or succeed.
    pub fn set_failing(&self, endpoint: &'static str, failing: bool) {
        let mut set = self.failing.lock().unwrap();
        if failing {
            set.insert(endpoint);
        } else {
            set.remove(endpoint);
        }
    }

    /// Drop an item from the backend, as if it was deleted upstream.
    pub fn forget(&self, id: &str) {
        self.known.lock().unwrap().remove(id);
    }

    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, endpoint: &'static str) -> Result<(), ApiError> {
        if self.failing.lock().unwrap().contains(endpoint) {
            return Err(ApiError::Status { status: 503, body: format!("{endpoint} unavailable") });
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ContentApi for MockApi {
    async fn hot(&self, topic: &str, limit: usize) -> Result<Vec<Item>, ApiError> {
        self.record(Call::Hot { topic: topic.to_owned(), limit });
        self.check("hot")?;
        let feeds = self.feeds.lock().unwrap();
        let items = feeds.get(topic).cloned().unwrap_or_default();
        Ok(items.into_iter().take(limit).collect())
    }

    async fn about(&self, topic: &str) -> Result<TopicAbout, ApiError> {
        self.record(Call::About { topic: topic.to_owned() });
        self.check("about")?;
        let icon = self.icons.lock().unwrap().get(topic).cloned().unwrap_or_default();
        Ok(TopicAbout { icon })
    }

    async fn info(&self, ids: &[String]) -> Result<Vec<Item>, ApiError> {
        self.record(Call::Info { ids: ids.to_vec() });
        self.check("info")?;
        let known = self.known.lock().unwrap();
        Ok(ids.iter().filter_map(|id| known.get(id).cloned()).collect())
    }
}
