//! Reddit — read-only client for the public JSON API.
//!
//! DESIGN
//! ======
//! Thin HTTP wrapper over three endpoints: `/r/{topic}/hot.json`,
//! `/r/{topic}/about.json`, and the batched `/api/info.json`. Parsing lives
//! in `wire` as pure functions; this module only builds URLs, sends
//! requests, and checks status codes. No timeouts and no retries are
//! configured: a hung request simply never resolves.

pub mod types;
pub mod wire;

#[cfg(test)]
pub mod test_helpers;

use reqwest::Url;
use tracing::debug;

pub use types::{ApiError, ContentApi, Item, TopicAbout};

// =============================================================================
// CLIENT
// =============================================================================

pub struct RedditClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RedditClient {
    /// Build a client rooted at `base_url` (e.g. `https://www.reddit.com`).
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot serve as a path root or the
    /// HTTP client fails to build.
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(format!("{base_url}: cannot be a base")));
        }

        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url })
    }

    /// Base URL without a trailing slash, used to absolutize permalinks.
    #[must_use]
    pub fn site(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(format!("{}: cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_text(&self, url: Url) -> Result<String, ApiError> {
        debug!(%url, "GET");
        let response = self.http.get(url).send().await.map_err(|e| ApiError::Request(e.to_string()))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| ApiError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::Status { status: status.as_u16(), body: text });
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl ContentApi for RedditClient {
    async fn hot(&self, topic: &str, limit: usize) -> Result<Vec<Item>, ApiError> {
        let mut url = self.endpoint(&["r", topic, "hot.json"])?;
        url.query_pairs_mut().append_pair("limit", &limit.to_string());

        let text = self.get_text(url).await?;
        let mut items = wire::parse_listing(&text, self.site())?;
        // Pinned posts can push the listing past the requested limit.
        items.truncate(limit);
        Ok(items)
    }

    async fn about(&self, topic: &str) -> Result<TopicAbout, ApiError> {
        let url = self.endpoint(&["r", topic, "about.json"])?;
        let text = self.get_text(url).await?;
        wire::parse_about(&text)
    }

    async fn info(&self, ids: &[String]) -> Result<Vec<Item>, ApiError> {
        let mut url = self.endpoint(&["api", "info.json"])?;
        url.query_pairs_mut().append_pair("id", &wire::info_query(ids));

        let text = self.get_text(url).await?;
        wire::parse_listing(&text, self.site())
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
