//! Reddit types — items, topic metadata, errors, and the API seam.

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by content API operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The base URL or a derived endpoint URL is not usable.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The HTTP request could not be sent or its body could not be read.
    #[error("API request failed: {0}")]
    Request(String),

    /// The API returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    Status { status: u16, body: String },

    /// The response body is not the expected JSON shape.
    #[error("API response parse failed: {0}")]
    Parse(String),
}

// =============================================================================
// ITEM
// =============================================================================

/// One content entry as shown to the user. Rebuilt on every fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub score: i64,
    pub comments_link: String,
}

/// Topic metadata. `icon` is empty when the topic has none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicAbout {
    pub icon: String,
}

// =============================================================================
// CONTENT API TRAIT
// =============================================================================

/// Read-only content API. Enables mocking in tests.
#[async_trait::async_trait]
pub trait ContentApi: Send + Sync {
    /// Fetch up to `limit` top items for `topic`, in backend order.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-success status, or
    /// a malformed payload.
    async fn hot(&self, topic: &str, limit: usize) -> Result<Vec<Item>, ApiError>;

    /// Fetch display metadata for `topic`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-success status, or
    /// a malformed payload.
    async fn about(&self, topic: &str) -> Result<TopicAbout, ApiError>;

    /// Look up all `ids` in a single batched request. Ids the backend no
    /// longer knows are absent from the result.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-success status, or
    /// a malformed payload.
    async fn info(&self, ids: &[String]) -> Result<Vec<Item>, ApiError>;
}
