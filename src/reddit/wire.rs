//! Wire types and pure parsing for Reddit listing and about payloads.

use serde::Deserialize;

use super::types::{ApiError, Item, TopicAbout};

/// Prefix Reddit uses for link (post) fullnames.
pub const LINK_PREFIX: &str = "t3_";

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Deserialize)]
struct ListingEnvelope {
    data: ListingData,
}

#[derive(Deserialize)]
struct ListingData {
    children: Vec<ListingChild>,
}

#[derive(Deserialize)]
struct ListingChild {
    data: PostData,
}

#[derive(Deserialize)]
struct PostData {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    score: i64,
    permalink: String,
}

#[derive(Deserialize)]
struct AboutEnvelope {
    data: AboutData,
}

#[derive(Deserialize)]
struct AboutData {
    #[serde(default)]
    icon_img: Option<String>,
}

// =============================================================================
// PARSING
// =============================================================================

/// Join a site base URL and a permalink into an absolute comments link.
pub fn comments_link(base_url: &str, permalink: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if permalink.starts_with('/') {
        format!("{base}{permalink}")
    } else {
        format!("{base}/{permalink}")
    }
}

/// Encode ids for the batched lookup: `t3_a,t3_b,...`.
pub fn info_query(ids: &[String]) -> String {
    ids.iter()
        .map(|id| format!("{LINK_PREFIX}{id}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse a listing payload into items, resolving permalinks against `base_url`.
pub fn parse_listing(json: &str, base_url: &str) -> Result<Vec<Item>, ApiError> {
    let listing: ListingEnvelope = serde_json::from_str(json).map_err(|e| ApiError::Parse(e.to_string()))?;

    Ok(listing
        .data
        .children
        .into_iter()
        .map(|child| {
            let post = child.data;
            Item {
                comments_link: comments_link(base_url, &post.permalink),
                id: post.id,
                title: post.title,
                score: post.score,
            }
        })
        .collect())
}

/// Parse an about payload. A missing or null icon becomes an empty string.
pub fn parse_about(json: &str) -> Result<TopicAbout, ApiError> {
    let about: AboutEnvelope = serde_json::from_str(json).map_err(|e| ApiError::Parse(e.to_string()))?;
    Ok(TopicAbout { icon: about.data.icon_img.unwrap_or_default() })
}

#[cfg(test)]
#[path = "wire_test.rs"]
mod tests;
