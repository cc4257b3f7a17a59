//! Terminal rendering for feeds and favorites.
//!
//! Presentation only: titles are shortened here, never in stored items.

use std::borrow::Cow;
use std::fmt::Write;

use crate::reddit::Item;
use crate::services::TopicFeed;

pub const MAX_TITLE_CHARS: usize = 150;
pub const ELLIPSIS: &str = "...";

/// Shorten titles longer than [`MAX_TITLE_CHARS`] characters to that many
/// characters plus [`ELLIPSIS`].
#[must_use]
pub fn truncate_title(title: &str) -> Cow<'_, str> {
    match title.char_indices().nth(MAX_TITLE_CHARS) {
        Some((cut, _)) => Cow::Owned(format!("{}{ELLIPSIS}", &title[..cut])),
        None => Cow::Borrowed(title),
    }
}

/// One item as two lines: ranked title, then score and comments link.
/// `starred` marks items that are already favorites.
#[must_use]
pub fn render_item(rank: usize, item: &Item, starred: bool) -> String {
    let marker = if starred { "*" } else { " " };
    format!(
        "{rank:>3}.{marker}{title}\n      score {score} | {link} | id {id}",
        title = truncate_title(&item.title),
        score = item.score,
        link = item.comments_link,
        id = item.id,
    )
}

/// The feed with a header naming the topic and its icon, if any.
#[must_use]
pub fn render_feed(feed: &TopicFeed, is_favorite: impl Fn(&str) -> bool) -> String {
    let mut out = String::new();
    match &feed.topic {
        Some(topic) => {
            let _ = write!(out, "Top posts in r/{topic}");
            if !feed.icon.is_empty() {
                let _ = write!(out, " [icon: {}]", feed.icon);
            }
        }
        None => out.push_str("Top posts"),
    }
    out.push('\n');

    if feed.items.is_empty() {
        out.push_str("  (no posts)\n");
    }
    for (index, item) in feed.items.iter().enumerate() {
        let _ = writeln!(out, "{}", render_item(index + 1, item, is_favorite(&item.id)));
    }
    out
}

/// Resolved favorites under a "Favorites" header.
#[must_use]
pub fn render_favorites(items: &[Item]) -> String {
    let mut out = String::from("Favorites\n");
    if items.is_empty() {
        out.push_str("  (none)\n");
    }
    for (index, item) in items.iter().enumerate() {
        let _ = writeln!(out, "{}", render_item(index + 1, item, false));
    }
    out
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
