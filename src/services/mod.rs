//! Domain services used by the app controller.
//!
//! ARCHITECTURE
//! ============
//! Service modules own fetching, fallback, and persistence rules so the
//! controller and the CLI stay focused on user interaction.

pub mod favorites;
pub mod feed;

pub use favorites::{Favorites, add_favorite, remove_favorite, resolve_favorites};
pub use feed::{FeedRefresh, TopicFeed};
