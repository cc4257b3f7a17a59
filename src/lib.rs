//! Browse top posts by topic and keep a persistent list of favorites.

pub mod app;
pub mod config;
pub mod reddit;
pub mod render;
pub mod services;
pub mod store;
