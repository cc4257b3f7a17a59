//! Configuration parsed from environment variables.
//!
//! Command-line flags in `main` take precedence over these values.

use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://www.reddit.com";
pub const DEFAULT_FEED_LIMIT: usize = 10;
pub const DEFAULT_USER_AGENT: &str = concat!("posttracker/", env!("CARGO_PKG_VERSION"));
pub const FAVORITES_KEY: &str = "favorites";

const APP_DIR_NAME: &str = "posttracker";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse failed: {0}")]
    Parse(String),

    #[error("no data directory available; set POSTTRACKER_DATA_DIR")]
    NoDataDir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub data_dir: PathBuf,
    pub feed_limit: usize,
    pub user_agent: String,
}

impl Config {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `POSTTRACKER_BASE_URL`: API root, default `https://www.reddit.com`
    /// - `POSTTRACKER_DATA_DIR`: where favorites are stored, default the
    ///   platform data directory plus `posttracker`
    /// - `POSTTRACKER_FEED_LIMIT`: items per topic search, default 10
    /// - `POSTTRACKER_USER_AGENT`: `User-Agent` header for API requests
    ///
    /// # Errors
    ///
    /// Returns an error if a value is present but invalid, or if no data
    /// directory can be determined.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("POSTTRACKER_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let data_dir = match std::env::var_os("POSTTRACKER_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };
        let feed_limit = parse_feed_limit(std::env::var("POSTTRACKER_FEED_LIMIT").ok().as_deref())?;
        let user_agent = std::env::var("POSTTRACKER_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

        Ok(Self { base_url, data_dir, feed_limit, user_agent })
    }
}

fn default_data_dir() -> Result<PathBuf, ConfigError> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME)).ok_or(ConfigError::NoDataDir)
}

/// Parse a feed limit. Absent means the default; zero is rejected.
pub fn parse_feed_limit(raw: Option<&str>) -> Result<usize, ConfigError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_FEED_LIMIT);
    };
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(ConfigError::Parse("feed limit must be at least 1".into())),
        Ok(limit) => Ok(limit),
        Err(_) => Err(ConfigError::Parse(format!("invalid feed limit '{raw}'"))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
