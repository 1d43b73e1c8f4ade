//! Database (SQLite) configuration.

use serde::{Deserialize, Serialize};

/// Persistent catalog database configuration
///
/// Without a URL the service runs on the in-memory fallback store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL, e.g. `sqlite:catalog.db` or `sqlite::memory:`
    #[serde(default)]
    pub url: Option<String>,

    /// Maximum number of concurrent database connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds between reconnect attempts after a failed connect (0 = never retry)
    #[serde(default = "default_reconnect_interval")]
    pub reconnect_interval_secs: u64,
}

const fn default_max_connections() -> u32 {
    5
}

const fn default_reconnect_interval() -> u64 {
    30
}

impl DatabaseConfig {
    /// Configuration pointing at the given URL
    #[must_use]
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// The configured URL, ignoring blank values
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
            reconnect_interval_secs: default_reconnect_interval(),
        }
    }
}
