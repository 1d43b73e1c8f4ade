//! HTTP server configuration.

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins (empty = allow all)
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Graceful shutdown timeout in seconds
    #[serde(default)]
    pub shutdown_timeout_secs: Option<u64>,

    /// Log format: "json" for structured JSON logs, "text" for human-readable
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

fn default_log_format() -> String {
    "text".to_string()
}

impl ServerConfig {
    /// Whether logs should be emitted as JSON
    #[must_use]
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: Vec::new(),
            shutdown_timeout_secs: Some(30),
            log_format: default_log_format(),
        }
    }
}
