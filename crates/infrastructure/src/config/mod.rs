//! Application configuration
//!
//! Split into focused sub-modules by domain:
//! - `server`: HTTP server settings
//! - `database`: persistent catalog database
//! - `security`: shared API key
//! - `storage`: in-memory fallback store

mod database;
mod security;
mod server;
mod storage;

use serde::{Deserialize, Serialize};

pub use database::DatabaseConfig;
pub use security::{DEFAULT_API_KEY, SecurityConfig};
pub use server::ServerConfig;
pub use storage::StorageConfig;

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Security configuration
    #[serde(default)]
    pub security: SecurityConfig,

    /// Fallback store configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    ///
    /// Precedence, lowest first: built-in defaults, `config.toml`,
    /// `CATALOG__<SECTION>__<KEY>` variables, then the plain `PORT`,
    /// `DATABASE_URL` and `API_KEY` variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (e.g., CATALOG__SERVER__PORT)
            .add_source(
                config::Environment::with_prefix("CATALOG")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.port", env_var("PORT"))?
            .set_override_option("database.url", env_var("DATABASE_URL"))?
            .set_override_option("security.api_key", env_var("API_KEY"))?;

        Self::build(builder)
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, config::ConfigError> {
        builder
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .build()?
            .try_deserialize()
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
