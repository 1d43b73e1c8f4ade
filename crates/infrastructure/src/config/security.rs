//! Security configuration: the shared API key for mutating routes.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Key accepted when none is configured
pub const DEFAULT_API_KEY: &str = "secret123";

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Shared secret expected in the `x-api-key` / `api-key` header
    #[serde(default = "default_api_key", skip_serializing)]
    pub api_key: SecretString,
}

fn default_api_key() -> SecretString {
    SecretString::from(DEFAULT_API_KEY)
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
        }
    }
}
