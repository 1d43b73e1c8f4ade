//! In-memory fallback store configuration.

use serde::{Deserialize, Serialize};

use super::default_true;

/// Fallback store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Start the fallback lists with the sample books and products
    #[serde(default = "default_true")]
    pub seed_fallback: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            seed_fallback: true,
        }
    }
}
