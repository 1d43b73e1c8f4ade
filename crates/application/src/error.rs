//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage backend failed or is unreachable
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is a missing-record condition
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::Domain(DomainError::NotFound { .. })
        )
    }
}
