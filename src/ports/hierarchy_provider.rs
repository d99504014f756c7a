use async_trait::async_trait;

use crate::domain::ahp::HierarchyConfig;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Source of the comparison hierarchy used for ranking.
///
/// Implementations may re-read their backing source on every call so that
/// edited judgements take effect without a restart.
#[async_trait]
pub trait HierarchyProvider: Send + Sync {
    /// Returns the hierarchy configuration in force.
    async fn current(&self) -> Result<HierarchyConfig, HierarchySourceError>;
}

/// Errors that can occur while loading a hierarchy configuration.
#[derive(Debug, thiserror::Error)]
pub enum HierarchySourceError {
    #[error("Failed to read hierarchy from {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse hierarchy from {path}: {message}")]
    Parse { path: String, message: String },
}

impl From<HierarchySourceError> for DomainError {
    fn from(err: HierarchySourceError) -> Self {
        DomainError::new(ErrorCode::HierarchySourceError, err.to_string())
    }
}
