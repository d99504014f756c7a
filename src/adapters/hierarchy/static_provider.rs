//! Fixed hierarchy provider.

use async_trait::async_trait;

use crate::domain::ahp::HierarchyConfig;
use crate::ports::{HierarchyProvider, HierarchySourceError};

/// Serves one hierarchy configuration for the life of the process.
#[derive(Debug, Clone)]
pub struct StaticHierarchyProvider {
    config: HierarchyConfig,
}

impl StaticHierarchyProvider {
    pub fn new(config: HierarchyConfig) -> Self {
        Self { config }
    }

    /// Provider serving the built-in hierarchy.
    pub fn standard() -> Self {
        Self::new(HierarchyConfig::standard())
    }
}

#[async_trait]
impl HierarchyProvider for StaticHierarchyProvider {
    async fn current(&self) -> Result<HierarchyConfig, HierarchySourceError> {
        Ok(self.config.clone())
    }
}
