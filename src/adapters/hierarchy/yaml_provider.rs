//! YAML file hierarchy provider.
//!
//! Reads the file on every call, so judgements edited on disk apply to the
//! next ranking run without a restart.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::domain::ahp::HierarchyConfig;
use crate::ports::{HierarchyProvider, HierarchySourceError};

/// Hierarchy provider backed by a YAML file.
#[derive(Debug, Clone)]
pub struct YamlHierarchyProvider {
    path: PathBuf,
}

impl YamlHierarchyProvider {
    /// # Example
    /// ```ignore
    /// let provider = YamlHierarchyProvider::new("./config/hierarchy.yaml");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl HierarchyProvider for YamlHierarchyProvider {
    async fn current(&self) -> Result<HierarchyConfig, HierarchySourceError> {
        let path_display = self.path.display().to_string();

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| HierarchySourceError::Io {
                path: path_display.clone(),
                message: e.to_string(),
            })?;

        let config: HierarchyConfig =
            serde_yaml::from_str(&content).map_err(|e| HierarchySourceError::Parse {
                path: path_display.clone(),
                message: e.to_string(),
            })?;

        debug!(path = %path_display, criteria = config.criteria.len(), "Loaded triage hierarchy");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).await.unwrap();
        path
    }

    #[tokio::test]
    async fn loads_flat_hierarchy() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "flat.yaml",
            r#"
criteria:
  - id: airway
    name: Airway
  - id: pulse_rate
    name: Pulse rate
comparisons:
  - [1, 3]
  - [0.3333333333, 1]
"#,
        )
        .await;

        let config = YamlHierarchyProvider::new(&path).current().await.unwrap();
        assert_eq!(config.criteria.len(), 2);
        assert_eq!(config.comparisons[0], vec![1.0, 3.0]);
    }

    #[tokio::test]
    async fn picks_up_edits_between_calls() {
        let dir = TempDir::new().unwrap();
        let one = "criteria:\n  - id: age\n    name: Age\ncomparisons:\n  - [1]\n";
        let path = write(&dir, "h.yaml", one).await;
        let provider = YamlHierarchyProvider::new(&path);
        assert_eq!(provider.current().await.unwrap().criteria[0].id, "age");

        let two = "criteria:\n  - id: airway\n    name: Airway\ncomparisons:\n  - [1]\n";
        write(&dir, "h.yaml", two).await;
        assert_eq!(provider.current().await.unwrap().criteria[0].id, "airway");
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let provider = YamlHierarchyProvider::new(dir.path().join("absent.yaml"));
        let err = provider.current().await.unwrap_err();
        assert!(matches!(err, HierarchySourceError::Io { .. }));
    }

    #[tokio::test]
    async fn malformed_yaml_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bad.yaml", "criteria: [unclosed\n").await;
        let err = YamlHierarchyProvider::new(&path).current().await.unwrap_err();
        assert!(matches!(err, HierarchySourceError::Parse { .. }));
    }
}
