//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CASUALTY_TRIAGE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use casualty_triage::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod error;
mod server;
mod triage;

pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use triage::{TriageConfig, PATIENT_LIMIT_CEILING};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so the service starts with no environment set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Triage engine configuration (hierarchy source, run limits)
    #[serde(default)]
    pub triage: TriageConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CASUALTY_TRIAGE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CASUALTY_TRIAGE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CASUALTY_TRIAGE__TRIAGE__HIERARCHY_PATH=...` -> `triage.hierarchy_path = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CASUALTY_TRIAGE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.triage.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("CASUALTY_TRIAGE__SERVER__PORT");
        env::remove_var("CASUALTY_TRIAGE__SERVER__ENVIRONMENT");
        env::remove_var("CASUALTY_TRIAGE__TRIAGE__HIERARCHY_PATH");
        env::remove_var("CASUALTY_TRIAGE__TRIAGE__MAX_PATIENTS_PER_RUN");
    }

    #[test]
    fn test_load_with_no_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.triage.max_patients_per_run, 500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CASUALTY_TRIAGE__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CASUALTY_TRIAGE__SERVER__PORT", "3000");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_triage_section_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CASUALTY_TRIAGE__TRIAGE__HIERARCHY_PATH", "/etc/triage/hierarchy.yaml");
        env::set_var("CASUALTY_TRIAGE__TRIAGE__MAX_PATIENTS_PER_RUN", "50");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(
            config.triage.hierarchy_path,
            Some(PathBuf::from("/etc/triage/hierarchy.yaml"))
        );
        assert_eq!(config.triage.max_patients_per_run, 50);
    }

    #[test]
    fn test_validate_rejects_zero_patient_limit() {
        let config = AppConfig {
            triage: TriageConfig {
                max_patients_per_run: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidPatientLimit(_))
        ));
    }
}
