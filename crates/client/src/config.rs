//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `LUNCHBOX_DATABASE_PATH` - Path of the embedded SQLite database file
//!   (default: `lunchbox.db`)

use std::path::PathBuf;

use thiserror::Error;

/// Default database file, created next to the working directory.
const DEFAULT_DATABASE_PATH: &str = "lunchbox.db";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the embedded SQLite database file.
    pub database_path: PathBuf,
}

impl Config {
    /// Load configuration from the environment (and `.env`, if present).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set but empty.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let database_path = match std::env::var("LUNCHBOX_DATABASE_PATH") {
            Ok(value) if value.trim().is_empty() => {
                return Err(ConfigError::InvalidEnvVar(
                    "LUNCHBOX_DATABASE_PATH".to_owned(),
                    "must not be empty".to_owned(),
                ));
            }
            Ok(value) => PathBuf::from(value),
            Err(_) => PathBuf::from(DEFAULT_DATABASE_PATH),
        };

        Ok(Self { database_path })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_database_path() {
        let config = Config::default();
        assert_eq!(config.database_path, PathBuf::from("lunchbox.db"));
    }
}
