use super::app_config::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, AppConfig};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Locates and reads the configuration file.
pub struct StorageManager {
    config_dir: PathBuf,
}

impl StorageManager {
    /// Create a new `StorageManager`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration directory cannot be determined.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or(ConfigError::ConfigDirNotFound)?;

        Ok(Self { config_dir })
    }

    /// Creates a new `StorageManager` with a specific directory (useful for testing).
    #[must_use]
    pub fn with_dir(path: PathBuf) -> Self {
        Self { config_dir: path }
    }

    /// Returns the configuration directory path.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Loads the application configuration. A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed or holds
    /// invalid values.
    pub fn load_config(&self, path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
        let config_path = path_override.map_or_else(
            || self.config_dir.join(CONFIG_FILE_NAME),
            std::path::Path::to_path_buf,
        );

        if !config_path.exists() {
            info!("Config file not found at {:?}, using defaults.", config_path);
            return Ok(AppConfig {
                config: Some(config_path),
                ..AppConfig::default()
            });
        }

        let content = fs::read_to_string(&config_path)?;
        let mut config = toml::from_str::<AppConfig>(&content)?;
        config.config = Some(config_path);

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::LogLevel;
    use tempfile::tempdir;

    #[test]
    fn test_load_config_defaults_if_missing() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());

        let config = manager.load_config(None).unwrap();

        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(!dir.path().join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_load_config_reads_file() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "log_level = \"info\"\nrequest_timeout_secs = 12\n",
        )
        .unwrap();

        let config = manager.load_config(None).unwrap();

        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.request_timeout_secs, 12);
    }

    #[test]
    fn test_load_config_rejects_malformed_file() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());
        fs::write(dir.path().join(CONFIG_FILE_NAME), "invalid_toml = [").unwrap();

        let error = tokio_test::assert_err!(manager.load_config(None));

        assert!(matches!(error, ConfigError::TomlDe(_)));
    }

    #[test]
    fn test_load_config_rejects_zero_timeout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "request_timeout_secs = 0").unwrap();
        let manager = StorageManager::with_dir(dir.path().join("unused"));

        let result = manager.load_config(Some(&path));

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
