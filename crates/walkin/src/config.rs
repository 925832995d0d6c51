//! Configuration management for walkin.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::net::SocketAddr;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory name under the user's config dir.
const CONFIG_DIR_NAME: &str = "walkin";

/// Password shipped with the tool. Deployments are expected to override it.
pub const DEFAULT_PASSWORD: &str = "admin123";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `WALKIN_`, sections split on `__`)
/// 2. TOML config file at `~/.config/walkin/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Data file configuration.
    pub storage: StorageConfig,
    /// Backend access configuration.
    pub auth: AuthConfig,
    /// Logo and heading configuration.
    pub branding: BrandingConfig,
    /// Live queue dashboard configuration.
    pub queue: QueueConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the web application listens on.
    pub bind: String,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the data files.
    /// Defaults to the current working directory.
    pub data_dir: Option<PathBuf>,
    /// File name of the live queue collection.
    pub queue_file: String,
    /// File name of the customer log collection.
    pub customers_file: String,
}

/// Backend access configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared secret that unlocks the staff dashboard.
    pub password: String,
}

/// Branding configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandingConfig {
    /// Directory searched for `logo.png`, `logo.jpeg` or `logo.jpg`.
    /// Defaults to the data directory.
    pub asset_dir: Option<PathBuf>,
    /// Heading shown when no logo is present.
    pub title: String,
}

/// Live queue dashboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Which records the "total" metric counts.
    pub total_window: TotalWindow,
}

/// Time window of the queue's total metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalWindow {
    /// Every record currently in the queue file.
    #[default]
    AllTime,
    /// Records added on the current local date.
    Today,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8501".to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            queue_file: "live_queue.json".to_string(),
            customers_file: "customers.json".to_string(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            password: DEFAULT_PASSWORD.to_string(),
        }
    }
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            asset_dir: None,
            title: "Customer Management".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("WALKIN_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.auth.password.is_empty() {
            return Err(Error::ConfigValidation {
                message: "auth.password must not be empty".to_string(),
            });
        }

        let storage = &self.storage;
        if storage.queue_file.trim().is_empty() || storage.customers_file.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "storage file names must not be empty".to_string(),
            });
        }

        if self.storage.queue_file == self.storage.customers_file {
            return Err(Error::ConfigValidation {
                message: format!(
                    "queue_file and customers_file must differ (both are {})",
                    self.storage.queue_file
                ),
            });
        }

        if self.server.bind.parse::<SocketAddr>().is_err() {
            return Err(Error::ConfigValidation {
                message: format!("invalid bind address: {}", self.server.bind),
            });
        }

        Ok(())
    }

    /// Get the data directory, resolving defaults if not set.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Path of the live queue file.
    #[must_use]
    pub fn queue_path(&self) -> PathBuf {
        self.data_dir().join(&self.storage.queue_file)
    }

    /// Path of the customer log file.
    #[must_use]
    pub fn customers_path(&self) -> PathBuf {
        self.data_dir().join(&self.storage.customers_file)
    }

    /// Directory searched for the logo, resolving defaults if not set.
    #[must_use]
    pub fn asset_dir(&self) -> PathBuf {
        self.branding
            .asset_dir
            .clone()
            .unwrap_or_else(|| self.data_dir())
    }

    /// Whether the shipped password is still in use.
    #[must_use]
    pub fn uses_default_password(&self) -> bool {
        self.auth.password == DEFAULT_PASSWORD
    }

    /// The configured bind address.
    ///
    /// # Errors
    ///
    /// Returns an error if the address does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server
            .bind
            .parse()
            .map_err(|_| Error::ConfigValidation {
                message: format!("invalid bind address: {}", self.server.bind),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.bind, "127.0.0.1:8501");
        assert_eq!(config.storage.queue_file, "live_queue.json");
        assert_eq!(config.storage.customers_file, "customers.json");
        assert_eq!(config.auth.password, DEFAULT_PASSWORD);
        assert_eq!(config.queue.total_window, TotalWindow::AllTime);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_password() {
        let mut config = Config::default();
        config.auth.password = String::new();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("password"));
    }

    #[test]
    fn test_validate_same_file_names() {
        let mut config = Config::default();
        config.storage.customers_file = "live_queue.json".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("must differ"));
    }

    #[test]
    fn test_validate_empty_file_name() {
        let mut config = Config::default();
        config.storage.queue_file = "  ".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_bind() {
        let mut config = Config::default();
        config.server.bind = "not-an-address".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("bind address"));
    }

    #[test]
    fn test_paths_default_to_current_dir() {
        let config = Config::default();

        assert_eq!(config.queue_path(), PathBuf::from("./live_queue.json"));
        assert_eq!(config.customers_path(), PathBuf::from("./customers.json"));
        assert_eq!(config.asset_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_paths_custom_data_dir() {
        let mut config = Config::default();
        config.storage.data_dir = Some(PathBuf::from("/srv/desk"));

        assert_eq!(config.queue_path(), PathBuf::from("/srv/desk/live_queue.json"));
        assert_eq!(config.asset_dir(), PathBuf::from("/srv/desk"));

        config.branding.asset_dir = Some(PathBuf::from("/srv/brand"));
        assert_eq!(config.asset_dir(), PathBuf::from("/srv/brand"));
    }

    #[test]
    fn test_uses_default_password() {
        let mut config = Config::default();
        assert!(config.uses_default_password());

        config.auth.password = "s3cret".to_string();
        assert!(!config.uses_default_password());
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("walkin"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        // Loading from a nonexistent path should work (uses defaults)
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[auth]\npassword = \"frontdesk\"\n\n[queue]\ntotal_window = \"today\"\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path)).unwrap();
        assert_eq!(config.auth.password, "frontdesk");
        assert_eq!(config.queue.total_window, TotalWindow::Today);
        assert_eq!(config.storage.queue_file, "live_queue.json");
    }

    #[test]
    fn test_total_window_deserialize() {
        let queue: QueueConfig = serde_json::from_str(r#"{"total_window": "today"}"#).unwrap();
        assert_eq!(queue.total_window, TotalWindow::Today);

        let queue: QueueConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(queue.total_window, TotalWindow::AllTime);
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("queue_file"));
        assert!(json.contains("all_time"));
    }
}
