//! User configuration loaded from TOML
//!
//! Search order is an explicit `--config` path, then
//! `<config dir>/roamy/config.toml`, then built-in defaults. Every field is
//! optional in the file.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::data::client::{parse_base_url, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested file does not exist
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// The file exists but could not be read
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for `Config`
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    #[serde(default)]
    pub logging: Logging,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Logging {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file; defaults to `<cache dir>/roamy/roamy.log`
    pub path: Option<PathBuf>,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            path: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_capacity: default_cache_capacity(),
            page_size: default_page_size(),
            search_debounce_ms: default_search_debounce_ms(),
            logging: Logging::default(),
        }
    }
}

// Defaults
fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}
fn default_request_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_cache_ttl_secs() -> u64 {
    crate::cache::DEFAULT_TTL_SECS as u64
}
fn default_cache_capacity() -> usize {
    crate::cache::DEFAULT_CAPACITY
}
fn default_page_size() -> u32 {
    crate::pages::home::DEFAULT_PAGE_SIZE
}
fn default_search_debounce_ms() -> u64 {
    500
}
fn default_log_level() -> String {
    "warn".to_string()
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "roamy")
}

/// `<config dir>/roamy/config.toml`, if a home directory can be found
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

/// `<cache dir>/roamy/roamy.log`, if a home directory can be found
pub fn default_log_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().join("roamy.log"))
}

impl Config {
    /// Loads, overrides and validates the configuration used at startup
    ///
    /// `api_url` comes from the command line or `ROAMY_API_URL` and replaces
    /// the file's value before anything is checked.
    pub fn resolve(explicit: Option<&Path>, api_url: Option<String>) -> Result<Self, ConfigError> {
        let config = Self::load(explicit)?.with_api_url(api_url);
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration following the search order, without validating it
    ///
    /// An explicit path must exist; a missing default file means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Self::from_file(path)?
            }
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        Ok(config)
    }

    /// Reads and parses one file without validating it
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Replaces the base URL when an override is given
    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_base_url(&self.api_url).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if self.cache_capacity == 0 {
            return Err(ConfigError::Invalid(
                "cache_capacity must be at least 1".to_string(),
            ));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid(
                "page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn cache_ttl(&self) -> chrono::Duration {
        // chrono panics above i64::MAX milliseconds
        let secs = self.cache_ttl_secs.min(i64::MAX as u64 / 1000);
        chrono::Duration::seconds(secs as i64)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Configured log file, falling back to the cache directory
    pub fn log_path(&self) -> Option<PathBuf> {
        self.logging.path.clone().or_else(default_log_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://localhost:8000/api");
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.cache_ttl_secs, 60);
        assert_eq!(config.cache_capacity, 100);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.search_debounce(), Duration::from_millis(500));
        assert_eq!(config.logging.level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
api_url = "https://travel.example.com/api"
page_size = 20

[logging]
level = "debug"
"#,
        );

        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config.api_url, "https://travel.example.com/api");
        assert_eq!(config.page_size, 20);
        assert_eq!(config.cache_capacity, 100);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.path.is_none());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");

        assert!(matches!(
            Config::load(Some(&path)),
            Err(ConfigError::NotFound(_))
        ));
    }

    #[test]
    fn test_unparsable_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "page_size = \"ten\"");

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "cache_capacity = 0");
        assert!(matches!(
            Config::resolve(Some(&path), None),
            Err(ConfigError::Invalid(_))
        ));

        let path = write_config(&dir, "api_url = \"localhost\"");
        assert!(matches!(
            Config::resolve(Some(&path), None),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_api_url_override_replaces_invalid_file_value() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "api_url = \"localhost\"");

        let config =
            Config::resolve(Some(&path), Some("http://ok.example/api".to_string())).unwrap();

        assert_eq!(config.api_url, "http://ok.example/api");
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "api_url = \"https://travel.example.com/api\"");

        assert!(matches!(
            Config::resolve(Some(&path), Some("ftp://files.example".to_string())),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_api_url_override() {
        let config = Config::default().with_api_url(Some("http://10.0.0.2:9000/api".to_string()));
        assert_eq!(config.api_url, "http://10.0.0.2:9000/api");

        let config = Config::default().with_api_url(None);
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_configured_log_path_wins() {
        let mut config = Config::default();
        config.logging.path = Some(PathBuf::from("/tmp/roamy-test.log"));

        assert_eq!(config.log_path(), Some(PathBuf::from("/tmp/roamy-test.log")));
    }

    #[test]
    fn test_durations() {
        let config = Config::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.cache_ttl(), chrono::Duration::seconds(60));
    }
}
