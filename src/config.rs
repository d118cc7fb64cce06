//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::DEFAULT_API_BASE;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub upload: UploadConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Client-side upload checks
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_max_file_size")]
    pub max_file_size_bytes: u64,
}

fn default_max_file_size() -> u64 {
    20 * 1024 * 1024 // 20 MB, same as the backend
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: default_max_file_size(),
        }
    }
}

/// Dashboard behaviour
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Maximum number of charts; unset means no cap
    #[serde(default)]
    pub max_charts: Option<usize>,

    #[serde(default = "default_page_size")]
    pub carousel_page_size: usize,
}

fn default_page_size() -> usize {
    3
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            max_charts: None,
            carousel_page_size: default_page_size(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("dashboard-ai").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("api.base_url must not be empty".to_string()));
        }
        if self.dashboard.carousel_page_size == 0 {
            return Err(ConfigError::Invalid(
                "dashboard.carousel_page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("DASHBOARD_AI_API_URL") {
            self.api.base_url = url;
        }
        if let Ok(max) = std::env::var("DASHBOARD_AI_MAX_UPLOAD_BYTES") {
            if let Ok(bytes) = max.parse() {
                self.upload.max_file_size_bytes = bytes;
            }
        }
        if let Ok(level) = std::env::var("DASHBOARD_AI_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("DASHBOARD_AI_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Dashboard AI Configuration
#
# Environment variables override these settings:
# - DASHBOARD_AI_API_URL
# - DASHBOARD_AI_MAX_UPLOAD_BYTES
# - DASHBOARD_AI_LOG_LEVEL
# - DASHBOARD_AI_LOG_FORMAT

[api]
# Base URL of the analysis backend
base_url = "http://127.0.0.1:8000/api"

[upload]
# Files above this size are rejected before upload (bytes)
max_file_size_bytes = 20971520

[dashboard]
# Maximum number of charts on the dashboard (unset = unlimited)
# max_charts = 5

# Suggestions shown per carousel page
carousel_page_size = 3

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty or json
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://127.0.0.1:8000/api");
        assert_eq!(config.upload.max_file_size_bytes, 20 * 1024 * 1024);
        assert_eq!(config.dashboard.max_charts, None);
        assert_eq!(config.dashboard.carousel_page_size, 3);
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_API_BASE);
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.dashboard.max_charts, None);
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse(
            r#"
            [api]
            base_url = "http://backend:9000/api"

            [dashboard]
            max_charts = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://backend:9000/api");
        assert_eq!(config.dashboard.max_charts, Some(5));
        assert_eq!(config.upload.max_file_size_bytes, 20 * 1024 * 1024);
    }

    #[test]
    fn test_invalid_page_size() {
        let err = Config::parse("[dashboard]\ncarousel_page_size = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/dashboard-ai.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[upload]\nmax_file_size_bytes = 1024\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.upload.max_file_size_bytes, 1024);
    }
}
