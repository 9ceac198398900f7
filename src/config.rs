//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::client::DEFAULT_API_BASE;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Screening API connection
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

/// Static host for the compiled browser bundle
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_ui_dir")]
    pub ui_dir: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8084
}

fn default_ui_dir() -> String {
    "./carescan-ui/dist".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            ui_dir: default_ui_dir(),
        }
    }
}

impl ServerConfig {
    /// Socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
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

        Self::parse(path, &content)
    }

    fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
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
            dirs::config_dir().map(|p| p.join("carescan").join("config.toml")),
            Some(PathBuf::from("/etc/carescan/config.toml")),
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

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("CARESCAN_API_URL") {
            self.api.base_url = url;
        }

        if let Some(host) = var("CARESCAN_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("CARESCAN_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Some(dir) = var("CARESCAN_UI_DIR") {
            self.server.ui_dir = dir;
        }

        if let Some(level) = var("CARESCAN_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("CARESCAN_LOG_FORMAT") {
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
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# CareScan Configuration
#
# Environment variables override these settings:
# - CARESCAN_API_URL
# - CARESCAN_HOST
# - CARESCAN_PORT
# - CARESCAN_UI_DIR
# - CARESCAN_LOG_LEVEL
# - CARESCAN_LOG_FORMAT

[api]
# Screening API base URL (including the /api prefix)
base_url = "http://localhost:8000/api"

[server]
# Where `carescan serve` listens
host = "127.0.0.1"
port = 8084

# Directory holding the compiled browser bundle (index.html, wasm, js)
ui_dir = "./carescan-ui/dist"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.server.addr(), "127.0.0.1:8084");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(Path::new("generated"), &generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_API_BASE);
        assert_eq!(config.server.port, 8084);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse(
            Path::new("partial"),
            "[api]\nbase_url = \"https://screening.example.com/api\"\n",
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://screening.example.com/api");
        assert_eq!(config.server.port, 8084);
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("CARESCAN_API_URL", "http://api.test/api"),
            ("CARESCAN_PORT", "9000"),
            ("CARESCAN_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.api.base_url, "http://api.test/api");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_bad_port_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|k| (k == "CARESCAN_PORT").then(|| "not-a-port".to_string()));
        assert_eq!(config.server.port, 8084);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.logging.level, "debug");

        let missing = Config::load(&dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}
