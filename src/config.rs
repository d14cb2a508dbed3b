//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and `BICHANCE_*` environment overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::plans::PriceIds;

/// Production backend
pub const DEFAULT_API_URL: &str = "https://bichance-production-a30f.up.railway.app";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub plans: PriceIds,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            timeout_secs: default_request_timeout(),
        }
    }
}

/// Web host configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the built frontend (index.html + wasm bundle)
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_static_dir() -> String {
    "./bichance-ui/dist".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            cors_origins: Vec::new(),
        }
    }
}

/// Local token storage for the CLI
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfig {
    /// Defaults to `<data dir>/bichance/session.json`
    pub path: Option<String>,
}

impl SessionConfig {
    pub fn resolve_path(&self) -> PathBuf {
        self.path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(default_session_path)
    }
}

fn default_session_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join("bichance").join("session.json"))
        .unwrap_or_else(|| PathBuf::from("./bichance_session.json"))
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
    "info".to_string()
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

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
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
            dirs::config_dir().map(|p| p.join("bichance").join("config.toml")),
            Some(PathBuf::from("/etc/bichance/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Backend
        if let Some(url) = var("BICHANCE_API_URL") {
            self.api.base_url = url;
        }
        if let Some(secs) = var("BICHANCE_API_TIMEOUT").and_then(|s| s.parse().ok()) {
            self.api.timeout_secs = secs;
        }

        // Web host
        if let Some(host) = var("BICHANCE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("BICHANCE_PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
        if let Some(dir) = var("BICHANCE_STATIC_DIR") {
            self.server.static_dir = dir;
        }

        // Session
        if let Some(path) = var("BICHANCE_SESSION_PATH") {
            self.session.path = Some(path);
        }

        // Plans
        if let Some(id) = var("BICHANCE_PRICE_MONTHLY") {
            self.plans.monthly = id;
        }
        if let Some(id) = var("BICHANCE_PRICE_QUARTERLY") {
            self.plans.quarterly = id;
        }
        if let Some(id) = var("BICHANCE_PRICE_YEARLY") {
            self.plans.yearly = id;
        }

        // Logging
        if let Some(level) = var("BICHANCE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("BICHANCE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// `host:port` the web host binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
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
    format!(
        r#"# Bichance Configuration
#
# Environment variables override these settings:
# - BICHANCE_API_URL
# - BICHANCE_API_TIMEOUT
# - BICHANCE_HOST
# - BICHANCE_PORT
# - BICHANCE_STATIC_DIR
# - BICHANCE_SESSION_PATH
# - BICHANCE_PRICE_MONTHLY / BICHANCE_PRICE_QUARTERLY / BICHANCE_PRICE_YEARLY
# - BICHANCE_LOG_LEVEL
# - BICHANCE_LOG_FORMAT

[api]
# Bichance backend base URL (paths are under /api/v1)
base_url = "{api_url}"

# Request timeout in seconds
timeout_secs = 30

[server]
# Web host address
host = "0.0.0.0"
port = 8080

# Built frontend served with SPA fallback
static_dir = "./bichance-ui/dist"

# Allowed CORS origins (empty = permissive)
cors_origins = []

[session]
# Where the CLI keeps the access token
# path = "~/.local/share/bichance/session.json"

[plans]
# Payment-processor price IDs per plan
monthly = "{monthly}"
quarterly = "{quarterly}"
yearly = "{yearly}"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#,
        api_url = DEFAULT_API_URL,
        monthly = PriceIds::default().monthly,
        quarterly = PriceIds::default().quarterly,
        yearly = PriceIds::default().yearly,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.plans, PriceIds::default());
    }

    #[test]
    fn test_generated_config_parses_back_to_defaults() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
        assert_eq!(config.plans, PriceIds::default());
        assert!(config.session.path.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 9000\n[plans]\nyearly = \"price_y\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.plans.yearly, "price_y");
        assert_eq!(config.plans.monthly, PriceIds::default().monthly);
    }

    #[test]
    fn test_missing_and_invalid_files() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[server\nport=").unwrap();
        assert!(matches!(Config::load(&bad), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("BICHANCE_API_URL", "http://127.0.0.1:9999"),
            ("BICHANCE_PORT", "3000"),
            ("BICHANCE_API_TIMEOUT", "not-a-number"),
            ("BICHANCE_SESSION_PATH", "/tmp/s.json"),
            ("BICHANCE_PRICE_MONTHLY", "price_m"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://127.0.0.1:9999");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.session.resolve_path(), PathBuf::from("/tmp/s.json"));
        assert_eq!(config.plans.monthly, "price_m");
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }
}
