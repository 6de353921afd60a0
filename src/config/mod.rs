//! Configuration management
//!
//! This module handles loading and parsing configuration for userbase.
//! Configuration can be loaded from:
//! - config.yml file
//! - Environment variables (override file settings)
//!
//! Missing optional values are filled with defaults, except the token
//! signing secret: `Config::validate` rejects a config without one.

use serde::{Deserialize, Serialize};

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "USERBASE_CONFIG";

/// Config file used when `USERBASE_CONFIG` is unset
pub const DEFAULT_CONFIG_PATH: &str = "config.yml";

/// Longest accepted access token lifetime (one year)
pub const MAX_TOKEN_TTL_SECONDS: i64 = 365 * 24 * 60 * 60;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origin
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_cors_origin() -> String {
    "http://localhost:3000".to_string()
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret for access tokens (required)
    #[serde(default)]
    pub jwt_secret: Option<String>,
    /// Access token lifetime in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_seconds: i64,
    /// Login username
    #[serde(default = "default_username")]
    pub username: String,
    /// Login password (hashed at startup, never stored in plaintext)
    #[serde(default = "default_password")]
    pub password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_ttl_seconds: default_token_ttl(),
            username: default_username(),
            password: default_password(),
        }
    }
}

fn default_token_ttl() -> i64 {
    3600
}

fn default_username() -> String {
    "admin".to_string()
}

fn default_password() -> String {
    "123456".to_string()
}

impl AuthConfig {
    /// Whether the login password is still the built-in default
    pub fn uses_default_password(&self) -> bool {
        self.password == default_password()
    }
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError {
        path: String,
        message: String,
    },
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

impl Config {
    /// Load configuration from file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// If the file exists but is invalid YAML, returns an error with details.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::ParseError {
                path: path.display().to_string(),
                message: format_yaml_error(&e),
            }
        })?;

        Ok(config)
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// Environment variables follow the pattern:
    /// - USERBASE_SERVER_HOST
    /// - USERBASE_SERVER_PORT
    /// - USERBASE_SERVER_CORS_ORIGIN
    /// - USERBASE_AUTH_JWT_SECRET
    /// - USERBASE_AUTH_TOKEN_TTL_SECONDS
    /// - USERBASE_AUTH_USERNAME
    /// - USERBASE_AUTH_PASSWORD
    pub fn load_with_env(path: &std::path::Path) -> anyhow::Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Check settings that have no safe default
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.jwt_secret()?;

        if !(1..=MAX_TOKEN_TTL_SECONDS).contains(&self.auth.token_ttl_seconds) {
            return Err(ConfigError::ValidationError(format!(
                "auth.token_ttl_seconds must be between 1 and {}",
                MAX_TOKEN_TTL_SECONDS
            )));
        }

        if self.auth.username.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "auth.username must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// The configured signing secret, or an error if unset or blank
    pub fn jwt_secret(&self) -> Result<&str, ConfigError> {
        self.auth
            .jwt_secret
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                ConfigError::ValidationError(
                    "auth.jwt_secret is not set (config.yml or USERBASE_AUTH_JWT_SECRET)"
                        .to_string(),
                )
            })
    }

    /// Socket address string to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(&mut self) {
        // Server configuration
        if let Ok(host) = std::env::var("USERBASE_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("USERBASE_SERVER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.port = port;
            }
        }
        if let Ok(cors_origin) = std::env::var("USERBASE_SERVER_CORS_ORIGIN") {
            self.server.cors_origin = cors_origin;
        }

        // Auth configuration
        if let Ok(secret) = std::env::var("USERBASE_AUTH_JWT_SECRET") {
            self.auth.jwt_secret = Some(secret);
        }
        if let Ok(ttl) = std::env::var("USERBASE_AUTH_TOKEN_TTL_SECONDS") {
            if let Ok(ttl) = ttl.parse::<i64>() {
                self.auth.token_ttl_seconds = ttl;
            }
        }
        if let Ok(username) = std::env::var("USERBASE_AUTH_USERNAME") {
            self.auth.username = username;
        }
        if let Ok(password) = std::env::var("USERBASE_AUTH_PASSWORD") {
            self.auth.password = password;
        }
    }
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Shared mutex for all config tests that modify environment variables.
#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
