//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub stripe: StripeConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub storage: StorageConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Directory holding the SQL migrations applied at startup
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,
}

/// Payment provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StripeConfig {
    /// Signing secret used to verify webhook deliveries
    pub webhook_secret: String,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// File storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    #[serde(default = "default_max_file_size")]
    pub max_file_size_mb: u32,
    /// Base URL uploaded files are served under
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl StorageConfig {
    #[must_use]
    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb as usize * 1024 * 1024
    }
}

// Default value functions
fn default_app_name() -> String {
    "care-server".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_migrations_dir() -> String {
    "./migrations".to_string()
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_upload_dir() -> String {
    "./uploads".to_string()
}

fn default_max_file_size() -> u32 {
    10
}

fn default_public_base_url() -> String {
    "http://127.0.0.1:5000/uploads".to_string()
}

/// Parse an optional variable, falling back to `default` when unset.
/// A set but unparsable value is an error rather than silently ignored.
fn parse_or<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(default),
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingVar(key))
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = match lookup("APP_ENV") {
            Some(raw) => Environment::parse(&raw).ok_or(ConfigError::InvalidValue("APP_ENV", raw))?,
            None => default_env(),
        };

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            api: ServerConfig {
                host: lookup("API_HOST").unwrap_or_else(default_host),
                port: parse_or(&lookup, "API_PORT", default_port())?,
            },
            database: DatabaseConfig {
                url: required(&lookup, "DATABASE_URL")?,
                max_connections: parse_or(
                    &lookup,
                    "DATABASE_MAX_CONNECTIONS",
                    default_max_connections(),
                )?,
                min_connections: parse_or(
                    &lookup,
                    "DATABASE_MIN_CONNECTIONS",
                    default_min_connections(),
                )?,
                migrations_dir: lookup("MIGRATIONS_DIR").unwrap_or_else(default_migrations_dir),
            },
            stripe: StripeConfig {
                webhook_secret: required(&lookup, "STRIPE_WEBHOOK_SECRET")?,
            },
            rate_limit: RateLimitConfig {
                requests_per_second: parse_or(
                    &lookup,
                    "RATE_LIMIT_REQUESTS_PER_SECOND",
                    default_requests_per_second(),
                )?,
                burst: parse_or(&lookup, "RATE_LIMIT_BURST", default_burst())?,
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            storage: StorageConfig {
                upload_dir: lookup("UPLOAD_DIR").unwrap_or_else(default_upload_dir),
                max_file_size_mb: parse_or(&lookup, "MAX_FILE_SIZE_MB", default_max_file_size())?,
                public_base_url: lookup("PUBLIC_BASE_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or_else(default_public_base_url),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: &[(&str, &str)] = &[
        ("DATABASE_URL", "postgres://localhost/care"),
        ("STRIPE_WEBHOOK_SECRET", "whsec_test"),
    ];

    #[test]
    fn test_environment_is_production() {
        assert!(!Environment::Development.is_production());
        assert!(!Environment::Staging.is_production());
        assert!(Environment::Production.is_production());
    }

    #[test]
    fn test_environment_is_development() {
        assert!(Environment::Development.is_development());
        assert!(!Environment::Staging.is_development());
        assert!(!Environment::Production.is_development());
    }

    #[test]
    fn test_server_address() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
        };
        assert_eq!(config.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_defaults_applied() {
        let config = AppConfig::from_lookup(lookup_from(REQUIRED)).unwrap();
        assert_eq!(config.app.name, "care-server");
        assert_eq!(config.app.env, Environment::Development);
        assert_eq!(config.api.port, 5000);
        assert_eq!(config.database.max_connections, 20);
        assert_eq!(config.database.migrations_dir, "./migrations");
        assert_eq!(config.storage.max_file_size_bytes(), 10 * 1024 * 1024);
        assert!(config.cors.allowed_origins.is_empty());
    }

    #[test]
    fn test_missing_required_var() {
        let err = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://x")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("STRIPE_WEBHOOK_SECRET")));
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("API_PORT", "eighty"));
        let err = AppConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("API_PORT", _)));
    }

    #[test]
    fn test_overrides() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("APP_ENV", "Production"),
            ("API_PORT", "8080"),
            ("CORS_ALLOWED_ORIGINS", "http://a.test, http://b.test,"),
            ("PUBLIC_BASE_URL", "https://cdn.test/files/"),
        ]);
        let config = AppConfig::from_lookup(lookup_from(&pairs)).unwrap();
        assert!(config.app.env.is_production());
        assert_eq!(config.api.port, 8080);
        assert_eq!(
            config.cors.allowed_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert_eq!(config.storage.public_base_url, "https://cdn.test/files");
    }
}
