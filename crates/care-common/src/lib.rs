//! # care-common
//!
//! Shared utilities: configuration, error handling, password hashing,
//! local file storage and telemetry.

pub mod config;
pub mod error;
pub mod password;
pub mod storage;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    RateLimitConfig, ServerConfig, StorageConfig, StripeConfig,
};
pub use error::AppError;
pub use password::{hash_password, PasswordService};
pub use storage::LocalFileStorage;
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
