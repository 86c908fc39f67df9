//! Application state
//!
//! Holds the shared state for the Axum application including
//! the service context, the database pool and configuration.

use std::sync::Arc;

use care_common::AppConfig;
use care_db::PgPool;
use care_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    /// Kept for readiness probes
    pool: PgPool,
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(service_context: ServiceContext, pool: PgPool, config: AppConfig) -> Self {
        Self {
            service_context: Arc::new(service_context),
            pool,
            config: Arc::new(config),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("config", &"AppConfig")
            .finish()
    }
}
