use std::sync::Arc;
use std::time::Duration;

use crate::config::ServerConfig;
use crate::middleware::rate_limit::LoginLimiter;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: wosmap_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Per-client login attempt counter.
    pub login_limiter: Arc<LoginLimiter>,
}

impl AppState {
    pub fn new(pool: wosmap_db::DbPool, config: ServerConfig) -> Self {
        let login_limiter = LoginLimiter::new(
            config.login_rate_limit_max,
            Duration::from_secs(config.login_rate_limit_window_secs),
        );
        Self {
            pool,
            config: Arc::new(config),
            login_limiter: Arc::new(login_limiter),
        }
    }
}
