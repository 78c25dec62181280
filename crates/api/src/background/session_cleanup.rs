//! Periodic purge of expired login sessions and stale rate-limit windows.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use wosmap_db::repositories::SessionRepo;
use wosmap_db::DbPool;

use crate::middleware::rate_limit::LoginLimiter;

/// How often the cleanup job runs.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(3600);

/// Run the cleanup loop until `cancel` is triggered.
pub async fn run(pool: DbPool, limiter: Arc<LoginLimiter>, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = CLEANUP_INTERVAL.as_secs(),
        "Session cleanup job started"
    );

    let mut interval = tokio::time::interval(CLEANUP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Session cleanup job stopping");
                break;
            }
            _ = interval.tick() => {
                match SessionRepo::cleanup_expired(&pool).await {
                    Ok(deleted) if deleted > 0 => {
                        tracing::info!(deleted, "Session cleanup: purged expired sessions");
                    }
                    Ok(_) => tracing::debug!("Session cleanup: no expired sessions"),
                    Err(e) => tracing::error!(error = %e, "Session cleanup failed"),
                }

                let purged = limiter.purge_expired();
                if purged > 0 {
                    tracing::debug!(purged, "Session cleanup: dropped stale login windows");
                }
            }
        }
    }
}
