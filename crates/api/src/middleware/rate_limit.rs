//! In-process fixed-window limiter for login attempts.
//!
//! Each client key gets `max` attempts per window; the window starts with the
//! first attempt and resets once it has fully elapsed. State lives in memory,
//! so limits reset on restart and are not shared between instances.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use parking_lot::Mutex;

use crate::error::AppError;
use crate::state::AppState;

/// Key used when the client address cannot be determined.
const UNKNOWN_CLIENT: &str = "unknown";

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Counts login attempts per client key.
#[derive(Debug)]
pub struct LoginLimiter {
    max: u32,
    window: Duration,
    hits: Mutex<HashMap<String, Window>>,
}

impl LoginLimiter {
    pub fn new(max: u32, window: Duration) -> Self {
        Self {
            max,
            window,
            hits: Mutex::new(HashMap::new()),
        }
    }

    /// Record an attempt for `key`. On refusal returns the time left until
    /// the window resets.
    pub fn check(&self, key: &str) -> Result<(), Duration> {
        self.check_at(key, Instant::now())
    }

    pub fn check_at(&self, key: &str, now: Instant) -> Result<(), Duration> {
        let mut hits = self.hits.lock();
        let entry = hits.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        let elapsed = now.saturating_duration_since(entry.started);
        if elapsed >= self.window {
            *entry = Window {
                started: now,
                count: 0,
            };
        } else if entry.count >= self.max {
            return Err(self.window - elapsed);
        }

        entry.count += 1;
        Ok(())
    }

    /// Drop windows that have fully elapsed. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    pub fn purge_expired_at(&self, now: Instant) -> usize {
        let mut hits = self.hits.lock();
        let before = hits.len();
        hits.retain(|_, w| now.saturating_duration_since(w.started) < self.window);
        before - hits.len()
    }

    pub fn tracked_clients(&self) -> usize {
        self.hits.lock().len()
    }
}

/// The limiter key for a request.
///
/// Behind a trusted proxy this is the rightmost `X-Forwarded-For` hop, the
/// one the proxy appended; earlier hops are client-supplied and ignored.
/// Otherwise it is the peer address of the connection, or `unknown` when the
/// server runs without connection info.
pub fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>, trust_proxy: bool) -> String {
    let forwarded = trust_proxy
        .then(|| headers.get_all("x-forwarded-for").iter().last())
        .flatten()
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.rsplit(',').next())
        .map(str::trim)
        .filter(|hop| !hop.is_empty());

    match (forwarded, peer) {
        (Some(hop), _) => hop.to_string(),
        (None, Some(addr)) => addr.ip().to_string(),
        (None, None) => UNKNOWN_CLIENT.to_string(),
    }
}

/// Whole seconds until a refused client may retry, rounded up, at least 1.
fn retry_after_secs(remaining: Duration) -> u64 {
    let secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
    secs.max(1)
}

/// Extractor that charges one login attempt to the calling client.
///
/// Rejects with 429 and a `Retry-After` header once the client has used up
/// its window.
pub struct LoginAttempt;

impl FromRequestParts<AppState> for LoginAttempt {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        let key = client_key(&parts.headers, peer, state.config.trust_proxy);
        state.login_limiter.check(&key).map_err(|remaining| {
            tracing::warn!(client = %key, "Login rate limit exceeded");
            AppError::TooManyRequests {
                retry_after_secs: retry_after_secs(remaining),
            }
        })?;
        Ok(LoginAttempt)
    }
}
