//! Opaque session tokens and the cookie that carries them.
//!
//! The browser holds a random token in the `sid` cookie; the sessions table
//! stores only its SHA-256 hash.

use axum_extra::extract::cookie::{Cookie, SameSite};
use uuid::Uuid;
use wosmap_core::hashing::sha256_hex;

use crate::config::ServerConfig;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "sid";

/// Generate a new session token.
///
/// Returns `(plaintext, sha256_hex_hash)`. The plaintext goes to the client;
/// only the hash is persisted.
pub fn generate_session_token() -> (String, String) {
    let plaintext = Uuid::new_v4().to_string();
    let hash = hash_session_token(&plaintext);
    (plaintext, hash)
}

/// Compute the SHA-256 hex digest of a session token.
pub fn hash_session_token(token: &str) -> String {
    sha256_hex(token.as_bytes())
}

/// The cookie set on successful login.
pub fn session_cookie(token: String, config: &ServerConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookies)
        .max_age(time::Duration::days(config.session_ttl_days))
        .build()
}

/// A cookie matching the session cookie's name and path, for removal.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}
