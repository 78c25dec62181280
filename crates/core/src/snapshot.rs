//! Snapshot ETag computation and `If-None-Match` evaluation.
//!
//! The board is polled by clients; the snapshot endpoint hashes the
//! serialized cities and traps and answers `304 Not Modified` when the
//! client already holds that exact state.

use serde::Serialize;

use crate::hashing::sha256_hex;

/// Version tag written into export documents and required on v2 imports.
pub const SNAPSHOT_FORMAT_VERSION: i64 = 2;

/// Compute the opaque ETag (bare hex digest) for a serializable board state.
pub fn compute_etag<T: Serialize>(state: &T) -> Result<String, serde_json::Error> {
    let bytes = serde_json::to_vec(state)?;
    Ok(sha256_hex(&bytes))
}

/// Render a bare digest as a strong entity tag header value.
pub fn quote_etag(etag: &str) -> String {
    format!("\"{etag}\"")
}

/// Whether an `If-None-Match` header value matches the current ETag.
///
/// Accepts `*`, comma-separated lists, quoted or bare tags, and weak
/// validators (`W/"..."`), which compare equal under weak comparison.
pub fn etag_matches(if_none_match: &str, etag: &str) -> bool {
    if_none_match.split(',').map(str::trim).any(|candidate| {
        if candidate == "*" {
            return true;
        }
        let candidate = candidate.strip_prefix("W/").unwrap_or(candidate);
        let candidate = candidate
            .strip_prefix('"')
            .and_then(|c| c.strip_suffix('"'))
            .unwrap_or(candidate);
        !candidate.is_empty() && candidate == etag
    })
}
