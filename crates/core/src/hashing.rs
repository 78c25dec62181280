//! SHA-256 digests rendered as lowercase hex.
//!
//! Snapshot ETags and stored session tokens both go through [`sha256_hex`],
//! so a token or board state always hashes to the same 64-character string.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `data`.
pub fn sha256_hex(data: impl AsRef<[u8]>) -> String {
    format!("{:x}", Sha256::digest(data.as_ref()))
}
