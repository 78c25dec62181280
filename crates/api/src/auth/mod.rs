//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`session`] -- Opaque session tokens and the `sid` cookie.

pub mod password;
pub mod session;
