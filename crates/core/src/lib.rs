//! Domain logic for the alliance coordination board.
//!
//! Pure types and rules with no I/O: board geometry, payload validation,
//! roles, audit vocabulary, and snapshot tagging.

pub mod audit;
pub mod error;
pub mod grid;
pub mod hashing;
pub mod payloads;
pub mod roles;
pub mod snapshot;
pub mod types;
pub mod validation;
