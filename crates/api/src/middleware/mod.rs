//! Authentication, authorization and throttling extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the `sid` session cookie to a user.
//! - [`auth::MaybeUser`] -- Same, but anonymous requests pass through.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`rbac::RequireManager`] -- Requires `moderator` or `admin` role.
//! - [`rbac::RequireAuth`] -- Requires any signed-in user.
//! - [`rate_limit::LoginAttempt`] -- Counts a login attempt against the caller.

pub mod auth;
pub mod rate_limit;
pub mod rbac;
