//! User entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use wosmap_core::roles::Role;
use wosmap_core::types::EntityId;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: EntityId,
    pub username: String,
    pub password_hash: String,
    pub role: String,
}

impl User {
    /// Parsed role. An unrecognised value degrades to the least privileged role.
    pub fn role(&self) -> Role {
        self.role.parse().unwrap_or(Role::Viewer)
    }
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponse {
    pub id: EntityId,
    pub username: String,
    pub role: Role,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            role: user.role(),
        }
    }
}

/// DTO for inserting a user, or replacing one with the same id.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub id: EntityId,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

/// DTO for updating a user. A `password_hash` of `None` keeps the stored one.
#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub username: String,
    pub password_hash: Option<String>,
    pub role: Role,
}
