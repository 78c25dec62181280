//! Login session model and DTOs.

use sqlx::FromRow;
use wosmap_core::types::{DbId, EntityId, Timestamp};

/// A row from the `sessions` table.
///
/// `expires_at` is unix seconds so expiry checks are plain integer
/// comparisons in SQL.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub token_hash: String,
    pub user_id: EntityId,
    pub expires_at: i64,
    pub created_at: Timestamp,
}

/// DTO for creating a new session.
pub struct CreateSession {
    pub user_id: EntityId,
    pub token_hash: String,
    pub expires_at: Timestamp,
}
