//! Repository for the `sessions` table.

use chrono::Utc;
use sqlx::{SqliteExecutor, SqlitePool};

use crate::models::session::{CreateSession, Session};
use crate::models::user::User;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, token_hash, user_id, expires_at, created_at";

/// Provides lifecycle operations for login sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session, returning the created row.
    pub async fn create<'e, E: SqliteExecutor<'e>>(
        executor: E,
        input: &CreateSession,
    ) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (token_hash, user_id, expires_at, created_at)
             VALUES (?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(&input.token_hash)
            .bind(&input.user_id)
            .bind(input.expires_at.timestamp())
            .bind(Utc::now())
            .fetch_one(executor)
            .await
    }

    /// Resolve an unexpired session's token hash to its user.
    pub async fn find_active_user(
        pool: &SqlitePool,
        token_hash: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT u.id, u.username, u.password_hash, u.role
             FROM sessions s
             JOIN users u ON u.id = s.user_id
             WHERE s.token_hash = ? AND s.expires_at > ?",
        )
        .bind(token_hash)
        .bind(Utc::now().timestamp())
        .fetch_optional(pool)
        .await
    }

    /// Delete a session by token hash. Returns `true` if a row was removed.
    pub async fn delete_by_token_hash<'e, E: SqliteExecutor<'e>>(
        executor: E,
        token_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE token_hash = ?")
            .bind(token_hash)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete expired sessions. Returns the count of deleted rows.
    pub async fn cleanup_expired(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(Utc::now().timestamp())
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
