//! Repository for the `audit_logs` table.

use chrono::Utc;
use sqlx::{SqliteExecutor, SqlitePool};

use crate::models::audit::{AuditLog, AuditQuery, CreateAuditLog};

/// Column list for `audit_logs` SELECT queries.
const COLUMNS: &str = "id, entity, action, entity_id, actor, details, timestamp";

/// Page size used when the caller does not ask for one.
pub const DEFAULT_LIMIT: i64 = 500;

/// Upper bound on a single page.
pub const MAX_LIMIT: i64 = 1000;

/// Provides insert and query operations for audit logs.
pub struct AuditLogRepo;

impl AuditLogRepo {
    /// Append one audit entry, stamped with the current time.
    ///
    /// Accepts a pool or an open transaction so the entry can commit
    /// together with the write it describes.
    pub async fn insert<'e, E: SqliteExecutor<'e>>(
        executor: E,
        entry: &CreateAuditLog,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO audit_logs (entity, action, entity_id, actor, details, timestamp)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&entry.entity)
        .bind(&entry.action)
        .bind(&entry.entity_id)
        .bind(&entry.actor)
        .bind(&entry.details)
        .bind(Utc::now())
        .execute(executor)
        .await?;
        Ok(())
    }

    /// List audit entries newest first, optionally filtered by entity.
    pub async fn list(pool: &SqlitePool, params: &AuditQuery) -> Result<Vec<AuditLog>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = params.offset.unwrap_or(0).max(0);

        let query = format!(
            "SELECT {COLUMNS} FROM audit_logs
             WHERE (?1 IS NULL OR entity = ?1)
             ORDER BY timestamp DESC, id DESC
             LIMIT ?2 OFFSET ?3"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(&params.entity)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
