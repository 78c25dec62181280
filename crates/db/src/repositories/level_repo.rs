//! Repository for the `level_colors` table.

use sqlx::SqlitePool;

use crate::models::audit::CreateAuditLog;
use crate::models::level::LevelColor;
use crate::repositories::{AuditLogRepo, CityRepo};

pub struct LevelColorRepo;

impl LevelColorRepo {
    /// List all level colours ordered by level.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<LevelColor>, sqlx::Error> {
        sqlx::query_as::<_, LevelColor>("SELECT level, color FROM level_colors ORDER BY level")
            .fetch_all(pool)
            .await
    }

    /// Colour assigned to `level`, if any.
    pub async fn color_for(pool: &SqlitePool, level: i64) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT color FROM level_colors WHERE level = ?")
            .bind(level)
            .fetch_optional(pool)
            .await
    }

    /// Set a level's colour, recolour every city of that level and record
    /// the audit entry, all in one transaction.
    ///
    /// Returns the number of recoloured cities.
    pub async fn set(
        pool: &SqlitePool,
        level: i64,
        color: &str,
        audit: &CreateAuditLog,
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "INSERT INTO level_colors (level, color) VALUES (?, ?)
             ON CONFLICT (level) DO UPDATE SET color = excluded.color",
        )
        .bind(level)
        .bind(color)
        .execute(&mut *tx)
        .await?;

        let recolored = CityRepo::recolor_level(&mut *tx, level, color).await?;
        AuditLogRepo::insert(&mut *tx, audit).await?;

        tx.commit().await?;
        Ok(recolored)
    }
}
