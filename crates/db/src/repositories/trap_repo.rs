//! Repository for the `traps` table.

use sqlx::{SqliteExecutor, SqlitePool};

use crate::models::trap::Trap;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, slot, x, y, color, notes";

/// Provides CRUD operations for bear traps.
pub struct TrapRepo;

impl TrapRepo {
    /// List all traps ordered by slot.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Trap>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM traps ORDER BY slot");
        sqlx::query_as::<_, Trap>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Trap>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM traps WHERE id = ?");
        sqlx::query_as::<_, Trap>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The trap occupying `slot`, if any.
    pub async fn find_by_slot(pool: &SqlitePool, slot: i64) -> Result<Option<Trap>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM traps WHERE slot = ?");
        sqlx::query_as::<_, Trap>(&query)
            .bind(slot)
            .fetch_optional(pool)
            .await
    }

    /// Insert a trap, replacing any row that shares its id or its slot.
    pub async fn replace<'e, E: SqliteExecutor<'e>>(
        executor: E,
        trap: &Trap,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT OR REPLACE INTO traps (id, slot, x, y, color, notes)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&trap.id)
        .bind(trap.slot)
        .bind(trap.x)
        .bind(trap.y)
        .bind(&trap.color)
        .bind(&trap.notes)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Insert a trap without displacing others; a taken slot is a unique
    /// violation.
    pub async fn insert<'e, E: SqliteExecutor<'e>>(
        executor: E,
        trap: &Trap,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO traps (id, slot, x, y, color, notes)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&trap.id)
        .bind(trap.slot)
        .bind(trap.x)
        .bind(trap.y)
        .bind(&trap.color)
        .bind(&trap.notes)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Overwrite an existing trap. Returns `false` if no row has its id.
    ///
    /// Moving to a slot held by another trap fails with a unique violation.
    pub async fn update<'e, E: SqliteExecutor<'e>>(
        executor: E,
        trap: &Trap,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE traps SET slot = ?, x = ?, y = ?, color = ?, notes = ? WHERE id = ?",
        )
        .bind(trap.slot)
        .bind(trap.x)
        .bind(trap.y)
        .bind(&trap.color)
        .bind(&trap.notes)
        .bind(&trap.id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a trap. Returns `true` if a row was removed.
    pub async fn delete<'e, E: SqliteExecutor<'e>>(
        executor: E,
        id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM traps WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_all<'e, E: SqliteExecutor<'e>>(executor: E) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM traps").execute(executor).await?;
        Ok(result.rows_affected())
    }
}
