//! Repository for the `cities` table.

use sqlx::{SqliteExecutor, SqlitePool};

use crate::models::city::City;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, level, status, x, y, px, py, notes, color";

/// Provides CRUD operations for cities.
pub struct CityRepo;

impl CityRepo {
    /// List all cities ordered by name.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<City>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cities ORDER BY name, id");
        sqlx::query_as::<_, City>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<City>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cities WHERE id = ?");
        sqlx::query_as::<_, City>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a city, replacing every field of an existing row with the same id.
    pub async fn upsert<'e, E: SqliteExecutor<'e>>(
        executor: E,
        city: &City,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO cities (id, name, level, status, x, y, px, py, notes, color)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT (id) DO UPDATE SET
                name = excluded.name,
                level = excluded.level,
                status = excluded.status,
                x = excluded.x,
                y = excluded.y,
                px = excluded.px,
                py = excluded.py,
                notes = excluded.notes,
                color = excluded.color",
        )
        .bind(&city.id)
        .bind(&city.name)
        .bind(city.level)
        .bind(&city.status)
        .bind(city.x)
        .bind(city.y)
        .bind(city.px)
        .bind(city.py)
        .bind(&city.notes)
        .bind(&city.color)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Insert a city; an existing id is a unique violation.
    pub async fn insert<'e, E: SqliteExecutor<'e>>(
        executor: E,
        city: &City,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO cities (id, name, level, status, x, y, px, py, notes, color)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&city.id)
        .bind(&city.name)
        .bind(city.level)
        .bind(&city.status)
        .bind(city.x)
        .bind(city.y)
        .bind(city.px)
        .bind(city.py)
        .bind(&city.notes)
        .bind(&city.color)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Overwrite an existing city. Returns `false` if no row has its id.
    pub async fn update<'e, E: SqliteExecutor<'e>>(
        executor: E,
        city: &City,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE cities SET
                name = ?, level = ?, status = ?, x = ?, y = ?,
                px = ?, py = ?, notes = ?, color = ?
             WHERE id = ?",
        )
        .bind(&city.name)
        .bind(city.level)
        .bind(&city.status)
        .bind(city.x)
        .bind(city.y)
        .bind(city.px)
        .bind(city.py)
        .bind(&city.notes)
        .bind(&city.color)
        .bind(&city.id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Apply a level's colour to every city of that level. Returns the count
    /// of recoloured rows.
    pub async fn recolor_level<'e, E: SqliteExecutor<'e>>(
        executor: E,
        level: i64,
        color: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE cities SET color = ? WHERE level = ?")
            .bind(color)
            .bind(level)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete a city. Returns `true` if a row was removed.
    pub async fn delete<'e, E: SqliteExecutor<'e>>(
        executor: E,
        id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cities WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_all<'e, E: SqliteExecutor<'e>>(executor: E) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cities").execute(executor).await?;
        Ok(result.rows_affected())
    }
}
