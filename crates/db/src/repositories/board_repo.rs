//! Whole-board operations spanning the `cities` and `traps` tables.

use sqlx::SqlitePool;

use crate::models::audit::CreateAuditLog;
use crate::models::city::City;
use crate::models::trap::Trap;
use crate::repositories::{AuditLogRepo, CityRepo, TrapRepo};

pub struct BoardRepo;

impl BoardRepo {
    /// Replace every city and trap with the given rows and record the audit
    /// entry, in one transaction. Nothing changes if any insert fails.
    pub async fn replace_all(
        pool: &SqlitePool,
        cities: &[City],
        traps: &[Trap],
        audit: &CreateAuditLog,
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        CityRepo::delete_all(&mut *tx).await?;
        TrapRepo::delete_all(&mut *tx).await?;

        // Plain inserts: duplicate ids or slots within the document abort
        // the whole import.
        for city in cities {
            CityRepo::insert(&mut *tx, city).await?;
        }
        for trap in traps {
            TrapRepo::insert(&mut *tx, trap).await?;
        }

        AuditLogRepo::insert(&mut *tx, audit).await?;

        tx.commit().await?;
        tracing::info!(
            cities = cities.len(),
            traps = traps.len(),
            "Board contents replaced"
        );
        Ok(())
    }
}
