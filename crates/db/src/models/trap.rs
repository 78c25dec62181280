//! Bear trap row model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use wosmap_core::grid::TrapFootprint;
use wosmap_core::types::EntityId;
use wosmap_core::validation::ValidTrap;

/// A row from the `traps` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Trap {
    pub id: EntityId,
    pub slot: i64,
    pub x: i64,
    pub y: i64,
    pub color: String,
    pub notes: Option<String>,
}

impl Trap {
    pub fn footprint(&self) -> TrapFootprint {
        TrapFootprint::new(self.x, self.y)
    }
}

impl From<ValidTrap> for Trap {
    fn from(trap: ValidTrap) -> Self {
        Self {
            id: trap.id,
            slot: trap.slot,
            x: trap.x,
            y: trap.y,
            color: trap.color,
            notes: trap.notes,
        }
    }
}
