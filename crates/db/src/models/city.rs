//! City row model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use wosmap_core::audit::CityState;
use wosmap_core::payloads::CityStatus;
use wosmap_core::types::EntityId;
use wosmap_core::validation::ValidCity;

/// A row from the `cities` table, serialized as-is into list, snapshot and
/// export responses.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct City {
    pub id: EntityId,
    pub name: String,
    pub level: Option<i64>,
    pub status: String,
    pub x: i64,
    pub y: i64,
    pub px: Option<f64>,
    pub py: Option<f64>,
    pub notes: Option<String>,
    pub color: String,
}

impl City {
    /// Build the row for a validated city with its resolved colour.
    pub fn from_valid(city: ValidCity, color: String) -> Self {
        Self {
            id: city.id,
            name: city.name,
            level: city.level,
            status: city.status.as_str().to_string(),
            x: city.x,
            y: city.y,
            px: city.px,
            py: city.py,
            notes: city.notes,
            color,
        }
    }

    /// The fields compared when summarizing an edit.
    pub fn audit_state(&self) -> CityState {
        CityState {
            name: self.name.clone(),
            level: self.level,
            // The column CHECK admits only the two known statuses.
            status: self.status.parse().unwrap_or(CityStatus::Occupied),
            x: self.x,
            y: self.y,
            px: self.px,
            py: self.py,
        }
    }
}
