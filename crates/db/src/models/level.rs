//! Level colour model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `level_colors` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct LevelColor {
    pub level: i64,
    pub color: String,
}
