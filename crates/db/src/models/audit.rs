//! Audit log entity model and DTOs.
//!
//! Audit rows are immutable once written and have no `updated_at`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use wosmap_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Audit log entity
// ---------------------------------------------------------------------------

/// A single audit log entry.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditLog {
    pub id: DbId,
    pub entity: String,
    pub action: String,
    pub entity_id: Option<String>,
    /// Username of the acting session.
    #[serde(rename = "user")]
    pub actor: Option<String>,
    pub details: Option<String>,
    pub timestamp: Timestamp,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CreateAuditLog {
    pub entity: String,
    pub action: String,
    pub entity_id: Option<String>,
    pub actor: String,
    pub details: String,
}

impl CreateAuditLog {
    pub fn new(
        entity: &str,
        action: &str,
        entity_id: Option<&str>,
        actor: &str,
        details: String,
    ) -> Self {
        Self {
            entity: entity.to_string(),
            action: action.to_string(),
            entity_id: entity_id.map(str::to_string),
            actor: actor.to_string(),
            details,
        }
    }
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Filter parameters for listing audit logs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditQuery {
    pub entity: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
