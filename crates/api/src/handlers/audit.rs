//! Handler for reading the audit trail.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use wosmap_db::models::audit::AuditQuery;
use wosmap_db::repositories::AuditLogRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// GET /api/audit
///
/// Newest entries first. Optional `entity`, `limit` and `offset` query
/// parameters.
pub async fn list_audit_logs(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<AuditQuery>,
) -> AppResult<impl IntoResponse> {
    let logs = AuditLogRepo::list(&state.pool, &params).await?;
    Ok(Json(logs))
}
