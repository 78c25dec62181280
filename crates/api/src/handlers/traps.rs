//! Handlers for the `/traps` resource. Writes are admin-only.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use wosmap_core::audit::{self, actions, entities};
use wosmap_core::error::CoreError;
use wosmap_core::payloads::{Field, TrapPayload};
use wosmap_core::types::EntityId;
use wosmap_core::validation::validate_trap;
use wosmap_db::models::audit::CreateAuditLog;
use wosmap_db::models::trap::Trap;
use wosmap_db::repositories::{AuditLogRepo, TrapRepo};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::rbac::RequireAdmin;
use crate::response::MutationResponse;
use crate::state::AppState;

fn not_found(id: EntityId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Trap", id })
}

/// GET /api/traps
pub async fn list_traps(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let traps = TrapRepo::list(&state.pool).await?;
    Ok(Json(traps))
}

/// POST /api/traps
///
/// Create a trap. A trap already holding the same id or slot is replaced,
/// so each slot keeps at most one trap.
pub async fn create_trap(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(payload): AppJson<TrapPayload>,
) -> AppResult<impl IntoResponse> {
    let trap = Trap::from(validate_trap(&payload)?);

    let mut tx = state.pool.begin().await?;
    TrapRepo::replace(&mut *tx, &trap).await?;
    AuditLogRepo::insert(
        &mut *tx,
        &CreateAuditLog::new(
            entities::TRAPS,
            actions::CREATE,
            Some(&trap.id),
            &admin.username,
            audit::trap_created(&admin.username, trap.x, trap.y, trap.slot),
        ),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(trap_id = %trap.id, slot = trap.slot, user = %admin.username, "Trap saved");

    Ok(Json(MutationResponse::created(trap.id)))
}

/// PUT /api/traps/{id}
///
/// Moving a trap into a slot held by another trap is a 409.
pub async fn update_trap(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    AppJson(mut payload): AppJson<TrapPayload>,
) -> AppResult<impl IntoResponse> {
    payload.id = Field::Present(id.clone());
    let trap = Trap::from(validate_trap(&payload)?);

    if TrapRepo::find_by_id(&state.pool, &id).await?.is_none() {
        return Err(not_found(id));
    }
    if let Some(holder) = TrapRepo::find_by_slot(&state.pool, trap.slot).await? {
        if holder.id != id {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Slot {} is already taken",
                trap.slot
            ))));
        }
    }

    let mut tx = state.pool.begin().await?;
    if !TrapRepo::update(&mut *tx, &trap).await? {
        return Err(not_found(id));
    }
    AuditLogRepo::insert(
        &mut *tx,
        &CreateAuditLog::new(
            entities::TRAPS,
            actions::UPDATE,
            Some(&id),
            &admin.username,
            audit::trap_updated(&admin.username, trap.x, trap.y, trap.slot),
        ),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(trap_id = %id, slot = trap.slot, user = %admin.username, "Trap updated");

    Ok(Json(MutationResponse::ok()))
}

/// DELETE /api/traps/{id}
pub async fn delete_trap(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let existing = TrapRepo::find_by_id(&state.pool, &id).await?;
    let details = audit::trap_deleted(
        &admin.username,
        existing.as_ref().map(|t| (t.x, t.y, t.slot)),
    );

    let mut tx = state.pool.begin().await?;
    if !TrapRepo::delete(&mut *tx, &id).await? {
        return Err(not_found(id));
    }
    AuditLogRepo::insert(
        &mut *tx,
        &CreateAuditLog::new(entities::TRAPS, actions::DELETE, Some(&id), &admin.username, details),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(trap_id = %id, user = %admin.username, "Trap deleted");

    Ok(Json(MutationResponse::ok()))
}
