//! Handlers for account management (moderator or admin).
//!
//! Moderators manage viewer and moderator accounts; only admins may create,
//! edit, delete or promote to admin.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use wosmap_core::audit::{self, actions, entities};
use wosmap_core::error::CoreError;
use wosmap_core::payloads::{Field, UserPayload};
use wosmap_core::roles::Role;
use wosmap_core::types::EntityId;
use wosmap_core::validation::validate_user;
use wosmap_db::models::audit::CreateAuditLog;
use wosmap_db::models::user::{CreateUser, UpdateUser, UserResponse};
use wosmap_db::repositories::{AuditLogRepo, UserRepo};

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireManager;
use crate::response::MutationResponse;
use crate::state::AppState;

fn not_found(id: EntityId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "User", id })
}

fn ensure_can_manage(actor: &AuthUser, target: Role) -> AppResult<()> {
    if actor.role.can_manage_role(target) {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "Only admins can manage admin accounts".into(),
        )))
    }
}

fn hash(password: &str) -> AppResult<String> {
    hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
}

/// GET /api/users
///
/// All accounts ordered by username, without password hashes.
pub async fn list_users(
    RequireManager(_actor): RequireManager,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let users: Vec<UserResponse> = UserRepo::list(&state.pool)
        .await?
        .iter()
        .map(UserResponse::from)
        .collect();
    Ok(Json(users))
}

/// POST /api/users
///
/// Create an account, or replace the one with the same id.
pub async fn create_user(
    RequireManager(actor): RequireManager,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UserPayload>,
) -> AppResult<impl IntoResponse> {
    let valid = validate_user(&payload, true)?;
    ensure_can_manage(&actor, valid.role)?;
    if let Some(existing) = UserRepo::find_by_id(&state.pool, &valid.id).await? {
        ensure_can_manage(&actor, existing.role())?;
    }

    let password = valid.password.as_deref().ok_or_else(|| {
        AppError::Core(CoreError::Validation("Invalid password (min 2 chars)".into()))
    })?;
    let password_hash = hash(password)?;

    let mut tx = state.pool.begin().await?;
    let user = UserRepo::upsert(
        &mut *tx,
        &CreateUser {
            id: valid.id.clone(),
            username: valid.username.clone(),
            password_hash,
            role: valid.role,
        },
    )
    .await?;
    AuditLogRepo::insert(
        &mut *tx,
        &CreateAuditLog::new(
            entities::USERS,
            actions::CREATE,
            Some(&user.id),
            &actor.username,
            audit::user_created(&actor.username, &user.username),
        ),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(user_id = %user.id, role = %user.role, by = %actor.username, "User saved");

    Ok(Json(MutationResponse::created(user.id)))
}

/// PUT /api/users/{id}
///
/// An omitted or empty password keeps the current one.
pub async fn update_user(
    RequireManager(actor): RequireManager,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    AppJson(mut payload): AppJson<UserPayload>,
) -> AppResult<impl IntoResponse> {
    payload.id = Field::Present(id.clone());
    let valid = validate_user(&payload, false)?;

    let existing = UserRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| not_found(id.clone()))?;
    ensure_can_manage(&actor, existing.role())?;
    ensure_can_manage(&actor, valid.role)?;

    let password_hash = valid.password.as_deref().map(hash).transpose()?;

    let mut tx = state.pool.begin().await?;
    let user = UserRepo::update(
        &mut *tx,
        &id,
        &UpdateUser {
            username: valid.username,
            password_hash,
            role: valid.role,
        },
    )
    .await?
    .ok_or_else(|| not_found(id.clone()))?;
    AuditLogRepo::insert(
        &mut *tx,
        &CreateAuditLog::new(
            entities::USERS,
            actions::UPDATE,
            Some(&id),
            &actor.username,
            audit::user_updated(&actor.username, &user.username),
        ),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(user_id = %id, role = %user.role, by = %actor.username, "User updated");

    Ok(Json(MutationResponse::ok()))
}

/// DELETE /api/users/{id}
///
/// Also ends the user's sessions. Deleting your own account is refused.
pub async fn delete_user(
    RequireManager(actor): RequireManager,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    if id == actor.id {
        return Err(AppError::BadRequest("Cannot delete your own account".into()));
    }

    let existing = UserRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| not_found(id.clone()))?;
    ensure_can_manage(&actor, existing.role())?;

    let mut tx = state.pool.begin().await?;
    if !UserRepo::delete(&mut *tx, &id).await? {
        return Err(not_found(id));
    }
    AuditLogRepo::insert(
        &mut *tx,
        &CreateAuditLog::new(
            entities::USERS,
            actions::DELETE,
            Some(&id),
            &actor.username,
            audit::user_deleted(&actor.username, &existing.username),
        ),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(user_id = %id, by = %actor.username, "User deleted");

    Ok(Json(MutationResponse::ok()))
}
