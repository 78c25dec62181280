//! Role gates for handlers.
//!
//! No session is a 401 (from [`AuthUser`]); a session whose role falls short
//! is a 403 carrying the gate's message.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use wosmap_core::error::CoreError;
use wosmap_core::roles::Role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Resolve the session user and check their role against `allowed`.
async fn authorize(
    parts: &mut Parts,
    state: &AppState,
    allowed: fn(Role) -> bool,
    denied: &str,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if allowed(user.role) {
        Ok(user)
    } else {
        tracing::debug!(user = %user.username, role = %user.role, "Role check failed");
        Err(AppError::Core(CoreError::Forbidden(denied.to_string())))
    }
}

/// Trap and level-colour writes, the levels page.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        authorize(parts, state, Role::is_admin, "Admin role required")
            .await
            .map(RequireAdmin)
    }
}

/// Account management and bulk import: moderators and admins.
pub struct RequireManager(pub AuthUser);

impl FromRequestParts<AppState> for RequireManager {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        authorize(
            parts,
            state,
            Role::can_manage_users,
            "Moderator or Admin role required",
        )
        .await
        .map(RequireManager)
    }
}

/// Any signed-in user.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        AuthUser::from_request_parts(parts, state).await.map(RequireAuth)
    }
}
