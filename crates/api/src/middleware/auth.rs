//! Session-cookie authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use wosmap_core::error::CoreError;
use wosmap_core::roles::Role;
use wosmap_core::types::EntityId;
use wosmap_db::repositories::SessionRepo;

use crate::auth::session::{hash_session_token, SESSION_COOKIE};
use crate::error::AppError;
use crate::state::AppState;

/// Signed-in user resolved from the `sid` cookie.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: EntityId,
    pub username: String,
    pub role: Role,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Authentication required".into()))
            })?;

        let user = SessionRepo::find_active_user(&state.pool, &hash_session_token(token))
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Invalid or expired session".into(),
                ))
            })?;

        Ok(AuthUser {
            role: user.role(),
            id: user.id,
            username: user.username,
        })
    }
}

/// The signed-in user if there is one. Anonymous requests are not rejected.
///
/// Store errors still surface as 500.
pub struct MaybeUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match AuthUser::from_request_parts(parts, state).await {
            Ok(user) => Ok(MaybeUser(Some(user))),
            Err(AppError::Core(CoreError::Unauthorized(_))) => Ok(MaybeUser(None)),
            Err(e) => Err(e),
        }
    }
}
