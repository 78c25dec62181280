//! Handlers for login, logout and the current-session probe.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use wosmap_core::audit::{self, actions, entities};
use wosmap_core::error::CoreError;
use wosmap_db::models::audit::CreateAuditLog;
use wosmap_db::models::session::CreateSession;
use wosmap_db::models::user::UserResponse;
use wosmap_db::repositories::{AuditLogRepo, SessionRepo, UserRepo};

use crate::auth::password::password_matches;
use crate::auth::session::{
    generate_session_token, hash_session_token, removal_cookie, session_cookie, SESSION_COOKIE,
};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::{AuthUser, MaybeUser};
use crate::middleware::rate_limit::LoginAttempt;
use crate::middleware::rbac::RequireAuth;
use crate::response::MutationResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: UserResponse,
}

/// Body of `GET /api/me`; `user` is `null` when signed out.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: Option<UserResponse>,
}

impl From<AuthUser> for UserResponse {
    fn from(user: AuthUser) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            role: user.role,
        }
    }
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid credentials".into()))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/login
///
/// Verify credentials, open a session and set the `sid` cookie.
pub async fn login(
    _attempt: LoginAttempt,
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let Some(user) = UserRepo::find_by_username(&state.pool, &input.username).await? else {
        tracing::warn!(username = %input.username, "Login rejected: unknown user");
        return Err(invalid_credentials());
    };

    if !password_matches(&input.password, &user.password_hash) {
        tracing::warn!(username = %user.username, "Login rejected: wrong password");
        return Err(invalid_credentials());
    }

    let (token, token_hash) = generate_session_token();
    let expires_at = Utc::now() + chrono::Duration::days(state.config.session_ttl_days);

    let mut tx = state.pool.begin().await?;
    SessionRepo::create(
        &mut *tx,
        &CreateSession {
            user_id: user.id.clone(),
            token_hash,
            expires_at,
        },
    )
    .await?;
    AuditLogRepo::insert(
        &mut *tx,
        &CreateAuditLog::new(
            entities::SESSIONS,
            actions::LOGIN,
            Some(&user.id),
            &user.username,
            audit::signed_in(&user.username),
        ),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(user_id = %user.id, username = %user.username, "User signed in");

    let jar = jar.add(session_cookie(token, &state.config));
    let body = LoginResponse {
        success: true,
        user: UserResponse::from(&user),
    };
    Ok((jar, Json(body)))
}

/// POST /api/logout
///
/// End the current session and clear the cookie.
pub async fn logout(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<impl IntoResponse> {
    let mut tx = state.pool.begin().await?;
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        SessionRepo::delete_by_token_hash(&mut *tx, &hash_session_token(cookie.value()))
            .await?;
    }
    AuditLogRepo::insert(
        &mut *tx,
        &CreateAuditLog::new(
            entities::SESSIONS,
            actions::LOGOUT,
            Some(&user.id),
            &user.username,
            audit::signed_out(&user.username),
        ),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(user_id = %user.id, "User signed out");

    Ok((
        jar.remove(removal_cookie()),
        Json(MutationResponse::ok()),
    ))
}

/// GET /api/me
///
/// The signed-in user, or `null`.
pub async fn me(MaybeUser(user): MaybeUser) -> Json<MeResponse> {
    Json(MeResponse {
        user: user.map(UserResponse::from),
    })
}
