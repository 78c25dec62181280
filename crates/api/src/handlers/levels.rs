//! Handlers for level colours.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use wosmap_core::audit::{self, actions, entities};
use wosmap_core::payloads::LevelColorPayload;
use wosmap_core::validation::validate_level_color;
use wosmap_db::models::audit::CreateAuditLog;
use wosmap_db::repositories::LevelColorRepo;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::rbac::RequireAdmin;
use crate::response::MutationResponse;
use crate::state::AppState;

/// GET /api/levels
pub async fn list_levels(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let levels = LevelColorRepo::list(&state.pool).await?;
    Ok(Json(levels))
}

/// POST /api/levels
///
/// Set a level's colour and repaint every city of that level.
pub async fn set_level_color(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(payload): AppJson<LevelColorPayload>,
) -> AppResult<impl IntoResponse> {
    let (level, color) = validate_level_color(&payload)?;

    let entry = CreateAuditLog::new(
        entities::LEVEL_COLORS,
        actions::UPDATE,
        Some(&level.to_string()),
        &admin.username,
        audit::level_color_set(&admin.username, level, &color),
    );
    let recolored = LevelColorRepo::set(&state.pool, level, &color, &entry).await?;

    tracing::info!(level, color = %color, recolored, user = %admin.username, "Level colour set");

    Ok(Json(MutationResponse::ok()))
}
