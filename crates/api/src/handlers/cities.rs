//! Handlers for the `/cities` resource.
//!
//! Any signed-in user may place, edit and remove cities. A city may not sit
//! inside a bear trap's footprint.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use sqlx::SqlitePool;
use wosmap_core::audit::{self, actions, entities};
use wosmap_core::error::CoreError;
use wosmap_core::grid::{self, TrapFootprint};
use wosmap_core::payloads::{CityPayload, Field};
use wosmap_core::types::EntityId;
use wosmap_core::validation::validate_city;
use wosmap_db::models::audit::CreateAuditLog;
use wosmap_db::models::city::City;
use wosmap_db::models::trap::Trap;
use wosmap_db::repositories::{AuditLogRepo, CityRepo, LevelColorRepo, TrapRepo};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::rbac::RequireAuth;
use crate::response::MutationResponse;
use crate::state::AppState;

fn not_found(id: EntityId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "City", id })
}

/// Reject a tile covered by any bear trap.
async fn ensure_clear_of_traps(pool: &SqlitePool, x: i64, y: i64) -> AppResult<()> {
    let footprints: Vec<TrapFootprint> = TrapRepo::list(pool)
        .await?
        .iter()
        .map(Trap::footprint)
        .collect();
    if grid::any_trap_contains(&footprints, x, y) {
        return Err(AppError::Core(CoreError::Validation(
            "Cannot place a city on a bear trap area".into(),
        )));
    }
    Ok(())
}

/// Validate a payload and build the row to store, resolving its colour.
async fn city_from_payload(pool: &SqlitePool, payload: &CityPayload) -> AppResult<City> {
    let valid = validate_city(payload)?;
    ensure_clear_of_traps(pool, valid.x, valid.y).await?;

    let level_color = match valid.level {
        Some(level) => LevelColorRepo::color_for(pool, level).await?,
        None => None,
    };
    let color = valid.resolved_color(level_color.as_deref());
    Ok(City::from_valid(valid, color))
}

/// GET /api/cities
pub async fn list_cities(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let cities = CityRepo::list(&state.pool).await?;
    Ok(Json(cities))
}

/// POST /api/cities
///
/// Create a city, or replace the one with the same id.
pub async fn create_city(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CityPayload>,
) -> AppResult<impl IntoResponse> {
    let city = city_from_payload(&state.pool, &payload).await?;

    let mut tx = state.pool.begin().await?;
    CityRepo::upsert(&mut *tx, &city).await?;
    AuditLogRepo::insert(
        &mut *tx,
        &CreateAuditLog::new(
            entities::CITIES,
            actions::CREATE,
            Some(&city.id),
            &user.username,
            audit::city_created(&user.username, city.x, city.y, &city.name),
        ),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(city_id = %city.id, x = city.x, y = city.y, user = %user.username, "City saved");

    Ok(Json(MutationResponse::created(city.id)))
}

/// PUT /api/cities/{id}
///
/// The path id wins over any id in the body.
pub async fn update_city(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    AppJson(mut payload): AppJson<CityPayload>,
) -> AppResult<impl IntoResponse> {
    payload.id = Field::Present(id.clone());
    let city = city_from_payload(&state.pool, &payload).await?;

    let existing = CityRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| not_found(id.clone()))?;
    let summary = audit::city_change_summary(&existing.audit_state(), &city.audit_state());

    let mut tx = state.pool.begin().await?;
    if !CityRepo::update(&mut *tx, &city).await? {
        return Err(not_found(id));
    }
    AuditLogRepo::insert(
        &mut *tx,
        &CreateAuditLog::new(
            entities::CITIES,
            actions::UPDATE,
            Some(&id),
            &user.username,
            audit::city_updated(&user.username, city.x, city.y, &summary, &city.name),
        ),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(city_id = %id, changes = %summary, user = %user.username, "City updated");

    Ok(Json(MutationResponse::ok()))
}

/// DELETE /api/cities/{id}
pub async fn delete_city(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let existing = CityRepo::find_by_id(&state.pool, &id).await?;
    let details = audit::city_deleted(
        &user.username,
        existing.as_ref().map(|c| (c.x, c.y, c.name.as_str())),
    );

    let mut tx = state.pool.begin().await?;
    if !CityRepo::delete(&mut *tx, &id).await? {
        return Err(not_found(id));
    }
    AuditLogRepo::insert(
        &mut *tx,
        &CreateAuditLog::new(entities::CITIES, actions::DELETE, Some(&id), &user.username, details),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(city_id = %id, user = %user.username, "City deleted");

    Ok(Json(MutationResponse::ok()))
}
