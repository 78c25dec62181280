//! Whole-board endpoints: the polled snapshot, export and bulk import.

use std::collections::HashMap;

use axum::extract::State;
use axum::http::header::{CACHE_CONTROL, CONTENT_DISPOSITION, ETAG, IF_NONE_MATCH};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use wosmap_core::audit::{self, actions, entities};
use wosmap_core::error::CoreError;
use wosmap_core::payloads::{CityPayload, TrapPayload};
use wosmap_core::snapshot::{compute_etag, etag_matches, quote_etag, SNAPSHOT_FORMAT_VERSION};
use wosmap_core::types::Timestamp;
use wosmap_core::validation::{validate_city, validate_trap};
use wosmap_db::models::audit::CreateAuditLog;
use wosmap_db::models::city::City;
use wosmap_db::models::trap::Trap;
use wosmap_db::repositories::{BoardRepo, CityRepo, LevelColorRepo, TrapRepo};
use wosmap_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::rbac::{RequireAuth, RequireManager};
use crate::state::AppState;

/// File name offered to the browser by `GET /api/export`.
const EXPORT_FILENAME: &str = "wos-spots.json";

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// The hashed part of the snapshot.
#[derive(Serialize)]
struct BoardState<'a> {
    cities: &'a [City],
    traps: &'a [Trap],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub etag: String,
    pub cities: Vec<City>,
    pub traps: Vec<Trap>,
    pub updated_at: Timestamp,
}

/// Export document, also accepted back by `POST /api/import`.
#[derive(Debug, Serialize)]
pub struct ExportDocument {
    pub version: i64,
    pub cities: Vec<City>,
    pub traps: Vec<Trap>,
}

#[derive(Debug, Serialize)]
pub struct ImportSummary {
    pub success: bool,
    pub cities: usize,
    pub traps: usize,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/snapshot
///
/// Cities and traps with a content hash. A matching `If-None-Match` gets an
/// empty `304 Not Modified`.
pub async fn snapshot(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Response> {
    let cities = CityRepo::list(&state.pool).await?;
    let traps = TrapRepo::list(&state.pool).await?;

    let etag = compute_etag(&BoardState {
        cities: &cities,
        traps: &traps,
    })
    .map_err(|e| AppError::InternalError(format!("Snapshot serialization error: {e}")))?;

    let not_modified = headers
        .get(IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| etag_matches(v, &etag));
    if not_modified {
        return Ok((StatusCode::NOT_MODIFIED, [(ETAG, quote_etag(&etag))]).into_response());
    }

    let headers = [
        (ETAG, quote_etag(&etag)),
        (CACHE_CONTROL, "no-cache".to_string()),
    ];
    let body = Snapshot {
        etag,
        cities,
        traps,
        updated_at: Utc::now(),
    };
    Ok((headers, Json(body)).into_response())
}

/// GET /api/export
///
/// The whole board as a downloadable versioned document.
pub async fn export(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let document = ExportDocument {
        version: SNAPSHOT_FORMAT_VERSION,
        cities: CityRepo::list(&state.pool).await?,
        traps: TrapRepo::list(&state.pool).await?,
    };
    let disposition = format!("attachment; filename=\"{EXPORT_FILENAME}\"");
    Ok(([(CONTENT_DISPOSITION, disposition)], Json(document)))
}

/// POST /api/import
///
/// Replace every city and trap. Accepts an export document or a bare array
/// of cities (which clears the traps). Every item is validated before
/// anything is written, and the replacement commits or rolls back as a
/// whole.
pub async fn import(
    RequireManager(actor): RequireManager,
    State(state): State<AppState>,
    AppJson(body): AppJson<Value>,
) -> AppResult<impl IntoResponse> {
    let (raw_cities, raw_traps) = split_import_document(body)?;

    let cities = import_cities(&state.pool, raw_cities).await?;
    let traps = raw_traps
        .into_iter()
        .enumerate()
        .map(|(index, raw)| -> AppResult<Trap> {
            let payload: TrapPayload = serde_json::from_value(raw).map_err(|_| invalid_format())?;
            let valid = validate_trap(&payload).map_err(|e| item_error("trap", index, e))?;
            Ok(Trap::from(valid))
        })
        .collect::<AppResult<Vec<_>>>()?;

    let entry = CreateAuditLog::new(
        entities::CITIES,
        actions::IMPORT,
        None,
        &actor.username,
        audit::board_imported(&actor.username, cities.len(), traps.len()),
    );
    BoardRepo::replace_all(&state.pool, &cities, &traps, &entry).await?;

    tracing::info!(
        cities = cities.len(),
        traps = traps.len(),
        user = %actor.username,
        "Board imported"
    );

    Ok(Json(ImportSummary {
        success: true,
        cities: cities.len(),
        traps: traps.len(),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid_format() -> AppError {
    AppError::BadRequest("Invalid data format".into())
}

/// Prefix a validation message with the offending item's position.
fn item_error(kind: &str, index: usize, err: CoreError) -> AppError {
    match err {
        CoreError::Validation(msg) => AppError::Core(CoreError::Validation(format!(
            "Invalid {kind} at index {index}: {msg}"
        ))),
        other => AppError::Core(other),
    }
}

/// Split an import body into its raw city and trap items.
fn split_import_document(body: Value) -> AppResult<(Vec<Value>, Vec<Value>)> {
    match body {
        Value::Array(cities) => Ok((cities, Vec::new())),
        Value::Object(mut doc) => {
            let version = doc.get("version").and_then(Value::as_i64);
            match (version, doc.remove("cities"), doc.remove("traps")) {
                (
                    Some(SNAPSHOT_FORMAT_VERSION),
                    Some(Value::Array(cities)),
                    Some(Value::Array(traps)),
                ) => Ok((cities, traps)),
                _ => Err(invalid_format()),
            }
        }
        _ => Err(invalid_format()),
    }
}

/// Validate imported cities and resolve their colours against the current
/// level colours. Trap overlap is not checked on import.
async fn import_cities(pool: &DbPool, raw: Vec<Value>) -> AppResult<Vec<City>> {
    let level_colors: HashMap<i64, String> = LevelColorRepo::list(pool)
        .await?
        .into_iter()
        .map(|lc| (lc.level, lc.color))
        .collect();

    raw.into_iter()
        .enumerate()
        .map(|(index, raw)| -> AppResult<City> {
            let payload: CityPayload = serde_json::from_value(raw).map_err(|_| invalid_format())?;
            let valid = validate_city(&payload).map_err(|e| item_error("city", index, e))?;
            let level_color = valid.level.and_then(|level| level_colors.get(&level));
            let color = valid.resolved_color(level_color.map(String::as_str));
            Ok(City::from_valid(valid, color))
        })
        .collect()
}
