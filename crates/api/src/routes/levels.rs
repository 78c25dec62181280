use axum::routing::get;
use axum::Router;

use crate::handlers::levels;
use crate::state::AppState;

/// Level colour routes mounted at `/levels`.
///
/// ```text
/// GET  /  -> list_levels
/// POST /  -> set_level_color (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(levels::list_levels).post(levels::set_level_color))
}
