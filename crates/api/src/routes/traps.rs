use axum::routing::{get, put};
use axum::Router;

use crate::handlers::traps;
use crate::state::AppState;

/// Bear trap routes mounted at `/traps`.
///
/// ```text
/// GET    /       -> list_traps
/// POST   /       -> create_trap (admin)
/// PUT    /{id}   -> update_trap (admin)
/// DELETE /{id}   -> delete_trap (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(traps::list_traps).post(traps::create_trap))
        .route("/{id}", put(traps::update_trap).delete(traps::delete_trap))
}
