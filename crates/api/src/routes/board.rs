use axum::routing::{get, post};
use axum::Router;

use crate::handlers::board;
use crate::state::AppState;

/// Whole-board routes, merged at the `/api` root.
///
/// ```text
/// GET  /snapshot  -> snapshot
/// GET  /export    -> export
/// POST /import    -> import (moderator or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/snapshot", get(board::snapshot))
        .route("/export", get(board::export))
        .route("/import", post(board::import))
}
