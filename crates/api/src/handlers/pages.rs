//! Role-gated HTML pages.
//!
//! Public pages are mounted directly as [`ServeFile`] services in
//! [`crate::routes::pages`]; these handlers check the session first.

use axum::extract::{Request, State};
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::middleware::rbac::{RequireAdmin, RequireManager};
use crate::state::AppState;

async fn serve_page(state: &AppState, file: &str, req: Request) -> Response {
    let path = state.config.public_dir.join(file);
    match ServeFile::new(path).oneshot(req).await {
        Ok(res) => res.into_response(),
        Err(never) => match never {},
    }
}

/// GET /users
pub async fn users_page(
    RequireManager(_user): RequireManager,
    State(state): State<AppState>,
    req: Request,
) -> Response {
    serve_page(&state, "users.html", req).await
}

/// GET /levels
pub async fn levels_page(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    req: Request,
) -> Response {
    serve_page(&state, "levels.html", req).await
}
