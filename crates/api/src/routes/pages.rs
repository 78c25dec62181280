use std::path::Path;

use axum::response::Redirect;
use axum::routing::get;
use axum::Router;
use tower_http::services::ServeFile;

use crate::handlers::pages;
use crate::state::AppState;

/// HTML page routes served from `public_dir`.
///
/// ```text
/// GET /         -> redirect to /map
/// GET /map      -> map.html
/// GET /list     -> list.html
/// GET /history  -> history.html
/// GET /users    -> users.html (moderator or admin)
/// GET /levels   -> levels.html (admin)
/// ```
pub fn router(public_dir: &Path) -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/map") }))
        .route_service("/map", ServeFile::new(public_dir.join("map.html")))
        .route_service("/list", ServeFile::new(public_dir.join("list.html")))
        .route_service("/history", ServeFile::new(public_dir.join("history.html")))
        .route("/users", get(pages::users_page))
        .route("/levels", get(pages::levels_page))
}
