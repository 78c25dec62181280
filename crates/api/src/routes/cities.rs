use axum::routing::{get, put};
use axum::Router;

use crate::handlers::cities;
use crate::state::AppState;

/// City routes mounted at `/cities`.
///
/// ```text
/// GET    /       -> list_cities
/// POST   /       -> create_city
/// PUT    /{id}   -> update_city
/// DELETE /{id}   -> delete_city
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cities::list_cities).post(cities::create_city))
        .route("/{id}", put(cities::update_city).delete(cities::delete_city))
}
