pub mod audit;
pub mod auth;
pub mod board;
pub mod cities;
pub mod health;
pub mod levels;
pub mod pages;
pub mod traps;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /login                      login (public, rate-limited)
/// /logout                     logout (requires auth)
/// /me                         current user or null (public)
///
/// /levels                     list (public), set colour (admin)
///
/// /cities                     list (public), create (requires auth)
/// /cities/{id}                update, delete (requires auth)
///
/// /traps                      list (public), create (admin)
/// /traps/{id}                 update, delete (admin)
///
/// /users                      list, create (moderator or admin)
/// /users/{id}                 update, delete (moderator or admin)
///
/// /audit                      audit trail (requires auth)
///
/// /snapshot                   polled board state with ETag (public)
/// /export                     versioned board document (requires auth)
/// /import                     replace board contents (moderator or admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/levels", levels::router())
        .nest("/cities", cities::router())
        .nest("/traps", traps::router())
        .nest("/users", users::router())
        .nest("/audit", audit::router())
        .merge(board::router())
}
