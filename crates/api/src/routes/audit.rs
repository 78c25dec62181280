use axum::routing::get;
use axum::Router;

use crate::handlers::audit;
use crate::state::AppState;

/// Audit trail routes mounted at `/audit`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(audit::list_audit_logs))
}
