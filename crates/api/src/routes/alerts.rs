use axum::routing::get;
use axum::Router;

use crate::handlers::alerts;
use crate::state::AppState;

/// Alert log routes mounted at `/alerts`.
///
/// ```text
/// GET    /   -> list_alerts
/// DELETE /   -> clear_alerts
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(alerts::list_alerts).delete(alerts::clear_alerts))
}
