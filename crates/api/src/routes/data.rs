//! Route definitions for sensor data.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::data;
use crate::state::AppState;

/// Sensor data routes mounted at `/data`.
///
/// ```text
/// POST   /          -> ingest_reading
/// GET    /latest    -> get_latest
/// GET    /history   -> get_history
/// GET    /stats     -> get_stats
/// GET    /export    -> export_csv
/// DELETE /clear     -> clear_readings
/// GET    /{id}      -> get_reading
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(data::ingest_reading))
        .route("/latest", get(data::get_latest))
        .route("/history", get(data::get_history))
        .route("/stats", get(data::get_stats))
        .route("/export", get(data::export_csv))
        .route("/clear", delete(data::clear_readings))
        .route("/{id}", get(data::get_reading))
}
