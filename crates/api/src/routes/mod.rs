pub mod alerts;
pub mod control;
pub mod data;
pub mod health;
pub mod settings;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /data                          ingest reading (POST)
/// /data/latest                   newest reading
/// /data/history                  readings, oldest first (?limit=&period=)
/// /data/stats                    averages for a period (?period=)
/// /data/export                   CSV download (?period=)
/// /data/clear                    delete all readings (DELETE)
/// /data/{id}                     one reading
///
/// /status                        latest reading classified + summary
///
/// /alerts                        alert log (GET), clear (DELETE)
///
/// /settings                      effective settings (GET), reset (DELETE)
/// /settings/thresholds           replace thresholds (PUT)
/// /settings/plant-profile        replace plant profile (PUT)
/// /settings/auto-control         replace auto-control flags (PUT)
/// /settings/system               replace system settings (PUT)
///
/// /control/status                device states, curtain, latest sensors
/// /control/commands              command log (?limit=)
/// /control/curtain/{action}      open, close, stop (POST)
/// /control/{device}              switch a device (POST)
///
/// /emergency                     emergency stop (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/data", data::router())
        .route("/status", get(handlers::status::get_status))
        .nest("/alerts", alerts::router())
        .nest("/settings", settings::router())
        .nest("/control", control::router())
        .route("/emergency", post(handlers::control::emergency_stop))
}
