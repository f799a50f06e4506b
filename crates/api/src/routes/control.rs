use axum::routing::{get, post};
use axum::Router;

use crate::handlers::control;
use crate::state::AppState;

/// Device control routes mounted at `/control`.
///
/// ```text
/// GET  /status             -> get_control_status
/// GET  /commands           -> list_commands
/// POST /curtain/{action}   -> curtain
/// POST /{device}           -> switch_device
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/status", get(control::get_control_status))
        .route("/commands", get(control::list_commands))
        .route("/curtain/{action}", post(control::curtain))
        .route("/{device}", post(control::switch_device))
}
