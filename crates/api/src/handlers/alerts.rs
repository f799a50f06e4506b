//! Handlers for the alert log.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use greenhouse_core::alert::AlertEntry;
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// An alert entry as returned to clients, with its rendered message.
#[derive(Debug, Serialize)]
pub struct AlertView {
    #[serde(flatten)]
    pub entry: AlertEntry,
    pub message: String,
}

impl From<AlertEntry> for AlertView {
    fn from(entry: AlertEntry) -> Self {
        let message = entry.message();
        Self { entry, message }
    }
}

/// GET /alerts
///
/// The alert log, newest first.
pub async fn list_alerts(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let snapshot = state.recorder.lock().await.snapshot();
    let alerts: Vec<AlertView> = snapshot.into_iter().map(AlertView::from).collect();
    Ok(Json(DataResponse { data: alerts }))
}

/// DELETE /alerts
///
/// Empty the alert log. Idempotent.
pub async fn clear_alerts(State(state): State<AppState>) -> AppResult<StatusCode> {
    let mut recorder = state.recorder.lock().await;
    let cleared = recorder.len();
    recorder.clear();
    tracing::info!(cleared, "Alert log cleared");
    Ok(StatusCode::NO_CONTENT)
}
