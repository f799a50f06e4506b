//! `GET /health`, mounted outside `/api` for load balancers and the poller.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Ok,
    /// The process is up but SQLite did not answer.
    Degraded,
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: ServiceStatus,
    pub version: &'static str,
    pub db_healthy: bool,
    pub controller_configured: bool,
}

async fn report(State(state): State<AppState>) -> Json<HealthReport> {
    let db_healthy = match greenhouse_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database unreachable");
            false
        }
    };

    Json(HealthReport {
        status: if db_healthy {
            ServiceStatus::Ok
        } else {
            ServiceStatus::Degraded
        },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        controller_configured: state.controller.is_configured(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(report))
}
