//! Live status: the latest reading classified against the live thresholds.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use greenhouse_core::alert::Severity;
use greenhouse_core::monitoring::thresholds::{evaluate_reading, MetricStatus, StatusSummary};
use greenhouse_db::models::sensor_reading::SensorReading;
use greenhouse_db::repositories::SensorReadingRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct LiveStatus {
    pub reading: Option<SensorReading>,
    pub statuses: Vec<MetricStatus>,
    pub summary: StatusSummary,
    pub overall: Severity,
}

/// GET /status
pub async fn get_status(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let latest = SensorReadingRepo::latest(&state.pool).await?;

    let statuses = match &latest {
        Some(row) => {
            let thresholds = state.thresholds.read().await;
            evaluate_reading(&row.reading(), &thresholds)
        }
        None => Vec::new(),
    };
    let summary = StatusSummary::from_statuses(&statuses);

    Ok(Json(DataResponse {
        data: LiveStatus {
            reading: latest,
            statuses,
            overall: summary.overall(),
            summary,
        },
    }))
}
