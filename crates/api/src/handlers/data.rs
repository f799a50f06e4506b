//! Handlers for sensor data ingest, history, statistics and export.

use axum::extract::{Path, Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use greenhouse_core::error::CoreError;
use greenhouse_core::history::{build_csv, export_file_name, HistoryRow, HistoryStats};
use greenhouse_core::monitoring::thresholds::{evaluate_reading, MetricStatus};
use greenhouse_core::types::DbId;
use greenhouse_db::models::sensor_reading::{CreateSensorReading, SensorReading};
use greenhouse_db::repositories::SensorReadingRepo;
use greenhouse_db::{clamp_limit, MAX_LIMIT};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::alerts::AlertView;
use crate::query::{HistoryParams, PeriodParams};
use crate::response::{DataResponse, DeletedCount};
use crate::state::AppState;

/// Default number of readings returned by the history endpoint.
const DEFAULT_HISTORY_LIMIT: i64 = 50;

/// Result of ingesting one reading.
#[derive(Debug, Serialize)]
pub struct IngestResult {
    pub reading: SensorReading,
    pub statuses: Vec<MetricStatus>,
    /// Alerts newly recorded for this reading (suppressed repeats excluded).
    pub alerts: Vec<AlertView>,
}

/// POST /data
///
/// Persist a reading, classify it against the live thresholds and record any
/// new alerts.
pub async fn ingest_reading(
    State(state): State<AppState>,
    Json(input): Json<CreateSensorReading>,
) -> AppResult<impl IntoResponse> {
    if !input.has_values() {
        return Err(AppError::BadRequest(
            "At least one sensor value is required".into(),
        ));
    }

    let row = SensorReadingRepo::insert(&state.pool, &input).await?;
    let reading = row.reading();

    let thresholds = state.thresholds.read().await.clone();
    let statuses = evaluate_reading(&reading, &thresholds);
    let new_alerts = state
        .recorder
        .lock()
        .await
        .observe(&reading, &thresholds, Utc::now());

    for alert in &new_alerts {
        tracing::warn!(
            metric = %alert.metric,
            value = alert.value,
            severity = alert.severity.as_str(),
            reading_id = row.id,
            "Threshold alert recorded"
        );
    }
    tracing::debug!(reading_id = row.id, metrics = statuses.len(), "Reading ingested");

    let result = IngestResult {
        reading: row,
        statuses,
        alerts: new_alerts.into_iter().map(AlertView::from).collect(),
    };
    Ok((StatusCode::CREATED, Json(DataResponse { data: result })))
}

/// GET /data/latest
///
/// The newest reading, or `null` when nothing has been recorded yet.
pub async fn get_latest(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let latest = SensorReadingRepo::latest(&state.pool).await?;
    Ok(Json(DataResponse { data: latest }))
}

/// GET /data/{id}
pub async fn get_reading(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let reading = SensorReadingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "SensorReading",
            id,
        })?;
    Ok(Json(DataResponse { data: reading }))
}

/// GET /data/history?limit=&period=
///
/// The newest `limit` readings inside the period, oldest first.
pub async fn get_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> AppResult<impl IntoResponse> {
    let period = params.period()?;
    let limit = clamp_limit(params.limit, DEFAULT_HISTORY_LIMIT, MAX_LIMIT);
    let rows =
        SensorReadingRepo::list_recent(&state.pool, period.cutoff(Utc::now()), limit).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /data/stats?period=
pub async fn get_stats(
    State(state): State<AppState>,
    Query(params): Query<PeriodParams>,
) -> AppResult<impl IntoResponse> {
    let period = params.period()?;
    let rows = SensorReadingRepo::list_since(&state.pool, period.cutoff(Utc::now())).await?;
    let history: Vec<HistoryRow> = rows.iter().map(HistoryRow::from).collect();
    Ok(Json(DataResponse {
        data: HistoryStats::from_rows(&history),
    }))
}

/// GET /data/export?period=
///
/// Download the readings inside the period as CSV.
pub async fn export_csv(
    State(state): State<AppState>,
    Query(params): Query<PeriodParams>,
) -> AppResult<impl IntoResponse> {
    let period = params.period()?;
    let now = Utc::now();
    let rows = SensorReadingRepo::list_since(&state.pool, period.cutoff(now)).await?;
    let history: Vec<HistoryRow> = rows.iter().map(HistoryRow::from).collect();

    let csv = build_csv(&history);
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export_file_name(period, now)
    );
    tracing::info!(%period, rows = history.len(), "Exported sensor history");

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}

/// DELETE /data/clear
///
/// Delete every stored reading.
pub async fn clear_readings(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let deleted = SensorReadingRepo::delete_all(&state.pool).await?;
    tracing::info!(deleted, "Sensor history cleared");
    Ok(Json(DataResponse {
        data: DeletedCount { deleted },
    }))
}
