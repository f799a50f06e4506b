//! Handlers for the settings page.
//!
//! Each section is saved independently. Saving thresholds also swaps the
//! bands used by ingest and status.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use greenhouse_core::error::CoreError;
use greenhouse_core::metrics::ThresholdConfig;
use greenhouse_core::settings::{Settings, SettingsSection};
use greenhouse_db::repositories::SettingsRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::settings_store::{load_settings, log_overlapping_margins};
use crate::state::AppState;

/// GET /settings
///
/// The effective settings (stored sections over defaults).
pub async fn get_settings(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let settings = load_settings(&state.pool).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /settings/thresholds
pub async fn update_thresholds(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    // Held across the save so the live bands always match the stored row.
    let mut live = state.thresholds.write().await;
    let settings = save_section(&state, SettingsSection::Thresholds, body).await?;

    log_overlapping_margins(&settings.thresholds);
    *live = settings.thresholds.clone();
    drop(live);
    tracing::info!("Live thresholds updated");

    Ok(Json(DataResponse { data: settings }))
}

/// PUT /settings/plant-profile
pub async fn update_plant_profile(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let settings = save_section(&state, SettingsSection::PlantProfile, body).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /settings/auto-control
pub async fn update_auto_control(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let settings = save_section(&state, SettingsSection::AutoControl, body).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /settings/system
pub async fn update_system(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let settings = save_section(&state, SettingsSection::System, body).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// DELETE /settings
///
/// Drop every stored section and revert the live thresholds to defaults.
pub async fn reset_settings(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mut live = state.thresholds.write().await;
    let removed = SettingsRepo::delete_all(&state.pool).await?;
    *live = ThresholdConfig::default();
    drop(live);
    tracing::info!(removed, "Settings reset to defaults");
    Ok(Json(DataResponse {
        data: Settings::default(),
    }))
}

/// Validate `body` as `section`, persist the normalized document and return
/// the new effective settings.
async fn save_section(
    state: &AppState,
    section: SettingsSection,
    body: serde_json::Value,
) -> AppResult<Settings> {
    let mut settings = load_settings(&state.pool).await?;
    settings.apply_section(section, body)?;

    let value = match section {
        SettingsSection::Thresholds => serde_json::to_string(&settings.thresholds),
        SettingsSection::PlantProfile => serde_json::to_string(&settings.plant_profile),
        SettingsSection::AutoControl => serde_json::to_string(&settings.auto_control),
        SettingsSection::System => serde_json::to_string(&settings.system),
    }
    .map_err(|e| CoreError::Internal(format!("Failed to serialize {section} settings: {e}")))?;

    SettingsRepo::upsert(&state.pool, section.as_str(), &value).await?;
    tracing::info!(%section, "Settings section saved");
    Ok(settings)
}
