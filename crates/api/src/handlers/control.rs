//! Handlers for device control and the command log.
//!
//! Commands go to the controller board first; the stored device state only
//! changes once the board accepted the command (or when no board is
//! configured).

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use greenhouse_core::control::{parse_switch_state, ControlCommand, CurtainAction, Device};
use greenhouse_db::models::control::{ControlCommandLog, CreateControlCommandLog, DeviceState};
use greenhouse_db::models::sensor_reading::SensorReading;
use greenhouse_db::repositories::{ControlCommandRepo, DeviceStateRepo, SensorReadingRepo};
use greenhouse_db::clamp_limit;
use serde::{Deserialize, Serialize};

use crate::controller::Dispatch;
use crate::error::AppResult;
use crate::query::LimitParams;
use crate::response::DataResponse;
use crate::state::AppState;

const DEFAULT_COMMAND_LIMIT: i64 = 20;
const MAX_COMMAND_LIMIT: i64 = 200;

/// Request body for switching a device.
#[derive(Debug, Deserialize)]
pub struct SwitchRequest {
    /// `1` for on, `0` for off.
    pub state: i64,
}

/// Snapshot for the control page.
#[derive(Debug, Serialize)]
pub struct ControlStatus {
    pub devices: Vec<DeviceState>,
    /// Last curtain command, if any.
    pub curtain: Option<String>,
    pub sensors: Option<SensorReading>,
    pub controller_configured: bool,
}

/// Result of a control command.
#[derive(Debug, Serialize)]
pub struct CommandOutcome {
    pub command: ControlCommandLog,
    /// Device states after the command.
    pub devices: Vec<DeviceState>,
}

/// GET /control/status
pub async fn get_control_status(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let devices = DeviceStateRepo::list_all(&state.pool).await?;
    let curtain = ControlCommandRepo::latest_for_target(&state.pool, "curtain")
        .await?
        .map(|log| log.command);
    let sensors = SensorReadingRepo::latest(&state.pool).await?;

    Ok(Json(DataResponse {
        data: ControlStatus {
            devices,
            curtain,
            sensors,
            controller_configured: state.controller.is_configured(),
        },
    }))
}

/// GET /control/commands?limit=
///
/// Recent commands, newest first.
pub async fn list_commands(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_COMMAND_LIMIT, MAX_COMMAND_LIMIT);
    let commands = ControlCommandRepo::list_recent(&state.pool, limit).await?;
    Ok(Json(DataResponse { data: commands }))
}

/// POST /control/{device}
pub async fn switch_device(
    State(state): State<AppState>,
    Path(device): Path<String>,
    Json(body): Json<SwitchRequest>,
) -> AppResult<impl IntoResponse> {
    let device: Device = device.parse()?;
    let on = parse_switch_state(body.state)?;
    let command = ControlCommand::Switch { device, on };

    let dispatch = dispatch(&state, &command).await?;
    DeviceStateRepo::set(&state.pool, device.as_str(), on).await?;

    let outcome = finish(&state, &command, dispatch).await?;
    Ok(Json(DataResponse { data: outcome }))
}

/// POST /control/curtain/{action}
pub async fn curtain(
    State(state): State<AppState>,
    Path(action): Path<String>,
) -> AppResult<impl IntoResponse> {
    let action: CurtainAction = action.parse()?;
    let command = ControlCommand::Curtain(action);

    let dispatch = dispatch(&state, &command).await?;
    let outcome = finish(&state, &command, dispatch).await?;
    Ok(Json(DataResponse { data: outcome }))
}

/// POST /emergency
///
/// Switch every device off.
pub async fn emergency_stop(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let command = ControlCommand::EmergencyStop;
    tracing::warn!("Emergency stop requested");

    let dispatch = dispatch(&state, &command).await?;
    DeviceStateRepo::set_all(&state.pool, false).await?;

    let outcome = finish(&state, &command, dispatch).await?;
    Ok(Json(DataResponse { data: outcome }))
}

/// Send `command` to the board. A failed send is still written to the
/// command log as undelivered before the error is returned.
async fn dispatch(state: &AppState, command: &ControlCommand) -> AppResult<Dispatch> {
    match state.controller.send(command).await {
        Ok(dispatch) => Ok(dispatch),
        Err(err) => {
            log_command(state, command, false).await?;
            Err(err.into())
        }
    }
}

async fn finish(
    state: &AppState,
    command: &ControlCommand,
    dispatch: Dispatch,
) -> AppResult<CommandOutcome> {
    let log = log_command(state, command, dispatch.delivered()).await?;
    let devices = DeviceStateRepo::list_all(&state.pool).await?;
    Ok(CommandOutcome {
        command: log,
        devices,
    })
}

async fn log_command(
    state: &AppState,
    command: &ControlCommand,
    delivered: bool,
) -> AppResult<ControlCommandLog> {
    let log = ControlCommandRepo::create(
        &state.pool,
        &CreateControlCommandLog {
            target: command.target().to_string(),
            command: command.label().to_string(),
            delivered,
        },
    )
    .await?;
    tracing::info!(
        target_device = %log.target,
        command = %log.command,
        delivered,
        "Control command logged"
    );
    Ok(log)
}
