//! Device control commands for the greenhouse controller board.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A switchable actuator on the controller board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Device {
    /// Nutrient / water pump.
    PumpWater,
    /// Misting pump used to raise humidity.
    PumpHumidity,
    Led,
    Fan,
    Buzzer,
}

impl Device {
    pub const ALL: [Device; 5] = [
        Device::PumpWater,
        Device::PumpHumidity,
        Device::Led,
        Device::Fan,
        Device::Buzzer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Device::PumpWater => "pump_water",
            Device::PumpHumidity => "pump_humidity",
            Device::Led => "led",
            Device::Fan => "fan",
            Device::Buzzer => "buzzer",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Device {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Device::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown device: {s}")))
    }
}

/// Curtain motor command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurtainAction {
    Open,
    Close,
    Stop,
}

impl CurtainAction {
    pub fn as_str(self) -> &'static str {
        match self {
            CurtainAction::Open => "open",
            CurtainAction::Close => "close",
            CurtainAction::Stop => "stop",
        }
    }
}

impl fmt::Display for CurtainAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurtainAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(CurtainAction::Open),
            "close" => Ok(CurtainAction::Close),
            "stop" => Ok(CurtainAction::Stop),
            other => Err(CoreError::Validation(format!(
                "Unknown curtain action '{other}', expected open, close or stop"
            ))),
        }
    }
}

/// Convert the wire `state` flag (`0` or `1`) to on/off.
pub fn parse_switch_state(state: i64) -> Result<bool, CoreError> {
    match state {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(CoreError::Validation(format!(
            "state must be 0 or 1, got {other}"
        ))),
    }
}

/// A command sent to the controller board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    Switch { device: Device, on: bool },
    Curtain(CurtainAction),
    EmergencyStop,
}

impl ControlCommand {
    /// Target name recorded in the command log (`curtain`, `all`, or the
    /// device name).
    pub fn target(&self) -> &'static str {
        match self {
            ControlCommand::Switch { device, .. } => device.as_str(),
            ControlCommand::Curtain(_) => "curtain",
            ControlCommand::EmergencyStop => "all",
        }
    }

    /// Short command label recorded in the command log.
    pub fn label(&self) -> &'static str {
        match self {
            ControlCommand::Switch { on: true, .. } => "on",
            ControlCommand::Switch { on: false, .. } => "off",
            ControlCommand::Curtain(action) => action.as_str(),
            ControlCommand::EmergencyStop => "emergency_stop",
        }
    }

    /// Path on the controller board that accepts this command.
    pub fn board_path(&self) -> String {
        match self {
            ControlCommand::Switch { device, .. } => format!("/control/{device}"),
            ControlCommand::Curtain(action) => format!("/control/curtain/{action}"),
            ControlCommand::EmergencyStop => "/emergency".to_string(),
        }
    }

    /// JSON body for the board request, if the command carries one.
    pub fn board_body(&self) -> Option<serde_json::Value> {
        match self {
            ControlCommand::Switch { on, .. } => {
                Some(serde_json::json!({ "state": u8::from(*on) }))
            }
            _ => None,
        }
    }
}
