//! Device state and control command log models.

use greenhouse_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Last known state of a switchable device.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct DeviceState {
    pub device: String,
    pub is_on: bool,
    /// `None` until the device is first switched.
    pub updated_at: Option<Timestamp>,
}

/// A command issued to the controller board.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ControlCommandLog {
    pub id: DbId,
    /// Device name, `curtain`, or `all` for an emergency stop.
    pub target: String,
    pub command: String,
    /// Whether the board acknowledged the command.
    pub delivered: bool,
    pub issued_at: Timestamp,
}

/// DTO for logging a command.
#[derive(Debug, Clone)]
pub struct CreateControlCommandLog {
    pub target: String,
    pub command: String,
    pub delivered: bool,
}
