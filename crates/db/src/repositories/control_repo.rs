//! Repositories for `device_states` and `control_commands`.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::control::{ControlCommandLog, CreateControlCommandLog, DeviceState};

/// Column list for `control_commands` SELECT queries.
const COMMAND_COLUMNS: &str = "id, target, command, delivered, issued_at";

/// Provides query operations for device states.
pub struct DeviceStateRepo;

impl DeviceStateRepo {
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<DeviceState>, sqlx::Error> {
        sqlx::query_as::<_, DeviceState>(
            "SELECT device, is_on, updated_at FROM device_states ORDER BY device",
        )
        .fetch_all(pool)
        .await
    }

    /// Record the new state of one device. Returns `None` if the device is
    /// not known.
    pub async fn set(
        pool: &SqlitePool,
        device: &str,
        is_on: bool,
    ) -> Result<Option<DeviceState>, sqlx::Error> {
        sqlx::query_as::<_, DeviceState>(
            "UPDATE device_states SET is_on = ?, updated_at = ? WHERE device = ? \
             RETURNING device, is_on, updated_at",
        )
        .bind(is_on)
        .bind(Utc::now())
        .bind(device)
        .fetch_optional(pool)
        .await
    }

    /// Switch every device to the same state. Returns the number updated.
    pub async fn set_all(pool: &SqlitePool, is_on: bool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE device_states SET is_on = ?, updated_at = ?")
            .bind(is_on)
            .bind(Utc::now())
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

/// Provides query operations for the control command log.
pub struct ControlCommandRepo;

impl ControlCommandRepo {
    pub async fn create(
        pool: &SqlitePool,
        input: &CreateControlCommandLog,
    ) -> Result<ControlCommandLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO control_commands (target, command, delivered, issued_at) \
             VALUES (?, ?, ?, ?) RETURNING {COMMAND_COLUMNS}"
        );
        sqlx::query_as::<_, ControlCommandLog>(&query)
            .bind(&input.target)
            .bind(&input.command)
            .bind(input.delivered)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Most recent commands, newest first.
    pub async fn list_recent(
        pool: &SqlitePool,
        limit: i64,
    ) -> Result<Vec<ControlCommandLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COMMAND_COLUMNS} FROM control_commands ORDER BY id DESC LIMIT ?"
        );
        sqlx::query_as::<_, ControlCommandLog>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// The latest command issued to `target`, if any.
    pub async fn latest_for_target(
        pool: &SqlitePool,
        target: &str,
    ) -> Result<Option<ControlCommandLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COMMAND_COLUMNS} FROM control_commands \
             WHERE target = ? ORDER BY id DESC LIMIT 1"
        );
        sqlx::query_as::<_, ControlCommandLog>(&query)
            .bind(target)
            .fetch_optional(pool)
            .await
    }
}
