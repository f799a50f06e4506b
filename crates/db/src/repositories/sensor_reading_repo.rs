//! Repository for the `sensor_readings` table.

use chrono::Utc;
use greenhouse_core::types::{DbId, Timestamp};
use sqlx::SqlitePool;

use crate::models::sensor_reading::{CreateSensorReading, SensorReading};

/// Column list for `sensor_readings` SELECT queries.
const COLUMNS: &str = "\
    id, recorded_at, temperature, humidity, light, ec, tds, ph, water_level";

/// Provides query operations for sensor readings.
pub struct SensorReadingRepo;

impl SensorReadingRepo {
    /// Insert a reading, stamping it with the current time unless the DTO
    /// carries its own capture time.
    pub async fn insert(
        pool: &SqlitePool,
        input: &CreateSensorReading,
    ) -> Result<SensorReading, sqlx::Error> {
        let recorded_at = input.recorded_at.unwrap_or_else(Utc::now);
        let query = format!(
            "INSERT INTO sensor_readings \
                (recorded_at, temperature, humidity, light, ec, tds, ph, water_level) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SensorReading>(&query)
            .bind(recorded_at)
            .bind(input.temperature)
            .bind(input.humidity)
            .bind(input.light)
            .bind(input.ec)
            .bind(input.tds)
            .bind(input.ph)
            .bind(input.water_level)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<SensorReading>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sensor_readings WHERE id = ?");
        sqlx::query_as::<_, SensorReading>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The most recently recorded reading, if any.
    pub async fn latest(pool: &SqlitePool) -> Result<Option<SensorReading>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sensor_readings \
             ORDER BY recorded_at DESC, id DESC LIMIT 1"
        );
        sqlx::query_as::<_, SensorReading>(&query)
            .fetch_optional(pool)
            .await
    }

    /// The newest `limit` readings recorded at or after `since` (all
    /// readings when `None`), returned oldest first for charting.
    pub async fn list_recent(
        pool: &SqlitePool,
        since: Option<Timestamp>,
        limit: i64,
    ) -> Result<Vec<SensorReading>, sqlx::Error> {
        let mut rows = match since {
            Some(since) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM sensor_readings \
                     WHERE recorded_at >= ? \
                     ORDER BY recorded_at DESC, id DESC LIMIT ?"
                );
                sqlx::query_as::<_, SensorReading>(&query)
                    .bind(since)
                    .bind(limit)
                    .fetch_all(pool)
                    .await?
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM sensor_readings \
                     ORDER BY recorded_at DESC, id DESC LIMIT ?"
                );
                sqlx::query_as::<_, SensorReading>(&query)
                    .bind(limit)
                    .fetch_all(pool)
                    .await?
            }
        };
        rows.reverse();
        Ok(rows)
    }

    /// Every reading recorded at or after `since` (all when `None`), oldest
    /// first. Used for statistics and export.
    pub async fn list_since(
        pool: &SqlitePool,
        since: Option<Timestamp>,
    ) -> Result<Vec<SensorReading>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sensor_readings \
             WHERE ? IS NULL OR recorded_at >= ? \
             ORDER BY recorded_at ASC, id ASC"
        );
        sqlx::query_as::<_, SensorReading>(&query)
            .bind(since)
            .bind(since)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sensor_readings")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Delete every reading. Returns the number of rows removed.
    pub async fn delete_all(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sensor_readings")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete readings recorded before `cutoff`. Returns the number removed.
    pub async fn delete_older_than(
        pool: &SqlitePool,
        cutoff: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sensor_readings WHERE recorded_at < ?")
            .bind(cutoff)
            .execute(pool)
            .await?;
        tracing::debug!(deleted = result.rows_affected(), %cutoff, "Purged old sensor readings");
        Ok(result.rows_affected())
    }
}
