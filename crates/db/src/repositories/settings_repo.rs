//! Repository for the `settings` table.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::setting::SettingRow;

/// Provides query operations for stored settings sections.
pub struct SettingsRepo;

impl SettingsRepo {
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<SettingRow>, sqlx::Error> {
        sqlx::query_as::<_, SettingRow>(
            "SELECT section, value, updated_at FROM settings ORDER BY section",
        )
        .fetch_all(pool)
        .await
    }

    /// Insert or replace one section's JSON document.
    pub async fn upsert(
        pool: &SqlitePool,
        section: &str,
        value: &str,
    ) -> Result<SettingRow, sqlx::Error> {
        sqlx::query_as::<_, SettingRow>(
            "INSERT INTO settings (section, value, updated_at) VALUES (?, ?, ?) \
             ON CONFLICT (section) DO UPDATE SET \
                value = excluded.value, updated_at = excluded.updated_at \
             RETURNING section, value, updated_at",
        )
        .bind(section)
        .bind(value)
        .bind(Utc::now())
        .fetch_one(pool)
        .await
    }

    /// Remove every stored section, reverting to defaults.
    pub async fn delete_all(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM settings").execute(pool).await?;
        Ok(result.rows_affected())
    }
}
