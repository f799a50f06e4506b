//! Periodic cleanup of old sensor readings.
//!
//! Deletes rows from `sensor_readings` older than the `data_retention_days`
//! system setting. The setting is re-read on every run so changes take
//! effect without a restart.

use std::time::Duration;

use chrono::Utc;
use greenhouse_db::repositories::SensorReadingRepo;
use greenhouse_db::DbPool;
use tokio_util::sync::CancellationToken;

use crate::settings_store::load_settings;

/// Run the retention loop until `cancel` is triggered.
pub async fn run(pool: DbPool, interval: Duration, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = interval.as_secs(),
        "Data retention job started"
    );

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Data retention job stopping");
                break;
            }
            _ = ticker.tick() => {
                purge_once(&pool).await;
            }
        }
    }
}

/// Delete readings older than the configured retention period. Errors are
/// logged, never propagated.
pub async fn purge_once(pool: &DbPool) -> u64 {
    let retention_days = match load_settings(pool).await {
        Ok(settings) => settings.system.data_retention_days,
        Err(e) => {
            tracing::error!(error = %e, "Data retention: failed to load settings");
            return 0;
        }
    };

    let cutoff = Utc::now() - chrono::Duration::days(i64::from(retention_days));
    match SensorReadingRepo::delete_older_than(pool, cutoff).await {
        Ok(deleted) => {
            if deleted > 0 {
                tracing::info!(deleted, retention_days, "Data retention: purged old readings");
            } else {
                tracing::debug!("Data retention: no readings to purge");
            }
            deleted
        }
        Err(e) => {
            tracing::error!(error = %e, "Data retention: cleanup failed");
            0
        }
    }
}
