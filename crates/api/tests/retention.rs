//! Tests for the data retention job.

mod common;

use std::time::Duration;

use chrono::Utc;
use greenhouse_api::background::data_retention;
use greenhouse_db::models::sensor_reading::CreateSensorReading;
use greenhouse_db::repositories::{SensorReadingRepo, SettingsRepo};
use sqlx::SqlitePool;
use tokio_util::sync::CancellationToken;

async fn insert_days_ago(pool: &SqlitePool, days: i64) {
    let input = CreateSensorReading {
        recorded_at: Some(Utc::now() - chrono::Duration::days(days)),
        temperature: Some(22.0),
        ..Default::default()
    };
    SensorReadingRepo::insert(pool, &input).await.unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn purge_uses_default_retention(pool: SqlitePool) {
    insert_days_ago(&pool, 45).await;
    insert_days_ago(&pool, 1).await;

    assert_eq!(data_retention::purge_once(&pool).await, 1);
    assert_eq!(SensorReadingRepo::count(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn purge_follows_stored_retention_setting(pool: SqlitePool) {
    SettingsRepo::upsert(
        &pool,
        "system",
        r#"{"update_interval_secs":5,"data_retention_days":3}"#,
    )
    .await
    .unwrap();
    insert_days_ago(&pool, 5).await;
    insert_days_ago(&pool, 1).await;

    assert_eq!(data_retention::purge_once(&pool).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn run_stops_when_cancelled(pool: SqlitePool) {
    insert_days_ago(&pool, 60).await;
    let cancel = CancellationToken::new();
    let handle = tokio::spawn(data_retention::run(
        pool.clone(),
        Duration::from_secs(3600),
        cancel.clone(),
    ));

    // The first tick fires immediately.
    tokio::time::sleep(Duration::from_millis(200)).await;
    cancel.cancel();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("job should stop")
        .unwrap();

    assert_eq!(SensorReadingRepo::count(&pool).await.unwrap(), 0);
}
