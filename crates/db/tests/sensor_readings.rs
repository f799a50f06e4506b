//! Integration tests for `SensorReadingRepo`.

use chrono::{Duration, Utc};
use greenhouse_core::metrics::MetricId;
use greenhouse_db::models::sensor_reading::CreateSensorReading;
use greenhouse_db::repositories::SensorReadingRepo;
use sqlx::SqlitePool;

fn reading_at(
    recorded_at: chrono::DateTime<Utc>,
    temperature: f64,
) -> CreateSensorReading {
    CreateSensorReading {
        recorded_at: Some(recorded_at),
        temperature: Some(temperature),
        humidity: Some(70.0),
        ph: Some(6.2),
        ..Default::default()
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn insert_and_find_round_trip(pool: SqlitePool) {
    let input = CreateSensorReading {
        temperature: Some(24.5),
        water_level: Some(12.0),
        tds: Some(850.0),
        ..Default::default()
    };
    let created = SensorReadingRepo::insert(&pool, &input).await.unwrap();
    assert_eq!(created.temperature, Some(24.5));
    assert_eq!(created.humidity, None);

    let found = SensorReadingRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .expect("row should exist");
    assert_eq!(found, created);

    let reading = found.reading();
    assert_eq!(reading.get(MetricId::WaterLevel), Some(12.0));
    assert_eq!(reading.iter().count(), 2, "tds is not a classified metric");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn find_missing_returns_none(pool: SqlitePool) {
    assert!(SensorReadingRepo::find_by_id(&pool, 999).await.unwrap().is_none());
    assert!(SensorReadingRepo::latest(&pool).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn latest_returns_newest_recorded(pool: SqlitePool) {
    let now = Utc::now();
    SensorReadingRepo::insert(&pool, &reading_at(now, 25.0)).await.unwrap();
    SensorReadingRepo::insert(&pool, &reading_at(now - Duration::minutes(5), 21.0))
        .await
        .unwrap();

    let latest = SensorReadingRepo::latest(&pool).await.unwrap().unwrap();
    assert_eq!(latest.temperature, Some(25.0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_recent_is_oldest_first_and_limited(pool: SqlitePool) {
    let now = Utc::now();
    for i in 0..5 {
        SensorReadingRepo::insert(&pool, &reading_at(now - Duration::minutes(i), 20.0 + i as f64))
            .await
            .unwrap();
    }

    let rows = SensorReadingRepo::list_recent(&pool, None, 3).await.unwrap();
    assert_eq!(rows.len(), 3);
    // The three newest, oldest first.
    let temps: Vec<_> = rows.iter().map(|r| r.temperature.unwrap()).collect();
    assert_eq!(temps, vec![22.0, 21.0, 20.0]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_recent_respects_cutoff(pool: SqlitePool) {
    let now = Utc::now();
    SensorReadingRepo::insert(&pool, &reading_at(now - Duration::days(10), 19.0))
        .await
        .unwrap();
    SensorReadingRepo::insert(&pool, &reading_at(now - Duration::hours(1), 23.0))
        .await
        .unwrap();

    let rows = SensorReadingRepo::list_recent(&pool, Some(now - Duration::days(7)), 100)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].temperature, Some(23.0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_older_than_keeps_recent_rows(pool: SqlitePool) {
    let now = Utc::now();
    SensorReadingRepo::insert(&pool, &reading_at(now - Duration::days(40), 19.0))
        .await
        .unwrap();
    SensorReadingRepo::insert(&pool, &reading_at(now - Duration::days(31), 20.0))
        .await
        .unwrap();
    SensorReadingRepo::insert(&pool, &reading_at(now, 25.0)).await.unwrap();

    let deleted = SensorReadingRepo::delete_older_than(&pool, now - Duration::days(30))
        .await
        .unwrap();
    assert_eq!(deleted, 2);
    assert_eq!(SensorReadingRepo::count(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_all_reports_count(pool: SqlitePool) {
    let now = Utc::now();
    for _ in 0..3 {
        SensorReadingRepo::insert(&pool, &reading_at(now, 25.0)).await.unwrap();
    }
    assert_eq!(SensorReadingRepo::delete_all(&pool).await.unwrap(), 3);
    assert_eq!(SensorReadingRepo::delete_all(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_since_returns_every_row_in_range(pool: SqlitePool) {
    let now = Utc::now();
    for i in 0..4 {
        SensorReadingRepo::insert(&pool, &reading_at(now - Duration::days(i * 3), 20.0 + i as f64))
            .await
            .unwrap();
    }

    let all = SensorReadingRepo::list_since(&pool, None).await.unwrap();
    assert_eq!(all.len(), 4);
    assert_eq!(all[0].temperature, Some(23.0), "oldest first");

    let recent = SensorReadingRepo::list_since(&pool, Some(now - Duration::days(4)))
        .await
        .unwrap();
    assert_eq!(recent.len(), 2);
}
