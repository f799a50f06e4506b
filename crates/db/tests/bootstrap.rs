use sqlx::SqlitePool;

/// Connect, migrate, verify schema and seed data.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: SqlitePool) {
    greenhouse_db::health_check(&pool).await.unwrap();

    for table in ["sensor_readings", "settings", "device_states", "control_commands"] {
        let exists: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
        )
        .bind(table)
        .fetch_one(&pool)
        .await
        .unwrap_or_else(|e| panic!("{table} lookup failed: {e}"));
        assert_eq!(exists.0, 1, "{table} should exist");
    }

    let devices: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM device_states")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(devices.0, 5, "every switchable device should be seeded");
}
