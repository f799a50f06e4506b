//! Integration tests for the settings endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use greenhouse_api::router::build_app_router;
use greenhouse_api::settings_store::load_settings;
use serde_json::json;
use sqlx::SqlitePool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn defaults_are_returned_when_nothing_is_stored(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/settings").await).await;
    let data = &json["data"];

    assert_eq!(data["thresholds"]["temperature"], json!({"min": 20.0, "max": 30.0}));
    assert_eq!(data["thresholds"]["light"], json!({"min": 200.0}));
    assert_eq!(data["plant_profile"]["farm_name"], "Hydroponic Farm");
    assert_eq!(data["auto_control"]["auto_buzzer"], true);
    assert_eq!(data["system"]["data_retention_days"], 30);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn saving_thresholds_changes_live_classification(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let response = put_json(
        app.clone(),
        "/api/settings/thresholds",
        json!({"temperature": {"min": 10.0, "max": 40.0}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // 19 °C is critical under the defaults but normal under the new band.
    let json = body_json(post_json(app.clone(), "/api/data", json!({"temperature": 19.0})).await).await;
    assert_eq!(json["data"]["statuses"][0]["severity"], "normal");
    assert_eq!(json["data"]["alerts"], json!([]));

    let stored = body_json(get(app, "/api/settings").await).await;
    assert_eq!(
        stored["data"]["thresholds"]["temperature"],
        json!({"min": 10.0, "max": 40.0})
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_thresholds_are_rejected(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let upper_only = put_json(
        app.clone(),
        "/api/settings/thresholds",
        json!({"light": {"max": 1000.0}}),
    )
    .await;
    assert_eq!(upper_only.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(upper_only).await["code"], "CONFIGURATION_ERROR");

    let inverted = put_json(
        app.clone(),
        "/api/settings/thresholds",
        json!({"humidity": {"min": 90.0, "max": 50.0}}),
    )
    .await;
    assert_eq!(inverted.status(), StatusCode::BAD_REQUEST);

    let stored = body_json(get(app, "/api/settings").await).await;
    assert_eq!(stored["data"]["thresholds"]["light"], json!({"min": 200.0}));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn plant_profile_and_system_sections_are_validated(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let ok = put_json(
        app.clone(),
        "/api/settings/plant-profile",
        json!({"farm_name": "North Bay", "plant_type": "basil", "plant_date": "2024-05-01"}),
    )
    .await;
    assert_eq!(ok.status(), StatusCode::OK);
    let json = body_json(ok).await;
    assert_eq!(json["data"]["plant_profile"]["plant_type"], "basil");

    let blank = put_json(
        app.clone(),
        "/api/settings/plant-profile",
        json!({"farm_name": " ", "plant_type": "basil"}),
    )
    .await;
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);

    let system = put_json(
        app.clone(),
        "/api/settings/system",
        json!({"update_interval_secs": 10, "data_retention_days": 0}),
    )
    .await;
    assert_eq!(system.status(), StatusCode::BAD_REQUEST);

    let auto = put_json(
        app,
        "/api/settings/auto-control",
        json!({"auto_water": true}),
    )
    .await;
    let json = body_json(auto).await;
    assert_eq!(json["data"]["auto_control"]["auto_water"], true);
    assert_eq!(json["data"]["auto_control"]["auto_buzzer"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reset_restores_defaults_and_live_thresholds(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    put_json(
        app.clone(),
        "/api/settings/thresholds",
        json!({"temperature": {"min": 10.0, "max": 40.0}}),
    )
    .await;

    let reset = delete(app.clone(), "/api/settings").await;
    assert_eq!(reset.status(), StatusCode::OK);

    let json = body_json(post_json(app, "/api/data", json!({"temperature": 19.0})).await).await;
    assert_eq!(json["data"]["statuses"][0]["severity"], "critical");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_threshold_saves_keep_live_and_stored_in_sync(pool: SqlitePool) {
    let config = common::test_config();
    let state = common::build_test_state(pool.clone(), config.clone());
    let app = build_app_router(state.clone(), &config);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let app = app.clone();
            let max = 30.0 + f64::from(i);
            tokio::spawn(async move {
                let response = put_json(
                    app,
                    "/api/settings/thresholds",
                    json!({"temperature": {"min": 20.0, "max": max}}),
                )
                .await;
                assert_eq!(response.status(), StatusCode::OK);
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    let stored = load_settings(&pool).await.unwrap();
    assert_eq!(*state.thresholds.read().await, stored.thresholds);
}
