//! Integration tests for device control.
//!
//! Covers the no-controller mode (commands logged as undelivered), a fake
//! board that accepts commands, and an unreachable board.

mod common;

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use common::{body_json, get, post_empty, post_json};
use greenhouse_api::config::ServerConfig;
use serde_json::json;
use sqlx::SqlitePool;

type Received = Arc<Mutex<Vec<(String, Option<serde_json::Value>)>>>;

/// Start a fake controller board on an ephemeral port. Returns its base URL
/// and the list of requests it received.
async fn spawn_fake_board() -> (String, Received) {
    let received: Received = Arc::default();

    async fn switch(
        State(received): State<Received>,
        Path(device): Path<String>,
        Json(body): Json<serde_json::Value>,
    ) -> StatusCode {
        received
            .lock()
            .unwrap()
            .push((format!("/control/{device}"), Some(body)));
        StatusCode::OK
    }

    async fn curtain(State(received): State<Received>, Path(action): Path<String>) -> StatusCode {
        received
            .lock()
            .unwrap()
            .push((format!("/control/curtain/{action}"), None));
        StatusCode::OK
    }

    async fn emergency(State(received): State<Received>) -> StatusCode {
        received.lock().unwrap().push(("/emergency".into(), None));
        StatusCode::OK
    }

    let board = Router::new()
        .route("/control/curtain/{action}", post(curtain))
        .route("/control/{device}", post(switch))
        .route("/emergency", post(emergency))
        .with_state(received.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, board).await.unwrap();
    });

    (format!("http://{addr}"), received)
}

fn config_with_controller(url: &str) -> ServerConfig {
    ServerConfig {
        controller_url: Some(url.to_string()),
        ..common::test_config()
    }
}

fn device_is_on(devices: &serde_json::Value, name: &str) -> bool {
    devices
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["device"] == name)
        .map(|d| d["is_on"].as_bool().unwrap())
        .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn switch_without_controller_updates_state_and_logs_undelivered(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let response = post_json(app.clone(), "/api/control/fan", json!({"state": 1})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["command"]["target"], "fan");
    assert_eq!(json["data"]["command"]["command"], "on");
    assert_eq!(json["data"]["command"]["delivered"], false);
    assert!(device_is_on(&json["data"]["devices"], "fan"));

    let status = body_json(get(app, "/api/control/status").await).await;
    assert!(device_is_on(&status["data"]["devices"], "fan"));
    assert!(!device_is_on(&status["data"]["devices"], "led"));
    assert_eq!(status["data"]["controller_configured"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_device_or_state_is_rejected(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let unknown = post_json(app.clone(), "/api/control/heater", json!({"state": 1})).await;
    assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(unknown).await["code"], "VALIDATION_ERROR");

    let bad_state = post_json(app.clone(), "/api/control/led", json!({"state": 2})).await;
    assert_eq!(bad_state.status(), StatusCode::BAD_REQUEST);

    let bad_action = post_empty(app.clone(), "/api/control/curtain/half").await;
    assert_eq!(bad_action.status(), StatusCode::BAD_REQUEST);

    let log = body_json(get(app, "/api/control/commands").await).await;
    assert_eq!(log["data"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn curtain_command_sets_curtain_status(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let response = post_empty(app.clone(), "/api/control/curtain/open").await;
    assert_eq!(response.status(), StatusCode::OK);

    let status = body_json(get(app, "/api/control/status").await).await;
    assert_eq!(status["data"]["curtain"], "open");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn emergency_stop_turns_everything_off(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    post_json(app.clone(), "/api/control/pump_water", json!({"state": 1})).await;
    post_json(app.clone(), "/api/control/led", json!({"state": 1})).await;

    let response = post_empty(app.clone(), "/api/emergency").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["command"]["target"], "all");
    assert_eq!(json["data"]["command"]["command"], "emergency_stop");
    assert!(json["data"]["devices"]
        .as_array()
        .unwrap()
        .iter()
        .all(|d| d["is_on"] == false));

    let log = body_json(get(app, "/api/control/commands?limit=2").await).await;
    let commands = log["data"].as_array().unwrap();
    assert_eq!(commands.len(), 2);
    assert_eq!(commands[0]["command"], "emergency_stop");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn commands_are_forwarded_to_the_board(pool: SqlitePool) {
    let (board_url, received) = spawn_fake_board().await;
    let app = common::build_test_app_with(pool, config_with_controller(&board_url));

    let json = body_json(post_json(app.clone(), "/api/control/pump_humidity", json!({"state": 1})).await).await;
    assert_eq!(json["data"]["command"]["delivered"], true);

    post_empty(app.clone(), "/api/control/curtain/close").await;
    post_empty(app, "/api/emergency").await;

    let received = received.lock().unwrap().clone();
    assert_eq!(
        received,
        vec![
            ("/control/pump_humidity".to_string(), Some(json!({"state": 1}))),
            ("/control/curtain/close".to_string(), None),
            ("/emergency".to_string(), None),
        ]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unreachable_board_returns_502_and_keeps_state(pool: SqlitePool) {
    // Nothing listens on port 1.
    let app = common::build_test_app_with(pool, config_with_controller("http://127.0.0.1:1"));

    let response = post_json(app.clone(), "/api/control/fan", json!({"state": 1})).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["code"], "CONTROLLER_UNAVAILABLE");

    let status = body_json(get(app.clone(), "/api/control/status").await).await;
    assert!(!device_is_on(&status["data"]["devices"], "fan"));

    let log = body_json(get(app, "/api/control/commands").await).await;
    assert_eq!(log["data"][0]["delivered"], false);
}
