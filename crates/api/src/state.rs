use std::sync::Arc;

use greenhouse_core::metrics::ThresholdConfig;
use greenhouse_core::monitoring::recorder::AlertRecorder;
use tokio::sync::{Mutex, RwLock};

use crate::config::ServerConfig;
use crate::controller::{ControllerClient, ControllerError};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind an `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: greenhouse_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The alert log. Suppression check and insert must happen under one
    /// lock acquisition.
    pub recorder: Arc<Mutex<AlertRecorder>>,
    /// Live threshold bands, replaced when the thresholds section is saved.
    pub thresholds: Arc<RwLock<ThresholdConfig>>,
    /// Controller board client.
    pub controller: ControllerClient,
}

impl AppState {
    /// Build the state from a pool, configuration and initial thresholds.
    pub fn new(
        pool: greenhouse_db::DbPool,
        config: ServerConfig,
        thresholds: ThresholdConfig,
    ) -> Result<Self, ControllerError> {
        let recorder = AlertRecorder::new(
            config.alert_log_capacity,
            chrono::Duration::seconds(config.alert_suppression_secs),
        );
        let controller = ControllerClient::new(config.controller_url.clone())?;

        Ok(Self {
            pool,
            config: Arc::new(config),
            recorder: Arc::new(Mutex::new(recorder)),
            thresholds: Arc::new(RwLock::new(thresholds)),
            controller,
        })
    }
}
