//! Sensor snapshots read from the controller board.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ensure_success, PollError};

/// Board requests that take longer than this count as a failed fetch.
const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// One `GET /sensors` response.
///
/// Every field is optional: sensors that are missing or faulty are simply
/// omitted by the board firmware. Older firmware uses `waterTemp`, `pH` and
/// `waterLevel`, which are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    #[serde(default, alias = "waterTemp", skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(default, alias = "pH", skip_serializing_if = "Option::is_none")]
    pub ph: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ec: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tds: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<f64>,
    #[serde(default, alias = "waterLevel", skip_serializing_if = "Option::is_none")]
    pub water_level: Option<f64>,
}

impl BoardSnapshot {
    /// Whether at least one sensor reported a value.
    pub fn has_values(&self) -> bool {
        [
            self.temperature,
            self.humidity,
            self.ph,
            self.ec,
            self.tds,
            self.light,
            self.water_level,
        ]
        .iter()
        .any(Option::is_some)
    }
}

/// HTTP client for the board's sensor endpoint.
#[derive(Debug, Clone)]
pub struct BoardClient {
    client: reqwest::Client,
    base_url: String,
}

impl BoardClient {
    /// * `base_url` - e.g. `http://192.168.4.1`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, PollError> {
        let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the current sensor snapshot.
    pub async fn fetch(&self) -> Result<BoardSnapshot, PollError> {
        let response = self
            .client
            .get(format!("{}/sensors", self.base_url))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let snapshot: BoardSnapshot = ensure_success("board", response).await?.json().await?;

        if !snapshot.has_values() {
            return Err(PollError::EmptySnapshot);
        }
        Ok(snapshot)
    }
}
