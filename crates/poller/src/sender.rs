//! Pushes board snapshots to the greenhouse API.

use std::time::Duration;

use serde::Deserialize;

use crate::board::BoardSnapshot;
use crate::{ensure_success, PollError};

const PUSH_TIMEOUT: Duration = Duration::from_secs(10);

/// What the API reports back for an ingested reading.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestSummary {
    /// Id of the stored reading.
    pub id: i64,
    /// Number of alerts newly recorded for this reading.
    pub new_alerts: usize,
}

#[derive(Deserialize)]
struct IngestEnvelope {
    data: IngestData,
}

#[derive(Deserialize)]
struct IngestData {
    reading: IngestedReading,
    #[serde(default)]
    alerts: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct IngestedReading {
    id: i64,
}

/// HTTP client for `POST {api_url}/api/data`.
#[derive(Debug, Clone)]
pub struct ApiSender {
    client: reqwest::Client,
    api_url: String,
}

impl ApiSender {
    /// * `api_url` - base URL of the API server, e.g. `http://localhost:3000`.
    pub fn new(api_url: impl Into<String>) -> Result<Self, PollError> {
        let client = reqwest::Client::builder().timeout(PUSH_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub async fn push(&self, snapshot: &BoardSnapshot) -> Result<IngestSummary, PollError> {
        let response = self
            .client
            .post(format!("{}/api/data", self.api_url))
            .json(snapshot)
            .send()
            .await?;
        let envelope: IngestEnvelope = ensure_success("api", response).await?.json().await?;

        Ok(IngestSummary {
            id: envelope.data.reading.id,
            new_alerts: envelope.data.alerts.len(),
        })
    }
}
