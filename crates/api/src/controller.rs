//! HTTP client for the greenhouse controller board.
//!
//! The board exposes `POST /control/{device}`, `POST /control/curtain/{action}`
//! and `POST /emergency`. When no board URL is configured, commands are not
//! sent and callers record them as undelivered.

use std::time::Duration;

use greenhouse_core::control::ControlCommand;

/// Board requests that take longer than this are treated as failures.
const BOARD_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors from the controller board client.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// The HTTP request itself failed (network, DNS, timeout, etc.).
    #[error("Controller request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The board returned a non-2xx status code.
    #[error("Controller returned status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Outcome of dispatching a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The board acknowledged the command.
    Delivered,
    /// No board is configured; nothing was sent.
    NotConfigured,
}

impl Dispatch {
    pub fn delivered(self) -> bool {
        self == Dispatch::Delivered
    }
}

/// Sends [`ControlCommand`]s to the controller board.
#[derive(Debug, Clone)]
pub struct ControllerClient {
    client: reqwest::Client,
    base_url: Option<String>,
}

impl ControllerClient {
    /// Create a client for the board at `base_url` (e.g. `http://192.168.4.1`).
    pub fn new(base_url: Option<String>) -> Result<Self, ControllerError> {
        let client = reqwest::Client::builder().timeout(BOARD_TIMEOUT).build()?;
        Ok(Self { client, base_url })
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    /// Forward a command to the board.
    pub async fn send(&self, command: &ControlCommand) -> Result<Dispatch, ControllerError> {
        let Some(base_url) = &self.base_url else {
            tracing::debug!(
                target_device = command.target(),
                command = command.label(),
                "No controller configured, command not sent"
            );
            return Ok(Dispatch::NotConfigured);
        };

        let mut request = self
            .client
            .post(format!("{base_url}{}", command.board_path()));
        if let Some(body) = command.board_body() {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {e}>"));
            return Err(ControllerError::Status {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(
            target_device = command.target(),
            command = command.label(),
            "Command delivered to controller"
        );
        Ok(Dispatch::Delivered)
    }
}
