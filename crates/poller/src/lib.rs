//! `greenhouse-poller` library crate.
//!
//! Re-exports internal modules for integration testing. The binary
//! entrypoint lives in `main.rs`.

pub mod board;
pub mod poller;
pub mod sender;
pub mod status;

/// Errors from a single poll cycle.
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    /// The HTTP request itself failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote side returned a non-2xx status code.
    #[error("{service} returned status {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// The board answered but reported no sensor values.
    #[error("Board reported no sensor values")]
    EmptySnapshot,
}

/// Turn a non-2xx response into [`PollError::Status`].
pub(crate) async fn ensure_success(
    service: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, PollError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|e| format!("<failed to read body: {e}>"));
    Err(PollError::Status {
        service,
        status: status.as_u16(),
        body,
    })
}
