//! The fetch-and-push loop.
//!
//! Every interval: fetch `/sensors` from the board, push the snapshot to the
//! API. Board failures only change the connection status; they never produce
//! alerts.

use std::time::Duration;

use crate::board::BoardClient;
use crate::sender::{ApiSender, IngestSummary};
use crate::status::{ConnectionStatus, ConnectionTracker};
use crate::PollError;

/// Outcome of one poll cycle.
#[derive(Debug)]
pub enum PollOutcome {
    /// The snapshot was fetched and ingested.
    Ingested(IngestSummary),
    /// The board could not be read.
    BoardUnavailable(PollError),
    /// The snapshot was fetched but the API rejected it or was unreachable.
    PushFailed(PollError),
}

pub struct Poller {
    board: BoardClient,
    sender: ApiSender,
    tracker: ConnectionTracker,
}

impl Poller {
    pub fn new(board: BoardClient, sender: ApiSender) -> Self {
        Self {
            board,
            sender,
            tracker: ConnectionTracker::new(),
        }
    }

    pub fn status(&self) -> Option<ConnectionStatus> {
        self.tracker.current()
    }

    /// Run one fetch + push cycle.
    pub async fn poll_once(&mut self) -> PollOutcome {
        let snapshot = match self.board.fetch().await {
            Ok(snapshot) => {
                self.set_status(ConnectionStatus::Connected);
                snapshot
            }
            Err(e) => {
                self.set_status(ConnectionStatus::Disconnected);
                tracing::debug!(error = %e, "Sensor fetch failed");
                return PollOutcome::BoardUnavailable(e);
            }
        };

        match self.sender.push(&snapshot).await {
            Ok(summary) => {
                tracing::debug!(
                    reading_id = summary.id,
                    new_alerts = summary.new_alerts,
                    "Reading pushed"
                );
                if summary.new_alerts > 0 {
                    tracing::info!(new_alerts = summary.new_alerts, "API recorded new alerts");
                }
                PollOutcome::Ingested(summary)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to push reading to API");
                PollOutcome::PushFailed(e)
            }
        }
    }

    /// Poll on a fixed interval. Never returns.
    pub async fn run(mut self, interval: Duration) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.poll_once().await;
        }
    }

    fn set_status(&mut self, status: ConnectionStatus) {
        match self.tracker.update(status) {
            Some(ConnectionStatus::Connected) => {
                tracing::info!(board = %self.board.base_url(), "Board connected");
            }
            Some(ConnectionStatus::Disconnected) => {
                tracing::warn!(board = %self.board.base_url(), "Board disconnected");
            }
            None => {}
        }
    }
}
