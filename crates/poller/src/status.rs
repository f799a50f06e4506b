//! Board connectivity tracking.

use serde::Serialize;

/// Whether the last fetch from the board succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
}

/// Remembers the last connection status and reports transitions only.
#[derive(Debug, Default)]
pub struct ConnectionTracker {
    current: Option<ConnectionStatus>,
}

impl ConnectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` until the first poll completes.
    pub fn current(&self) -> Option<ConnectionStatus> {
        self.current
    }

    /// Record the outcome of a fetch. Returns the new status if it changed.
    pub fn update(&mut self, status: ConnectionStatus) -> Option<ConnectionStatus> {
        if self.current == Some(status) {
            return None;
        }
        self.current = Some(status);
        Some(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_only_transitions() {
        let mut tracker = ConnectionTracker::new();
        assert_eq!(tracker.current(), None);
        assert_eq!(
            tracker.update(ConnectionStatus::Connected),
            Some(ConnectionStatus::Connected)
        );
        assert_eq!(tracker.update(ConnectionStatus::Connected), None);
        assert_eq!(
            tracker.update(ConnectionStatus::Disconnected),
            Some(ConnectionStatus::Disconnected)
        );
        assert_eq!(tracker.update(ConnectionStatus::Disconnected), None);
        assert_eq!(tracker.current(), Some(ConnectionStatus::Disconnected));
    }

    #[test]
    fn first_failure_is_a_transition() {
        let mut tracker = ConnectionTracker::new();
        assert_eq!(
            tracker.update(ConnectionStatus::Disconnected),
            Some(ConnectionStatus::Disconnected)
        );
    }
}
