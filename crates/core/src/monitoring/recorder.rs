//! Alert recorder: suppresses repeat alerts and keeps a bounded alert log.
//!
//! Pure logic. The caller passes in the current time, and is responsible for
//! serializing access when several tasks share one recorder (e.g. behind an
//! `Arc<Mutex<AlertRecorder>>`), so the suppression check and the insert
//! happen atomically.

use std::collections::VecDeque;

use chrono::Duration;

use crate::alert::{AlertEntry, Severity};
use crate::metrics::{MetricBand, MetricId, ThresholdConfig};
use crate::monitoring::thresholds::evaluate_reading;
use crate::reading::Reading;
use crate::types::Timestamp;

/// Default maximum number of entries kept in the alert log.
pub const DEFAULT_CAPACITY: usize = 50;

/// Default suppression window for repeat alerts, in seconds (5 minutes).
pub const DEFAULT_SUPPRESSION_SECS: i64 = 300;

/// Owns the alert log.
///
/// The log is newest-first and never holds more than `capacity` entries.
/// A violation is only recorded when no entry for the same metric and
/// severity exists within the suppression window.
#[derive(Debug, Clone)]
pub struct AlertRecorder {
    log: VecDeque<AlertEntry>,
    capacity: usize,
    window: Duration,
}

impl Default for AlertRecorder {
    fn default() -> Self {
        Self::new(
            DEFAULT_CAPACITY,
            Duration::seconds(DEFAULT_SUPPRESSION_SECS),
        )
    }
}

impl AlertRecorder {
    /// Create an empty recorder with the given log capacity and suppression
    /// window.
    pub fn new(capacity: usize, window: Duration) -> Self {
        Self {
            log: VecDeque::with_capacity(capacity),
            capacity,
            window,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record a violation unless an equivalent one is already in the window.
    ///
    /// Returns the new entry, or `None` when the occurrence was suppressed
    /// (or `severity` is `Normal`). Suppression leaves the log untouched.
    pub fn record_if_new(
        &mut self,
        metric: MetricId,
        value: f64,
        band: &MetricBand,
        unit: &str,
        severity: Severity,
        now: Timestamp,
    ) -> Option<AlertEntry> {
        if !severity.is_alert() || self.is_suppressed(metric, severity, now) {
            return None;
        }

        let entry = AlertEntry {
            metric,
            name: metric.display_name().to_string(),
            value,
            band: *band,
            unit: unit.to_string(),
            severity,
            timestamp: now,
        };

        // Newest first even if the clock stepped backwards.
        let position = self
            .log
            .iter()
            .position(|existing| existing.timestamp <= now)
            .unwrap_or(self.log.len());
        self.log.insert(position, entry.clone());
        self.log.truncate(self.capacity);
        Some(entry)
    }

    /// Classify every metric in `reading` and record each non-normal result.
    ///
    /// Returns only the entries that were actually recorded.
    pub fn observe(
        &mut self,
        reading: &Reading,
        config: &ThresholdConfig,
        now: Timestamp,
    ) -> Vec<AlertEntry> {
        evaluate_reading(reading, config)
            .into_iter()
            .filter(|status| status.severity.is_alert())
            .filter_map(|status| {
                self.record_if_new(
                    status.metric,
                    status.value,
                    config.band(status.metric),
                    status.metric.unit(),
                    status.severity,
                    now,
                )
            })
            .collect()
    }

    /// Copy of the log, newest first.
    pub fn snapshot(&self) -> Vec<AlertEntry> {
        self.log.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Drop every entry. Idempotent.
    pub fn clear(&mut self) {
        self.log.clear();
    }

    fn is_suppressed(&self, metric: MetricId, severity: Severity, now: Timestamp) -> bool {
        self.log.iter().any(|entry| {
            entry.metric == metric
                && entry.severity == severity
                && (Duration::zero()..self.window)
                    .contains(&now.signed_duration_since(entry.timestamp))
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
