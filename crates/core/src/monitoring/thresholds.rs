//! Threshold classifier for greenhouse sensor metrics.
//!
//! Pure logic: maps a value and its configured band to a [`Severity`].

use serde::Serialize;

use crate::alert::Severity;
use crate::metrics::{
    MetricBand, MetricId, ThresholdConfig, LOWER_BOUND_WARNING_MARGIN, RANGE_WARNING_MARGIN,
};
use crate::reading::Reading;

/// Classify `value` against `band`.
///
/// - Two-sided band: `Critical` outside `[min, max]`, `Warning` within
///   [`RANGE_WARNING_MARGIN`] of either edge, otherwise `Normal`.
/// - Lower-bound-only band: `Critical` below `min`, `Warning` below
///   `min + LOWER_BOUND_WARNING_MARGIN`, otherwise `Normal`.
///
/// Narrow two-sided bands are not clamped: when the margins overlap, every
/// in-band value is a `Warning`. Bands rejected by [`MetricBand::validate`]
/// classify as `Normal`.
pub fn classify(value: f64, band: &MetricBand) -> Severity {
    match (band.min, band.max) {
        (Some(min), Some(max)) => {
            if value < min || value > max {
                Severity::Critical
            } else if value < min + RANGE_WARNING_MARGIN || value > max - RANGE_WARNING_MARGIN {
                Severity::Warning
            } else {
                Severity::Normal
            }
        }
        (Some(min), None) => {
            if value < min {
                Severity::Critical
            } else if value < min + LOWER_BOUND_WARNING_MARGIN {
                Severity::Warning
            } else {
                Severity::Normal
            }
        }
        _ => Severity::Normal,
    }
}

/// Classification result for one metric of a reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricStatus {
    pub metric: MetricId,
    pub value: f64,
    pub severity: Severity,
}

/// Classify every reported metric of `reading`, in catalog order.
pub fn evaluate_reading(reading: &Reading, config: &ThresholdConfig) -> Vec<MetricStatus> {
    reading
        .iter()
        .map(|(metric, value)| MetricStatus {
            metric,
            value,
            severity: classify(value, config.band(metric)),
        })
        .collect()
}

/// Per-severity counts for the status summary badges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub normal: usize,
    pub warning: usize,
    pub critical: usize,
}

impl StatusSummary {
    pub fn from_statuses(statuses: &[MetricStatus]) -> Self {
        statuses
            .iter()
            .fold(Self::default(), |mut acc, s| {
                match s.severity {
                    Severity::Normal => acc.normal += 1,
                    Severity::Warning => acc.warning += 1,
                    Severity::Critical => acc.critical += 1,
                }
                acc
            })
    }

    /// The worst severity present, or `Normal` when nothing was classified.
    pub fn overall(&self) -> Severity {
        if self.critical > 0 {
            Severity::Critical
        } else if self.warning > 0 {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
