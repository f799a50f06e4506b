//! Alert types produced by threshold evaluation.

use serde::{Deserialize, Serialize};

use crate::metrics::{MetricBand, MetricId};
use crate::types::Timestamp;

/// Classification outcome for a single metric value.
///
/// Ordered `Normal < Warning < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Value is comfortably inside its band.
    Normal,
    /// Value is inside its band but within the warning margin of an edge.
    Warning,
    /// Value is outside its band.
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }

    pub fn is_alert(self) -> bool {
        self != Severity::Normal
    }
}

/// A recorded threshold violation.
///
/// Created only by [`AlertRecorder`](crate::monitoring::recorder::AlertRecorder)
/// and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertEntry {
    pub metric: MetricId,
    /// Human-readable metric name.
    pub name: String,
    /// The observed value that triggered the alert.
    pub value: f64,
    /// The band the value was classified against.
    pub band: MetricBand,
    pub unit: String,
    pub severity: Severity,
    /// When the violation was observed.
    pub timestamp: Timestamp,
}

impl AlertEntry {
    /// Render the alert as a single line, e.g.
    /// `Temperature: 19.0°C (normal: 20-30°C)`.
    pub fn message(&self) -> String {
        format!(
            "{}: {:.1}{} ({})",
            self.name,
            self.value,
            self.unit,
            self.band.describe(&self.unit)
        )
    }
}
