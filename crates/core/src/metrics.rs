//! Sensor metric catalog and threshold band configuration.
//!
//! The greenhouse tracks a fixed set of metrics. Each metric has a display
//! name, a unit, and a default [`MetricBand`] describing its acceptable range.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Metric catalog
// ---------------------------------------------------------------------------

/// A tracked sensor metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricId {
    Temperature,
    Humidity,
    Ph,
    Ec,
    WaterLevel,
    Light,
}

impl MetricId {
    /// Every tracked metric, in display order.
    pub const ALL: [MetricId; 6] = [
        MetricId::Temperature,
        MetricId::Humidity,
        MetricId::Ph,
        MetricId::Ec,
        MetricId::WaterLevel,
        MetricId::Light,
    ];

    /// Canonical snake_case identifier (matches the JSON field names).
    pub fn as_str(self) -> &'static str {
        match self {
            MetricId::Temperature => "temperature",
            MetricId::Humidity => "humidity",
            MetricId::Ph => "ph",
            MetricId::Ec => "ec",
            MetricId::WaterLevel => "water_level",
            MetricId::Light => "light",
        }
    }

    /// Human-readable name shown in alert messages.
    pub fn display_name(self) -> &'static str {
        match self {
            MetricId::Temperature => "Temperature",
            MetricId::Humidity => "Humidity",
            MetricId::Ph => "pH",
            MetricId::Ec => "EC",
            MetricId::WaterLevel => "Water Level",
            MetricId::Light => "Light",
        }
    }

    /// Unit suffix for values of this metric (empty for pH).
    pub fn unit(self) -> &'static str {
        match self {
            MetricId::Temperature => "°C",
            MetricId::Humidity => "%",
            MetricId::Ph => "",
            MetricId::Ec => "mS/cm",
            MetricId::WaterLevel => "cm",
            MetricId::Light => "lux",
        }
    }

    /// Factory-default band for this metric.
    pub fn default_band(self) -> MetricBand {
        match self {
            MetricId::Temperature => MetricBand::range(20.0, 30.0),
            MetricId::Humidity => MetricBand::range(60.0, 80.0),
            MetricId::Ph => MetricBand::range(5.5, 7.5),
            MetricId::Ec => MetricBand::range(1.0, 2.5),
            MetricId::WaterLevel => MetricBand::at_least(5.0),
            MetricId::Light => MetricBand::at_least(200.0),
        }
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricId::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown metric: {s}")))
    }
}

// ---------------------------------------------------------------------------
// Bands
// ---------------------------------------------------------------------------

/// Width of the warning zone inside each edge of a two-sided band.
pub const RANGE_WARNING_MARGIN: f64 = 2.0;

/// Width of the warning zone above the bound of a lower-bound-only band.
pub const LOWER_BOUND_WARNING_MARGIN: f64 = 10.0;

/// Acceptable range for a metric: a lower bound, an upper bound, or both.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricBand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl MetricBand {
    /// A two-sided band `[min, max]`.
    pub fn range(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// A lower-bound-only band `[min, ∞)`.
    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Check that the band is something the classifier can evaluate.
    ///
    /// Accepts two-sided bands with `min <= max` and lower-bound-only bands.
    /// Bounds must be finite.
    pub fn validate(&self, metric: MetricId) -> Result<(), CoreError> {
        for bound in [self.min, self.max].into_iter().flatten() {
            if !bound.is_finite() {
                return Err(CoreError::Validation(format!(
                    "{metric} band bounds must be finite numbers"
                )));
            }
        }
        match (self.min, self.max) {
            (None, None) => Err(CoreError::Configuration(format!(
                "{metric} band must set at least a min bound"
            ))),
            (None, Some(_)) => Err(CoreError::Configuration(format!(
                "{metric} band with only a max bound is not supported"
            ))),
            (Some(min), Some(max)) if min > max => Err(CoreError::Validation(format!(
                "{metric} band min ({min}) must not exceed max ({max})"
            ))),
            _ => Ok(()),
        }
    }

    /// Whether the two warning margins of a two-sided band touch or cross.
    ///
    /// Such bands are still classified as configured: the warning zone covers
    /// the whole band and no value inside it is `Normal`.
    pub fn has_overlapping_margins(&self) -> bool {
        match (self.min, self.max) {
            (Some(min), Some(max)) => max - min <= 2.0 * RANGE_WARNING_MARGIN,
            _ => false,
        }
    }

    /// Describe the acceptable range, e.g. `normal: 20-30°C`.
    pub fn describe(&self, unit: &str) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("normal: {min}-{max}{unit}"),
            (Some(min), None) => format!("below threshold: {min}{unit}"),
            (None, Some(max)) => format!("above threshold: {max}{unit}"),
            (None, None) => "no threshold".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Threshold configuration
// ---------------------------------------------------------------------------

/// One band per catalog metric.
///
/// Serialized as `{"temperature": {"min": 20, "max": 30}, ...}`. Missing
/// metrics fall back to their default bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    pub temperature: MetricBand,
    pub humidity: MetricBand,
    pub ph: MetricBand,
    pub ec: MetricBand,
    pub water_level: MetricBand,
    pub light: MetricBand,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            temperature: MetricId::Temperature.default_band(),
            humidity: MetricId::Humidity.default_band(),
            ph: MetricId::Ph.default_band(),
            ec: MetricId::Ec.default_band(),
            water_level: MetricId::WaterLevel.default_band(),
            light: MetricId::Light.default_band(),
        }
    }
}

impl ThresholdConfig {
    /// The configured band for `metric`.
    pub fn band(&self, metric: MetricId) -> &MetricBand {
        match metric {
            MetricId::Temperature => &self.temperature,
            MetricId::Humidity => &self.humidity,
            MetricId::Ph => &self.ph,
            MetricId::Ec => &self.ec,
            MetricId::WaterLevel => &self.water_level,
            MetricId::Light => &self.light,
        }
    }

    /// Validate every band. Returns the first failure.
    pub fn validate(&self) -> Result<(), CoreError> {
        MetricId::ALL
            .into_iter()
            .try_for_each(|m| self.band(m).validate(m))
    }

    /// Metrics whose two-sided band is too narrow for separate warning zones.
    pub fn overlapping_margin_metrics(&self) -> Vec<MetricId> {
        MetricId::ALL
            .into_iter()
            .filter(|m| self.band(*m).has_overlapping_margins())
            .collect()
    }
}
