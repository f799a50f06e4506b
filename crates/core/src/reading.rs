//! Sensor reading snapshots as seen by the classifier.

use std::collections::BTreeMap;

use crate::metrics::MetricId;

/// One sensor snapshot: the value of each metric that reported.
///
/// Metrics that did not report are simply absent. Non-finite values are
/// dropped on insert so the classifier only ever sees real numbers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reading {
    values: BTreeMap<MetricId, f64>,
}

impl Reading {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a metric value, ignoring NaN and infinities.
    pub fn set(&mut self, metric: MetricId, value: f64) {
        if value.is_finite() {
            self.values.insert(metric, value);
        }
    }

    /// Builder form of [`Reading::set`] that also accepts missing values.
    pub fn with(mut self, metric: MetricId, value: Option<f64>) -> Self {
        if let Some(v) = value {
            self.set(metric, v);
        }
        self
    }

    pub fn get(&self, metric: MetricId) -> Option<f64> {
        self.values.get(&metric).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Reported metrics in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (MetricId, f64)> + '_ {
        self.values.iter().map(|(m, v)| (*m, *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_values_are_dropped() {
        let reading = Reading::new()
            .with(MetricId::Temperature, Some(f64::NAN))
            .with(MetricId::Humidity, Some(70.0))
            .with(MetricId::Ph, None);
        assert_eq!(reading.get(MetricId::Temperature), None);
        assert_eq!(reading.get(MetricId::Humidity), Some(70.0));
        assert_eq!(reading.iter().count(), 1);
    }

    #[test]
    fn iteration_follows_catalog_order() {
        let reading = Reading::new()
            .with(MetricId::Light, Some(300.0))
            .with(MetricId::Temperature, Some(25.0));
        let order: Vec<_> = reading.iter().map(|(m, _)| m).collect();
        assert_eq!(order, vec![MetricId::Temperature, MetricId::Light]);
    }
}
