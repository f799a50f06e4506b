//! Sensor reading entity model and DTOs.

use greenhouse_core::history::HistoryRow;
use greenhouse_core::metrics::MetricId;
use greenhouse_core::reading::Reading;
use greenhouse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted sensor snapshot.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct SensorReading {
    pub id: DbId,
    pub recorded_at: Timestamp,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub light: Option<f64>,
    pub ec: Option<f64>,
    pub tds: Option<f64>,
    pub ph: Option<f64>,
    pub water_level: Option<f64>,
}

impl SensorReading {
    /// The classifiable metrics of this row (`tds` is not classified).
    pub fn reading(&self) -> Reading {
        Reading::new()
            .with(MetricId::Temperature, self.temperature)
            .with(MetricId::Humidity, self.humidity)
            .with(MetricId::Ph, self.ph)
            .with(MetricId::Ec, self.ec)
            .with(MetricId::WaterLevel, self.water_level)
            .with(MetricId::Light, self.light)
    }
}

impl From<&SensorReading> for HistoryRow {
    fn from(row: &SensorReading) -> Self {
        HistoryRow {
            recorded_at: row.recorded_at,
            temperature: row.temperature,
            humidity: row.humidity,
            light: row.light,
            ec: row.ec,
            tds: row.tds,
            ph: row.ph,
            water_level: row.water_level,
        }
    }
}

/// DTO for inserting a reading. Sensors that did not report are omitted.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CreateSensorReading {
    /// Capture time; the server clock is used when absent.
    #[serde(default)]
    pub recorded_at: Option<Timestamp>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub light: Option<f64>,
    pub ec: Option<f64>,
    pub tds: Option<f64>,
    pub ph: Option<f64>,
    pub water_level: Option<f64>,
}

impl CreateSensorReading {
    /// Whether at least one sensor value is present.
    pub fn has_values(&self) -> bool {
        [
            self.temperature,
            self.humidity,
            self.light,
            self.ec,
            self.tds,
            self.ph,
            self.water_level,
        ]
        .iter()
        .any(Option::is_some)
    }
}
