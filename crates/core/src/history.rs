//! Sensor history filtering, statistics and CSV export.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, SecondsFormat};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Periods
// ---------------------------------------------------------------------------

/// Time window used to filter the history view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryPeriod {
    #[default]
    All,
    Today,
    Week,
    Month,
}

impl HistoryPeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            HistoryPeriod::All => "all",
            HistoryPeriod::Today => "today",
            HistoryPeriod::Week => "week",
            HistoryPeriod::Month => "month",
        }
    }

    /// Earliest timestamp included in the period, or `None` for `All`.
    ///
    /// Periods are anchored at the start of the current UTC day: `week` and
    /// `month` reach back 7 and 30 days from that midnight.
    pub fn cutoff(self, now: Timestamp) -> Option<Timestamp> {
        let midnight = now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc())?;
        match self {
            HistoryPeriod::All => None,
            HistoryPeriod::Today => Some(midnight),
            HistoryPeriod::Week => Some(midnight - Duration::days(7)),
            HistoryPeriod::Month => Some(midnight - Duration::days(30)),
        }
    }
}

impl fmt::Display for HistoryPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryPeriod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(HistoryPeriod::All),
            "today" => Ok(HistoryPeriod::Today),
            "week" => Ok(HistoryPeriod::Week),
            "month" => Ok(HistoryPeriod::Month),
            other => Err(CoreError::Validation(format!(
                "Unknown period '{other}', expected one of: all, today, week, month"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// One persisted reading as used by the history view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRow {
    pub recorded_at: Timestamp,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub light: Option<f64>,
    pub ec: Option<f64>,
    pub tds: Option<f64>,
    pub ph: Option<f64>,
    pub water_level: Option<f64>,
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// Summary figures for a set of history rows.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct HistoryStats {
    pub total_records: usize,
    pub avg_temperature: Option<f64>,
    pub avg_humidity: Option<f64>,
    pub avg_ph: Option<f64>,
}

impl HistoryStats {
    pub fn from_rows(rows: &[HistoryRow]) -> Self {
        Self {
            total_records: rows.len(),
            avg_temperature: average(rows.iter().filter_map(|r| r.temperature)),
            avg_humidity: average(rows.iter().filter_map(|r| r.humidity)),
            avg_ph: average(rows.iter().filter_map(|r| r.ph)),
        }
    }
}

fn average(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Byte-order mark so spreadsheet tools detect UTF-8.
pub const CSV_BOM: char = '\u{feff}';

/// Header row of the exported CSV.
pub const CSV_HEADER: &str =
    "timestamp,temperature_c,humidity_pct,light_lux,ec_ms_cm,tds_ppm,ph,water_level_cm";

/// Build a CSV document (with BOM) from history rows.
///
/// Missing values become empty cells. Every field is numeric or an RFC 3339
/// timestamp, so no quoting is needed.
pub fn build_csv(rows: &[HistoryRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(CSV_HEADER.to_string());

    for row in rows {
        let cells = [
            row.temperature,
            row.humidity,
            row.light,
            row.ec,
            row.tds,
            row.ph,
            row.water_level,
        ]
        .map(csv_cell);
        lines.push(format!(
            "{},{}",
            row.recorded_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            cells.join(",")
        ));
    }

    let mut csv = String::new();
    csv.push(CSV_BOM);
    csv.push_str(&lines.join("\n"));
    csv.push('\n');
    csv
}

/// File name for a CSV export, e.g. `greenhouse_week_1717228800000.csv`.
pub fn export_file_name(period: HistoryPeriod, now: Timestamp) -> String {
    format!("greenhouse_{}_{}.csv", period, now.timestamp_millis())
}

fn csv_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
