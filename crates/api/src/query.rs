//! Shared query parameter types for API handlers.

use greenhouse_core::history::HistoryPeriod;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// `?limit=` for list endpoints. Clamped in the handler via `clamp_limit`.
#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}

/// `?period=` for history endpoints (`all`, `today`, `week`, `month`).
#[derive(Debug, Default, Deserialize)]
pub struct PeriodParams {
    pub period: Option<String>,
}

impl PeriodParams {
    /// The requested period, `all` when absent.
    pub fn period(&self) -> AppResult<HistoryPeriod> {
        match self.period.as_deref() {
            None | Some("") => Ok(HistoryPeriod::All),
            Some(raw) => raw.parse().map_err(AppError::from),
        }
    }
}

/// `?limit=&period=` for the history listing.
#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<i64>,
    pub period: Option<String>,
}

impl HistoryParams {
    pub fn period(&self) -> AppResult<HistoryPeriod> {
        PeriodParams {
            period: self.period.clone(),
        }
        .period()
    }
}
