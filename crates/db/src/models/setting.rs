//! Settings section rows.

use greenhouse_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// One stored settings section; `value` holds the section's JSON document.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SettingRow {
    pub section: String,
    pub value: String,
    pub updated_at: Timestamp,
}
