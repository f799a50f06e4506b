//! Sensor monitoring domain logic.
//!
//! Contains the threshold classifier and the alert recorder. Both are pure:
//! the caller supplies readings, bands and the current time.

pub mod recorder;
pub mod thresholds;
