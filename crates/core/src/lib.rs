//! Greenhouse domain logic.
//!
//! Everything in this crate is pure (no database, network or clock access).
//! Callers fetch readings and settings, pass them in, and decide what to do
//! with the results.

pub mod alert;
pub mod control;
pub mod error;
pub mod history;
pub mod metrics;
pub mod monitoring;
pub mod reading;
pub mod settings;
pub mod types;
