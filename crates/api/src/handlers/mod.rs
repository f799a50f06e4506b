//! Request handlers, one module per resource.

pub mod alerts;
pub mod control;
pub mod data;
pub mod settings;
pub mod status;
