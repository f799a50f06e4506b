//! Repository structs: one per table, each a namespace of async query
//! functions taking the pool as first argument.

pub mod control_repo;
pub mod sensor_reading_repo;
pub mod settings_repo;

pub use control_repo::{ControlCommandRepo, DeviceStateRepo};
pub use sensor_reading_repo::SensorReadingRepo;
pub use settings_repo::SettingsRepo;
