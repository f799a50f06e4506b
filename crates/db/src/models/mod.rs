//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row, and `Deserialize` DTOs for inserts where the API
//! accepts them.

pub mod control;
pub mod sensor_reading;
pub mod setting;
