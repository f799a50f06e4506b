//! Greenhouse API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! controller client, background jobs) so integration tests and the binary
//! entrypoint can both access them.

pub mod background;
pub mod config;
pub mod controller;
pub mod error;
pub mod handlers;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod settings_store;
pub mod state;
