//! ident-core
//!
//! Core library for identifying which vehicle platform a controller is
//! connected to, based on observed CAN-bus traffic.
//!
//! This crate defines the data model (platforms, signatures, observed
//! messages), the multi-brand signature registry, the candidate-elimination
//! matcher, legacy platform-name migration, and a small SQLite store for
//! previously identified vehicles.
//!
//! The goal is to keep all substantive logic here so it is fully testable and
//! reusable from multiple frontends (CLI, daemons, etc.).

pub mod brands;
pub mod garage;
pub mod matcher;
pub mod migration;
pub mod model;
pub mod registry;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
