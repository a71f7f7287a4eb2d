//! Domain types and validators.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

pub mod config;
pub mod error;
pub mod target;

pub use config::ShipitConfig;
pub use target::{Target, TargetSource};
