//! Command implementations

pub mod deploy;
pub mod doctor;
pub mod target;
pub mod version;
