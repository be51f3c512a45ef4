//! Command implementations

pub mod config;
pub mod version;
pub mod wait;
