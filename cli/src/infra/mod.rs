//! Infrastructure layer — concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: HTTP calls to the platform
//! API, timers, and configuration files.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod api;
pub mod clock;
pub mod config;

pub use api::HerokuApiClient;
pub use clock::TokioClock;
pub use config::YamlConfigStore;
