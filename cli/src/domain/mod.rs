//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, or `reqwest`. All functions are
//! synchronous and take data in, returning data out.

pub mod config;
pub mod convergence;
pub mod error;
pub mod filter;
pub mod interval;
pub mod release;

pub use config::{PsWaitConfig, apply_config_value, validate_config_key, validate_config_value};
pub use convergence::Tally;
pub use error::{ApiError, ConfigError, WaitError, error_code};
pub use filter::{DynoFilter, ReleaseDynoMatch};
pub use interval::parse_wait_interval;
pub use release::{App, Dyno, DynoState, Release, ReleaseRef, ReleaseVersion};
