//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, or `reqwest`. All error types implement
//! `thiserror::Error` and convert to `anyhow::Error` via the `?` operator.

use thiserror::Error;

// ── Wait errors ───────────────────────────────────────────────────────────────

/// Usage and precondition failures of `pswait wait`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WaitError {
    #[error("Cannot specify both --type and --with-run")]
    ConflictingFilters,

    #[error("App {app} is not in a Private Space")]
    NotInPrivateSpace { app: String },

    #[error("App {app} has no releases")]
    NoReleases { app: String },

    #[error("Interrupted while waiting for dynos")]
    Interrupted,
}

// ── API errors ────────────────────────────────────────────────────────────────

/// Failures talking to the platform API.
///
/// Transport details are carried as strings so the domain stays free of the
/// HTTP client's types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not logged in. Set HEROKU_API_KEY to an API token.")]
    MissingToken,

    #[error("{message} (HTTP {status} on {path})")]
    Status {
        status: u16,
        path: String,
        message: String,
    },

    #[error("cannot reach {path}: {reason}")]
    Transport { path: String, reason: String },

    #[error("unexpected response from {path}: {reason}")]
    Decode { path: String, reason: String },
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nValid values: {valid}")]
    InvalidValue {
        key: String,
        value: String,
        valid: String,
    },
}

/// Stable machine-readable code for an error, used by `--json` output.
///
/// Walks the `anyhow` chain so context layers do not hide the typed error.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<WaitError>() {
            return match e {
                WaitError::ConflictingFilters => "conflicting_filters",
                WaitError::NotInPrivateSpace { .. } => "not_in_private_space",
                WaitError::NoReleases { .. } => "no_releases",
                WaitError::Interrupted => "interrupted",
            };
        }
        if let Some(e) = cause.downcast_ref::<ApiError>() {
            return match e {
                ApiError::MissingToken => "missing_token",
                ApiError::Status { .. } => "api_status",
                ApiError::Transport { .. } => "api_transport",
                ApiError::Decode { .. } => "api_decode",
            };
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return "config";
        }
    }
    "error"
}
