//! Domain types and validators for pswait configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::filter::{ReleaseDynoMatch, VALID_RELEASE_DYNO_MATCHES};
use crate::domain::interval::{DEFAULT_WAIT_INTERVAL_SECS, parse_seconds};

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "api.url",
    "wait.interval",
    "wait.require_private_space",
    "wait.release_dyno_match",
];

pub const DEFAULT_API_URL: &str = "https://api.heroku.com";

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.pswait/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PsWaitConfig {
    /// Platform API settings.
    pub api: ApiConfig,
    /// Defaults for `pswait wait`.
    pub wait: WaitConfig,
}

/// Platform API settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Base URL of the platform API.
    #[serde(default = "default_api_url")]
    pub url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

/// Defaults for `pswait wait`; flags override them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WaitConfig {
    /// Seconds between polls.
    pub interval: f64,
    /// Refuse apps that are not in a Private Space.
    pub require_private_space: bool,
    /// How release-phase dynos are recognised.
    pub release_dyno_match: ReleaseDynoMatch,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_WAIT_INTERVAL_SECS,
            require_private_space: false,
            release_dyno_match: ReleaseDynoMatch::Type,
        }
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let valid = match key {
        "api.url" if !(value.starts_with("https://") || value.starts_with("http://")) => {
            "an http:// or https:// URL"
        }
        "wait.interval" if parse_seconds(value).is_none() => "a positive number of seconds",
        "wait.require_private_space" if !matches!(value, "true" | "false") => "true, false",
        "wait.release_dyno_match" if value.parse::<ReleaseDynoMatch>().is_err() => {
            return Err(invalid(key, value, &VALID_RELEASE_DYNO_MATCHES.join(", ")));
        }
        _ => return Ok(()),
    };
    Err(invalid(key, value, valid))
}

fn invalid(key: &str, value: &str, valid: &str) -> anyhow::Error {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        valid: valid.to_string(),
    }
    .into()
}

/// Validate `key = value` and write it into `config`.
///
/// # Errors
///
/// Returns an error if the key is unknown or the value is invalid for it.
pub fn apply_config_value(config: &mut PsWaitConfig, key: &str, value: &str) -> Result<()> {
    validate_config_key(key)?;
    validate_config_value(key, value)?;
    match key {
        "api.url" => config.api.url = value.trim_end_matches('/').to_string(),
        "wait.interval" => {
            config.wait.interval = parse_seconds(value).unwrap_or(DEFAULT_WAIT_INTERVAL_SECS);
        }
        "wait.require_private_space" => config.wait.require_private_space = value == "true",
        "wait.release_dyno_match" => {
            config.wait.release_dyno_match = value.parse().unwrap_or_default();
        }
        _ => anyhow::bail!("Unknown setting: {key}"),
    }
    Ok(())
}

/// Read back a single key as displayed by `config show`.
#[must_use]
pub fn config_value(config: &PsWaitConfig, key: &str) -> Option<String> {
    match key {
        "api.url" => Some(config.api.url.clone()),
        "wait.interval" => Some(config.wait.interval.to_string()),
        "wait.require_private_space" => Some(config.wait.require_private_space.to_string()),
        "wait.release_dyno_match" => Some(config.wait.release_dyno_match.to_string()),
        _ => None,
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
