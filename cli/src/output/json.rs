//! JSON output helpers.
//!
//! Error objects for every failing `--json` command, plus `config show --json`.

use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::config::{PsWaitConfig, VALID_CONFIG_KEYS, config_value};

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Format the configuration as a flat JSON object keyed by setting name.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_config(config: &PsWaitConfig, path: &Path) -> Result<String> {
    let mut settings = serde_json::Map::new();
    for key in VALID_CONFIG_KEYS {
        if let Some(value) = config_value(config, key) {
            settings.insert((*key).to_string(), serde_json::Value::String(value));
        }
    }
    let obj = serde_json::json!({
        "path": path.display().to_string(),
        "settings": settings,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}
