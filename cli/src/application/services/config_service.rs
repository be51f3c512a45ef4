//! Application service — configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::{PsWaitConfig, apply_config_value};

/// Load configuration.
///
/// # Errors
///
/// Returns an error if the store cannot read or parse the configuration.
pub fn load_config(store: &impl ConfigStore) -> Result<PsWaitConfig> {
    store.load()
}

/// Save configuration.
///
/// # Errors
///
/// Returns an error if the store cannot write the configuration.
pub fn save_config(store: &impl ConfigStore, config: &PsWaitConfig) -> Result<()> {
    store.save(config)
}

/// Validate and persist a single `key = value` setting.
///
/// Nothing is written when validation fails.
///
/// # Errors
///
/// Returns an error if the key or value is invalid, or the store fails.
pub fn set_config_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<PsWaitConfig> {
    let mut config = store.load()?;
    apply_config_value(&mut config, key, value)?;
    store.save(&config)?;
    Ok(config)
}
