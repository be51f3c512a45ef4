//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use crate::domain::config::PsWaitConfig;
use crate::domain::release::{App, Dyno, Release};

// ── Platform API Port ─────────────────────────────────────────────────────────

/// Read-only access to the platform API, already authenticated.
#[allow(async_fn_in_trait)]
pub trait PlatformApi {
    /// Fetch application metadata.
    async fn app(&self, app: &str) -> Result<App>;
    /// Fetch at most one release: the one with the highest version.
    async fn latest_releases(&self, app: &str) -> Result<Vec<Release>>;
    /// Fetch the app's current dynos.
    async fn dynos(&self, app: &str) -> Result<Vec<Dyno>>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Status channel for the wait loop. Sync trait — no async needed.
pub trait WaitReporter {
    /// Begin a long-running action with a banner, e.g.
    /// `Waiting for every dyno to be running v23`.
    fn start(&self, banner: &str);
    /// Update the status shown next to the banner, e.g. `0 / 1`.
    fn status(&self, status: &str);
    /// Finish the action with a final status, e.g. `1 / 1, done`.
    fn done(&self, status: &str);
}

// ── Clock Port ────────────────────────────────────────────────────────────────

/// Suspends the wait loop between polls.
#[allow(async_fn_in_trait)]
pub trait Clock {
    /// Sleep for `duration`.
    ///
    /// # Errors
    ///
    /// Implementations may return an error when the sleep is interrupted by
    /// an external stop signal.
    async fn sleep(&self, duration: Duration) -> Result<()>;
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts configuration persistence (load/save).
pub trait ConfigStore {
    /// Load configuration, returning defaults if none is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if stored configuration cannot be read or parsed.
    fn load(&self) -> Result<PsWaitConfig>;
    /// Persist configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be written.
    fn save(&self, config: &PsWaitConfig) -> Result<()>;
    /// Location of the stored configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be determined.
    fn path(&self) -> Result<PathBuf>;
}
