//! Application service — wait for every dyno to run the latest release.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info};

use crate::application::ports::{Clock, PlatformApi, WaitReporter};
use crate::domain::convergence::Tally;
use crate::domain::error::WaitError;
use crate::domain::filter::DynoFilter;
use crate::domain::release::Release;

// ── Public types ──────────────────────────────────────────────────────────────

/// Everything the wait loop needs, resolved from flags and config.
#[derive(Debug, Clone)]
pub struct WaitRequest {
    /// Application name or id.
    pub app: String,
    /// Which dynos count.
    pub filter: DynoFilter,
    /// Delay between polls.
    pub interval: Duration,
    /// Refuse apps outside a Private Space.
    pub require_private_space: bool,
}

/// Result of a wait that converged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitOutcome {
    /// The release every counted dyno now runs.
    pub release: Release,
    /// The final tally.
    pub tally: Tally,
    /// Number of times the dyno list was fetched.
    pub ticks: u32,
}

impl WaitOutcome {
    /// Whether the loop had to wait at all.
    #[must_use]
    pub fn waited(&self) -> bool {
        self.ticks > 1
    }
}

/// Banner shown while waiting for `release`.
#[must_use]
pub fn waiting_banner(release: &Release) -> String {
    format!("Waiting for every dyno to be running v{}", release.version)
}

// ── Service ───────────────────────────────────────────────────────────────────

/// Poll until every counted dyno is up on the latest release.
///
/// Returns silently when the first poll is already converged. Otherwise
/// reports a banner once, a status per poll, and a final `done` status.
///
/// # Errors
///
/// Returns [`WaitError::NotInPrivateSpace`] or [`WaitError::NoReleases`] when
/// a precondition fails, and propagates any error from the API or clock.
pub async fn wait_for_release(
    api: &impl PlatformApi,
    reporter: &impl WaitReporter,
    clock: &impl Clock,
    request: &WaitRequest,
) -> Result<WaitOutcome> {
    let app = request.app.as_str();

    if request.require_private_space && !api.app(app).await?.in_private_space() {
        return Err(WaitError::NotInPrivateSpace {
            app: app.to_string(),
        }
        .into());
    }

    let latest = latest_release(api, app).await?;
    debug!(app, release = %latest.id, version = %latest.version, "latest release");

    let mut reported = false;
    let mut ticks = 0u32;

    loop {
        let dynos = api.dynos(app).await?;
        ticks += 1;

        let tally = Tally::count(&dynos, &request.filter, &latest);
        debug!(
            app,
            tick = ticks,
            on_latest = tally.on_latest,
            total = tally.total,
            "polled dynos"
        );

        if tally.is_converged() {
            if reported {
                reporter.done(&format!("{tally}, done"));
            }
            info!(app, version = %latest.version, ticks, "all dynos on latest release");
            return Ok(WaitOutcome {
                release: latest,
                tally,
                ticks,
            });
        }

        if !reported {
            reported = true;
            reporter.start(&waiting_banner(&latest));
        }
        reporter.status(&tally.to_string());

        clock.sleep(request.interval).await?;
    }
}

/// Fetch the newest release, failing if the app has none.
async fn latest_release(api: &impl PlatformApi, app: &str) -> Result<Release> {
    api.latest_releases(app)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| {
            WaitError::NoReleases {
                app: app.to_string(),
            }
            .into()
        })
}
