//! `pswait wait` — block until every dyno runs the latest release.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::config_service;
use crate::application::services::release_wait::{WaitRequest, wait_for_release};
use crate::domain::config::PsWaitConfig;
use crate::domain::filter::DynoFilter;
use crate::domain::interval::parse_wait_interval;
use crate::infra::{HerokuApiClient, TokioClock};
use crate::output::TerminalReporter;

/// Environment variable overriding `api.url`.
pub const API_URL_ENV: &str = "HEROKU_API_URL";

/// Arguments for the wait command.
#[derive(Args, Debug, Clone, Default)]
pub struct WaitArgs {
    /// App to wait on
    #[arg(short, long, env = "HEROKU_APP")]
    pub app: String,

    /// How frequently to poll in seconds (to avoid rate limiting)
    #[arg(short = 'w', long, value_name = "SECONDS")]
    pub wait_interval: Option<String>,

    /// Whether to wait for one-off run dynos
    #[arg(short = 'R', long)]
    pub with_run: bool,

    /// Wait for one specific dyno type
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub dyno_type: Option<String>,

    /// Fail unless the app runs in a Private Space
    #[arg(long)]
    pub require_private_space: bool,
}

/// Resolve flags against configuration into a wait request.
///
/// # Errors
///
/// Returns `WaitError::ConflictingFilters` if both `--type` and `--with-run`
/// are given.
pub fn build_request(args: &WaitArgs, config: &PsWaitConfig) -> Result<WaitRequest> {
    let filter = DynoFilter::new(
        args.with_run,
        args.dyno_type.clone(),
        config.wait.release_dyno_match,
    )?;
    Ok(WaitRequest {
        app: args.app.clone(),
        filter,
        interval: parse_wait_interval(args.wait_interval.as_deref(), config.wait.interval),
        require_private_space: args.require_private_space || config.wait.require_private_space,
    })
}

/// Base URL of the platform API: `HEROKU_API_URL`, else `api.url`.
#[must_use]
pub fn api_url(config: &PsWaitConfig) -> String {
    std::env::var(API_URL_ENV)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| config.api.url.clone())
}

/// Run the wait command.
///
/// # Errors
///
/// Returns an error if the flags conflict, a precondition fails, or any API
/// call fails.
pub async fn run(app: &AppContext, args: &WaitArgs) -> Result<ExitCode> {
    DynoFilter::check_exclusive(args.with_run, args.dyno_type.as_deref())?;
    let config = config_service::load_config(&app.config_store)?;
    let request = build_request(args, &config)?;
    tracing::debug!(
        app = %request.app,
        interval_secs = request.interval.as_secs_f64(),
        include_run = request.filter.include_run(),
        only_type = request.filter.only_type(),
        "starting wait"
    );

    let api = HerokuApiClient::from_env(&api_url(&config))?;
    let reporter = TerminalReporter::new(&app.output);
    wait_for_release(&api, &reporter, &TokioClock, &request).await?;
    Ok(ExitCode::SUCCESS)
}
