//! pswait - wait for every dyno to cycle onto the latest release

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pswait_cli::cli::Cli;
use pswait_cli::domain::error_code;
use pswait_cli::output::{OutputContext, json};

/// Environment variable holding the log filter, e.g. `pswait=debug`.
const LOG_ENV: &str = "PSWAIT_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(console::Term::stderr().is_term())
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let flags = cli.output_flags();

    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            let message = format!("{e:#}");
            let rendered = if flags.json {
                json::format_error(&message, error_code(&e)).ok()
            } else {
                None
            };
            match rendered {
                Some(obj) => println!("{obj}"),
                None => OutputContext::new(flags.no_color, false).fatal(&message),
            }
            ExitCode::from(1)
        }
    }
}
