//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, OutputFlags};
use crate::commands;

/// Wait for every dyno to run the latest release
#[derive(Parser)]
#[command(
    name = "pswait",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output (also honours `NO_COLOR`)
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Wait for every dyno to be running the latest release
    #[command(long_about = "Wait for every dyno to be running the latest release.\n\n\
        Applications in Private Spaces cycle dynos one at a time when a new release \
        is made. This command waits until all dynos are on the latest release version.")]
    Wait(commands::wait::WaitArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Output flags as given on the command line.
    #[must_use]
    pub fn output_flags(&self) -> OutputFlags {
        OutputFlags {
            no_color: self.no_color,
            quiet: self.quiet,
            json: self.json,
        }
    }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let app = AppContext::new(self.output_flags());
        match self.command {
            Command::Wait(args) => commands::wait::run(&app, &args).await,
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => {
                commands::version::run(&app);
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}
