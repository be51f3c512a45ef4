//! Human-readable terminal renderer.

use owo_colors::OwoColorize as _;

use crate::domain::config::{PsWaitConfig, VALID_CONFIG_KEYS, config_value};
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        println!("pswait {version}");
    }

    /// Render the current pswait configuration.
    pub fn render_config(&self, config: &PsWaitConfig, path: &std::path::Path) {
        println!();
        self.ctx
            .header(&format!("Configuration ({})", path.display()));
        println!();
        for key in VALID_CONFIG_KEYS {
            if let Some(value) = config_value(config, key) {
                self.ctx.kv(&format!("{key}:"), &value);
            }
        }
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in ["PSWAIT_CONFIG", "HEROKU_API_URL", "HEROKU_APP", "PSWAIT_LOG", "NO_COLOR"] {
            println!(
                "    {:<18} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
        println!(
            "    {:<18} {}",
            "HEROKU_API_KEY:",
            if std::env::var("HEROKU_API_KEY").is_ok_and(|v| !v.is_empty()) {
                "(set)"
            } else {
                "(not set)"
            }
        );
        println!();
    }
}
