//! Output formatting module

pub mod human;
pub mod json;
pub mod progress;
pub mod reporter;
pub mod styles;

use console::Term;
use owo_colors::OwoColorize as _;
pub use human::HumanRenderer;
pub use reporter::TerminalReporter;
pub use styles::Styles;

/// Marker glyph that prefixes every fatal error line.
pub const ERROR_MARKER: &str = "▸";

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stderr, the status channel, is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stderr().is_term();
        let no_color_env = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        let use_colors = !no_color && !no_color_env && is_tty;

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print a section header. Suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// Print a key-value pair with the key dimmed. Suppressed when `quiet`.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {:<28} {value}", key.style(self.styles.dim));
        }
    }

    /// Print a fatal error to stderr, one marker per line. Never suppressed.
    pub fn fatal(&self, msg: &str) {
        eprintln!("{}", self.format_fatal(msg));
    }

    /// Format a fatal error the way [`OutputContext::fatal`] prints it.
    #[must_use]
    pub fn format_fatal(&self, msg: &str) -> String {
        let marker = ERROR_MARKER.style(self.styles.error).to_string();
        msg.lines()
            .map(|line| {
                if line.is_empty() {
                    format!(" {marker}")
                } else {
                    format!(" {marker}    {line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
