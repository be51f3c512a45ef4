//! Spinner shown while waiting on an interactive stderr.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Redraw rate of the wait spinner.
const TICK: Duration = Duration::from_millis(100);

/// Frames cycled while dynos restart.
const FRAMES: &[&str] = &["◐", "◓", "◑", "◒", "◐"];

fn style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template).unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Start a stderr spinner showing `msg`.
#[must_use]
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
    pb.set_style(style("{spinner:.cyan} {msg}").tick_strings(FRAMES));
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(TICK);
    pb
}

/// Replace the spinner frame with a checkmark and leave `msg` on screen.
pub fn finish_ok(pb: &ProgressBar, msg: &str) {
    pb.set_style(style("✓ {msg}"));
    pb.finish_with_message(msg.to_string());
}
