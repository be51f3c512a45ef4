//! `TerminalReporter` — Presentation-layer implementation of `WaitReporter`.
//!
//! Wraps `&OutputContext` and implements the `application::ports::WaitReporter`
//! trait so the wait service can emit progress without depending on any
//! presentation type directly.

use std::cell::RefCell;

use indicatif::ProgressBar;
use owo_colors::OwoColorize as _;

use crate::application::ports::WaitReporter;
use crate::output::{OutputContext, progress};

/// Join a banner and its status the way every status line is shown.
#[must_use]
pub fn status_line(banner: &str, status: &str) -> String {
    format!("{banner}... {status}")
}

/// Terminal wait reporter.
///
/// - interactive stderr: one spinner, its message updated in place
/// - otherwise: one `"{banner}... {status}"` line per update on stderr
/// - `quiet`: nothing
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
    banner: RefCell<Option<String>>,
    spinner: RefCell<Option<ProgressBar>>,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self {
            ctx,
            banner: RefCell::new(None),
            spinner: RefCell::new(None),
        }
    }

    fn line(&self, status: &str) -> String {
        let banner = self.banner.borrow();
        let banner = banner.as_deref().unwrap_or_default();
        if self.ctx.show_progress() {
            status_line(&banner.style(self.ctx.styles.progress).to_string(), status)
        } else {
            status_line(banner, status)
        }
    }
}

impl WaitReporter for TerminalReporter<'_> {
    fn start(&self, banner: &str) {
        *self.banner.borrow_mut() = Some(banner.to_string());
        if self.ctx.show_progress() {
            *self.spinner.borrow_mut() = Some(progress::spinner(&self.line("")));
        }
    }

    fn status(&self, status: &str) {
        if self.ctx.quiet {
            return;
        }
        if let Some(pb) = self.spinner.borrow().as_ref() {
            pb.set_message(self.line(status));
        } else {
            eprintln!("{}", self.line(status));
        }
    }

    fn done(&self, status: &str) {
        if self.ctx.quiet {
            return;
        }
        if let Some(pb) = self.spinner.borrow_mut().take() {
            progress::finish_ok(&pb, &self.line(status));
        } else {
            eprintln!("{}", self.line(status));
        }
    }
}

impl Drop for TerminalReporter<'_> {
    fn drop(&mut self) {
        if let Some(pb) = self.spinner.get_mut().take() {
            pb.abandon();
        }
    }
}
