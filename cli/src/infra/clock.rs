//! Infrastructure implementation of the `Clock` port.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::Clock;
use crate::domain::error::WaitError;

/// Real-time clock backed by tokio.
///
/// A sleep is cut short by Ctrl-C, which surfaces as
/// [`WaitError::Interrupted`].
pub struct TokioClock;

impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) -> Result<()> {
        tokio::select! {
            () = tokio::time::sleep(duration) => Ok(()),
            signal = tokio::signal::ctrl_c() => {
                signal.context("cannot listen for Ctrl-C")?;
                tracing::debug!("interrupted during poll interval");
                Err(WaitError::Interrupted.into())
            }
        }
    }
}
