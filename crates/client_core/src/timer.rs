//! Brain-break countdown.

use std::{sync::Arc, time::Duration};

use thiserror::Error;
use tokio::{
    runtime::Handle,
    sync::watch,
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::{debug, info};

pub const DEFAULT_BREAK_SECONDS: u32 = 90;
pub const BREAK_PROMPT: &str = "Take a short break";
const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Error)]
pub enum TimerError {
    #[error("break timer needs a running tokio runtime")]
    NoRuntime,
}

/// Counts down once per second while running, saturating at zero.
///
/// The ticker task is owned by the timer: `pause`, `reset` and dropping the
/// timer all cancel it, so nothing ticks after the owning view is gone.
#[derive(Debug)]
pub struct BreakTimer {
    initial: u32,
    remaining: Arc<watch::Sender<u32>>,
    ticker: Option<JoinHandle<()>>,
}

impl BreakTimer {
    pub fn new(initial: u32) -> Self {
        let (remaining, _) = watch::channel(initial);
        Self {
            initial,
            remaining: Arc::new(remaining),
            ticker: None,
        }
    }

    pub fn initial(&self) -> u32 {
        self.initial
    }

    pub fn remaining(&self) -> u32 {
        *self.remaining.borrow()
    }

    pub fn is_running(&self) -> bool {
        self.ticker
            .as_ref()
            .is_some_and(|ticker| !ticker.is_finished())
    }

    pub fn is_elapsed(&self) -> bool {
        self.remaining() == 0
    }

    pub fn prompt(&self) -> Option<&'static str> {
        self.is_elapsed().then_some(BREAK_PROMPT)
    }

    pub fn watch(&self) -> watch::Receiver<u32> {
        self.remaining.subscribe()
    }

    /// One countdown step, for callers that drive their own clock.
    pub fn tick(&self) -> u32 {
        decrement(&self.remaining)
    }

    pub fn start(&mut self) -> Result<(), TimerError> {
        if self.is_running() {
            return Ok(());
        }
        if self.is_elapsed() {
            debug!("break timer already at zero; not starting");
            return Ok(());
        }

        let runtime = Handle::try_current().map_err(|_| TimerError::NoRuntime)?;
        let remaining = Arc::clone(&self.remaining);
        self.ticker = Some(runtime.spawn(async move {
            let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
            loop {
                interval.tick().await;
                if decrement(&remaining) == 0 {
                    info!("break timer reached zero");
                    break;
                }
            }
        }));
        debug!(remaining = self.remaining(), "break timer started");
        Ok(())
    }

    pub fn pause(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
            debug!(remaining = self.remaining(), "break timer paused");
        }
    }

    pub fn reset(&mut self) {
        self.pause();
        self.remaining.send_replace(self.initial);
    }
}

impl Default for BreakTimer {
    fn default() -> Self {
        Self::new(DEFAULT_BREAK_SECONDS)
    }
}

impl Drop for BreakTimer {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

fn decrement(remaining: &watch::Sender<u32>) -> u32 {
    let mut left = 0;
    remaining.send_modify(|seconds| {
        *seconds = seconds.saturating_sub(1);
        left = *seconds;
    });
    left
}

#[cfg(test)]
#[path = "tests/timer_tests.rs"]
mod tests;
