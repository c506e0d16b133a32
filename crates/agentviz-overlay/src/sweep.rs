#![forbid(unsafe_code)]

//! Tick-driven sweep scheduling.
//!
//! The host's frame/tick loop owns the clock; the driver only decides
//! *whether* a sweep is due. It does work only while the upstream stream is
//! live, and "cancellation" is simply dropping the driver — there is no
//! timer resource to leak, which is the guaranteed-release contract the
//! teardown path needs. The continuous position-refresh loop is read-only
//! rendering work and never goes through here.

use std::time::Duration;

use web_time::Instant;

/// Decides when the periodic cache sweep should run.
#[derive(Debug, Clone)]
pub struct SweepDriver {
    interval: Duration,
    streaming: bool,
    last_sweep: Option<Instant>,
}

impl SweepDriver {
    /// Driver with the given sweep cadence, initially not streaming.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            streaming: false,
            last_sweep: None,
        }
    }

    #[must_use]
    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    /// Flip the streaming flag. Starting a session resets the cadence so
    /// the first sweep lands one full interval after the start.
    pub fn set_streaming(&mut self, streaming: bool, now: Instant) {
        if streaming && !self.streaming {
            self.last_sweep = Some(now);
        }
        self.streaming = streaming;
    }

    /// Report a tick; returns `true` when a sweep is due. At most one sweep
    /// per elapsed interval, none while not streaming.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        if !self.streaming {
            return false;
        }
        let due = match self.last_sweep {
            Some(last) => now.saturating_duration_since(last) >= self.interval,
            None => true,
        };
        if due {
            self.last_sweep = Some(now);
        }
        due
    }
}

impl Default for SweepDriver {
    fn default() -> Self {
        Self::new(Duration::from_millis(1_000))
    }
}
