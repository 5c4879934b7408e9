//! The recurring trigger that advances the countdown.
//!
//! A [`Cadence`] is either armed or disarmed. While armed, [`Cadence::wait`]
//! resolves once per period; while disarmed it never resolves. Disarming
//! drops the underlying interval, so a tick that was already due is discarded
//! rather than delivered late.

use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Period of one countdown step.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct Cadence {
    period: Duration,
    armed: bool,
    /// Built on first wait after arming, so arming needs no runtime.
    interval: Option<Interval>,
    arms: u64,
}

impl Cadence {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            armed: false,
            interval: None,
            arms: 0,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// How many times the cadence has been armed. Re-arming an armed
    /// cadence is a no-op and does not count.
    pub fn arm_count(&self) -> u64 {
        self.arms
    }

    /// Arm the cadence. The first tick fires one full period from the first
    /// `wait` after arming.
    pub fn arm(&mut self) {
        if self.armed {
            return;
        }
        self.armed = true;
        self.interval = None;
        self.arms += 1;
    }

    pub fn disarm(&mut self) {
        self.armed = false;
        self.interval = None;
    }

    /// Wait for the next tick. Pending forever while disarmed.
    ///
    /// Cancel safe: dropping the future before it resolves loses no tick.
    pub async fn wait(&mut self) {
        if !self.armed {
            std::future::pending::<()>().await;
        }
        let period = self.period;
        let interval = self.interval.get_or_insert_with(|| {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });
        interval.tick().await;
    }
}

impl Default for Cadence {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}
