//! The single 1 Hz tick source

use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::debug;

/// Time between two ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// At most one interval exists at a time; it is created and dropped only
/// through [`Ticker::sync`] and [`Ticker::cancel`].
#[derive(Debug, Default)]
pub struct Ticker {
    interval: Option<Interval>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_scheduled(&self) -> bool {
        self.interval.is_some()
    }

    /// Schedule or cancel so that the ticker runs exactly when the timer does
    pub fn sync(&mut self, running: bool) {
        match (running, self.interval.is_some()) {
            (true, false) => {
                let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                self.interval = Some(interval);
                debug!("Tick scheduled");
            }
            (false, true) => self.cancel(),
            _ => {}
        }
    }

    pub fn cancel(&mut self) {
        if self.interval.take().is_some() {
            debug!("Tick cancelled");
        }
    }

    /// Wait for the next tick; never completes while nothing is scheduled
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
