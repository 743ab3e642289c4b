use core::time::Duration;
use serde::{Deserialize, Serialize};

/// Smallest interval a repeating timer accepts, so one tick always terminates.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Fires once after a first delay and then at a fixed interval. Driven by [`advance`].
///
/// [`advance`]: RepeatingTimer::advance
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatingTimer {
    interval: Duration,
    until_next: Duration,
}

impl RepeatingTimer {
    pub fn new(first_delay: Duration, interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_INTERVAL),
            until_next: first_delay,
        }
    }

    pub fn until_next(&self) -> Duration {
        self.until_next
    }

    /// Moves the schedule forward by `dt` and returns how many times it fired.
    pub fn advance(&mut self, mut dt: Duration) -> u32 {
        let mut fired = 0;
        while dt >= self.until_next {
            dt -= self.until_next;
            self.until_next = self.interval;
            fired += 1;
        }
        self.until_next -= dt;
        fired
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountdownEvent {
    /// Remaining time dropped under the warning threshold. Sent once per countdown.
    LowTime(Duration),
    Expired,
}

/// Optional level countdown.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: Duration,
    warn_below: Duration,
    warned: bool,
    running: bool,
}

impl Countdown {
    pub fn start(duration: Duration, warn_below: Duration) -> Self {
        Self {
            remaining: duration,
            warn_below,
            warned: false,
            running: true,
        }
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn advance(&mut self, dt: Duration) -> Option<CountdownEvent> {
        if !self.running {
            return None;
        }

        self.remaining = self.remaining.saturating_sub(dt);
        if self.remaining.is_zero() {
            self.running = false;
            return Some(CountdownEvent::Expired);
        }

        if !self.warned && self.remaining <= self.warn_below {
            self.warned = true;
            return Some(CountdownEvent::LowTime(self.remaining));
        }

        None
    }
}
