use std::time::{Duration, Instant};

pub const ONE_SECOND: Duration = Duration::from_secs(1);

/// A fixed-period interval driven by instants supplied by the caller.
///
/// Cancelling is dropping the value; an owner keeps it in an `Option` and
/// takes it out to stop further firings.
#[derive(Clone, Copy, Debug)]
pub struct Interval {
    period: Duration,
    next_due: Instant,
}

impl Interval {
    pub fn start(now: Instant, period: Duration) -> Self {
        let period = period.max(Duration::from_millis(1));
        Self {
            period,
            next_due: now + period,
        }
    }

    /// Returns true if at least one period boundary has passed since the last
    /// firing. Several missed boundaries collapse into one firing.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        while self.next_due <= now {
            self.next_due += self.period;
        }
        true
    }
}
