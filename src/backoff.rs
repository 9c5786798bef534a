//! Capped exponential backoff between probe attempts.

use std::time::Duration;

/// Delay schedule for the retry loop.
///
/// Starts at `min` and grows by `factor` per failed attempt, capped at
/// `max`: the delay before attempt *n* is `min(min * factor^n, max)`.
/// With `factor = 1.0` the delay stays constant at `min`. State is never
/// reset — the loop terminates on the first success.
#[derive(Debug, Clone)]
pub struct Backoff {
    min: Duration,
    max: Duration,
    factor: f64,
    attempt: u32,
    delay: Duration,
}

impl Backoff {
    /// Create a schedule starting at `min`.
    ///
    /// `factor` is expected to be >= 1.0; the CLI rejects smaller values
    /// before they reach this type. A smaller factor is not a panic here,
    /// it just shrinks the delay toward zero.
    pub fn new(min: Duration, max: Duration, factor: f64) -> Self {
        Self {
            min,
            max,
            factor,
            attempt: 0,
            delay: min,
        }
    }

    /// Return the delay to sleep before the next attempt and advance the
    /// schedule.
    pub fn next_delay(&mut self) -> Duration {
        let current = self.delay;
        self.attempt += 1;
        if self.delay < self.max {
            let scaled = self.min.as_secs_f64() * self.factor.powi(self.attempt as i32);
            self.delay = if scaled.is_finite() && scaled >= 0.0 {
                Duration::try_from_secs_f64(scaled).unwrap_or(self.max)
            } else {
                self.max
            };
        }
        if self.delay > self.max {
            self.delay = self.max;
        }
        current
    }

    /// Number of failed attempts recorded so far.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }
}
