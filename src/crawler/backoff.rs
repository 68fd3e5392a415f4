//! Escalating wait counter shared across retry attempts

use std::time::Duration;

/// Linearly escalating backoff
///
/// One counter serves every wait the fetcher performs, whether triggered by
/// a non-200 response or by a connection failure: each call to
/// [`Backoff::next_delay`] returns the current wait and bumps it by the
/// fixed increment, so successive waits grow monotonically until
/// [`Backoff::reset`] restores the initial value.
#[derive(Debug)]
pub struct Backoff {
    initial: Duration,
    increment: Duration,
    current: Duration,
}

impl Backoff {
    pub fn new(initial: Duration, increment: Duration) -> Self {
        Self {
            initial,
            increment,
            current: initial,
        }
    }

    /// Returns the wait to apply now and escalates the counter
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = self.current.saturating_add(self.increment);
        delay
    }

    /// Restores the counter to its initial value
    pub fn reset(&mut self) {
        self.current = self.initial;
    }

    /// The wait the next delay would apply
    pub fn current(&self) -> Duration {
        self.current
    }
}
