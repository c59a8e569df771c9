//! Trailing debounce for rapidly changing values
//!
//! A [`Debouncer`] holds at most one pending value. Every [`Debouncer::push`]
//! replaces the pending value and restarts the delay, so only a value that
//! stays unchanged for the whole delay is ever emitted.

use std::time::Duration;
use tokio::time::Instant;

/// Trailing debouncer driven by the owner's event loop
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given delay
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Configured delay
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace the pending value and restart the delay
    pub fn push(&mut self, value: T) {
        self.pending = Some((value, Instant::now() + self.delay));
    }

    /// Whether a value is waiting to settle
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending value without emitting it
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Wait until the pending value has been stable for the delay.
    ///
    /// Never resolves while nothing is pending. Cancel-safe: dropping the
    /// future keeps the pending value and its deadline.
    pub async fn next(&mut self) -> T {
        let Some(deadline) = self.pending.as_ref().map(|(_, deadline)| *deadline) else {
            return std::future::pending().await;
        };

        if self.delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep_until(deadline).await;
        }

        match self.pending.take() {
            Some((value, _)) => value,
            None => std::future::pending().await,
        }
    }
}
