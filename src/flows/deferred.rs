//! Fixed-delay hand-off used to simulate network latency.

use std::time::{Duration, Instant};

/// A value that becomes available once a fixed delay has elapsed.
///
/// The TUI polls it on every tick with [`Deferred::try_resolve`]; non-interactive
/// callers can `await` it with [`Deferred::wait`]. It cannot fail, time out or
/// be cancelled other than by dropping it.
#[derive(Debug, Clone)]
pub struct Deferred<T> {
    value: T,
    ready_at: Instant,
}

impl<T> Deferred<T> {
    pub fn new(value: T, delay: Duration) -> Self {
        Self::starting_at(value, Instant::now(), delay)
    }

    pub fn starting_at(value: T, start: Instant, delay: Duration) -> Self {
        Self {
            value,
            ready_at: start + delay,
        }
    }

    pub fn is_ready(&self, now: Instant) -> bool {
        now >= self.ready_at
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.ready_at.saturating_duration_since(now)
    }

    /// Peek at the pending value without resolving it
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Hand the value over if the delay has elapsed, otherwise give `self` back.
    pub fn try_resolve(self, now: Instant) -> Result<T, Self> {
        if self.is_ready(now) {
            Ok(self.value)
        } else {
            Err(self)
        }
    }

    pub async fn wait(self) -> T {
        tokio::time::sleep_until(tokio::time::Instant::from_std(self.ready_at)).await;
        self.value
    }
}

/// Resolve a pending slot in place, leaving it empty once the value is handed over.
pub fn resolve_slot<T>(slot: &mut Option<Deferred<T>>, now: Instant) -> Option<T> {
    let pending = slot.take()?;
    match pending.try_resolve(now) {
        Ok(value) => Some(value),
        Err(pending) => {
            *slot = Some(pending);
            None
        }
    }
}
