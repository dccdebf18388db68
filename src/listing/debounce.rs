//! Single-slot debouncer for search input.

use std::time::Duration;

use tokio::time::{Instant, sleep_until};

#[derive(Debug)]
struct Pending<T> {
    deadline: Instant,
    value: T,
}

/// Holds at most one pending value and the instant it becomes due.
///
/// Scheduling again replaces the value and pushes the deadline back, so only
/// the last value of a burst is ever delivered. Dropping the debouncer drops
/// the pending value; nothing fires afterwards.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending value and restart the quiet period.
    pub fn schedule(&mut self, value: T) {
        self.pending = Some(Pending {
            deadline: Instant::now() + self.delay,
            value,
        });
    }

    /// Discard the pending value, if any.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending value if its deadline has passed.
    pub fn take_due(&mut self) -> Option<T> {
        match &self.pending {
            Some(p) if p.deadline <= Instant::now() => self.cancel(),
            _ => None,
        }
    }

    /// Wait until the pending value is due and take it.
    ///
    /// Never completes while nothing is pending, so it can sit in a
    /// `tokio::select!` loop next to other event sources.
    pub async fn ready(&mut self) -> T {
        loop {
            match &self.pending {
                Some(p) => sleep_until(p.deadline).await,
                None => std::future::pending::<()>().await,
            }
            if let Some(value) = self.take_due() {
                return value;
            }
        }
    }
}
