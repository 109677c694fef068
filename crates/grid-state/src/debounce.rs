//! Last-value-wins debouncing.
//!
//! Time is passed in by the caller, which keeps the debouncer deterministic
//! and independent of any runtime.

use std::time::{Duration, Instant};

/// Quiet period before a text input is committed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Holds at most one pending value until the input has been quiet for
/// `delay`.
///
/// Each [`push`](Self::push) replaces the pending value and restarts the
/// window. Intermediate values are never emitted.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    last_input: Instant,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
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

    /// Record a new input, superseding any pending one.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            last_input: now,
        });
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The value waiting to be committed.
    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref().map(|p| &p.value)
    }

    /// When the pending value becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.last_input + self.delay)
    }

    /// Take the pending value if the quiet period has elapsed at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|p| now.saturating_duration_since(p.last_input) >= self.delay);
        if due { self.flush() } else { None }
    }

    /// Take the pending value immediately.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Drop the pending value without committing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
