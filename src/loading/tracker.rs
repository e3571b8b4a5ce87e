//! In-flight request counter with a loading signal.
//!
//! [`LoadingTracker`] counts HTTP operations that have been dispatched but not
//! yet resolved and derives a boolean loading flag from the count. Observers
//! registered with [`LoadingTracker::subscribe`] are called only when the flag
//! actually flips, never on every increment or decrement.
//!
//! The tracker does not pair calls itself: whoever calls [`begin`] owns the
//! obligation to call [`end`] exactly once, even when the operation fails.
//!
//! [`begin`]: LoadingTracker::begin
//! [`end`]: LoadingTracker::end

use std::fmt;

/// Handle returned by [`LoadingTracker::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(bool)>;

/// Reference count of in-flight operations and the loading flag derived from it.
///
/// # Example
///
/// ```
/// use zroster::loading::LoadingTracker;
///
/// let mut tracker = LoadingTracker::new();
/// tracker.begin();
/// tracker.begin();
/// tracker.end();
/// assert!(tracker.is_loading());
/// tracker.end();
/// assert!(!tracker.is_loading());
/// ```
#[derive(Default)]
pub struct LoadingTracker {
    in_flight: usize,
    loading: bool,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl LoadingTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of operations currently in flight.
    #[must_use]
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Current value of the loading flag.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Registers an observer called with the new flag value on every transition.
    ///
    /// The observer is not called with the current value on registration.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(bool) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer. Returns `false` if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// Records the start of an operation.
    pub fn begin(&mut self) {
        let was_idle = self.in_flight == 0;
        self.in_flight += 1;
        tracing::trace!(in_flight = self.in_flight, "request begun");
        if was_idle {
            self.set_loading(true);
        }
    }

    /// Records the completion of an operation. Never drops below zero.
    pub fn end(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        tracing::trace!(in_flight = self.in_flight, "request ended");
        if self.in_flight == 0 {
            self.set_loading(false);
        }
    }

    /// Resets the count to zero and clears the flag.
    pub fn force_clear(&mut self) {
        tracing::debug!(in_flight = self.in_flight, "force clearing loading state");
        self.in_flight = 0;
        self.set_loading(false);
    }

    fn set_loading(&mut self, loading: bool) {
        if self.loading == loading {
            return;
        }
        self.loading = loading;
        tracing::debug!(loading, observers = self.observers.len(), "loading state changed");
        for (_, observer) in &mut self.observers {
            observer(loading);
        }
    }
}

impl fmt::Debug for LoadingTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadingTracker")
            .field("in_flight", &self.in_flight)
            .field("loading", &self.loading)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Calls [`LoadingTracker::end`] when dropped.
///
/// Holding one of these across the handling of a completed request guarantees
/// the decrement happens on every exit path.
pub struct EndOnDrop<'a> {
    tracker: &'a mut LoadingTracker,
}

impl<'a> EndOnDrop<'a> {
    pub fn new(tracker: &'a mut LoadingTracker) -> Self {
        Self { tracker }
    }
}

impl Drop for EndOnDrop<'_> {
    fn drop(&mut self) {
        self.tracker.end();
    }
}
