//! Scroll coordination.
//!
//! A navigation that replaces page content marks the gate pending; the
//! scroll handler waits on it and scrolls once the new page has rendered.
//! At most one gate is outstanding. Marking the gate pending again replaces
//! it (latest wins) and wakes waiters of the old gate with
//! [`WaitOutcome::Superseded`].

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// How a wait on a gate ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The page rendered.
    Resolved,
    /// A newer navigation replaced the gate.
    Superseded,
}

#[derive(Debug)]
struct Gate {
    outcome: Mutex<Option<WaitOutcome>>,
    settled: Condvar,
}

impl Gate {
    fn new() -> Self {
        Self {
            outcome: Mutex::new(None),
            settled: Condvar::new(),
        }
    }

    fn settle(&self, outcome: WaitOutcome) {
        let mut slot = lock(&self.outcome);
        if slot.is_none() {
            *slot = Some(outcome);
            self.settled.notify_all();
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Single-slot one-shot signal.
#[derive(Debug, Default)]
pub struct ScrollGate {
    current: Mutex<Option<Arc<Gate>>>,
}

impl ScrollGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new gate, superseding any outstanding one.
    pub fn pending(&self) {
        let previous = lock(&self.current).replace(Arc::new(Gate::new()));
        if let Some(previous) = previous {
            previous.settle(WaitOutcome::Superseded);
        }
    }

    /// Handle on the outstanding gate, if any.
    #[must_use]
    pub fn wait(&self) -> Option<ScrollWaiter> {
        lock(&self.current)
            .as_ref()
            .map(|gate| ScrollWaiter {
                gate: Arc::clone(gate),
            })
    }

    /// Release the outstanding gate and clear the slot.
    pub fn resolve(&self) {
        let gate = lock(&self.current).take();
        if let Some(gate) = gate {
            gate.settle(WaitOutcome::Resolved);
        }
    }

    /// Whether a gate is outstanding.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        lock(&self.current).is_some()
    }
}

/// Waiter on one gate.
#[derive(Debug)]
pub struct ScrollWaiter {
    gate: Arc<Gate>,
}

impl ScrollWaiter {
    /// Block until the gate settles.
    pub fn wait(&self) -> WaitOutcome {
        let mut outcome = lock(&self.gate.outcome);
        loop {
            if let Some(outcome) = *outcome {
                return outcome;
            }
            outcome = self
                .gate
                .settled
                .wait(outcome)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Block until the gate settles or `timeout` elapses.
    ///
    /// Returns `None` on timeout.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<WaitOutcome> {
        let outcome = lock(&self.gate.outcome);
        let (outcome, _) = self
            .gate
            .settled
            .wait_timeout_while(outcome, timeout, |outcome| outcome.is_none())
            .unwrap_or_else(PoisonError::into_inner);
        *outcome
    }

    /// Outcome if the gate already settled.
    #[must_use]
    pub fn try_outcome(&self) -> Option<WaitOutcome> {
        *lock(&self.gate.outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use pretty_assertions::assert_eq;

    use super::*;

    static_assertions::assert_impl_all!(ScrollGate: Send, Sync);
    static_assertions::assert_impl_all!(ScrollWaiter: Send, Sync);

    #[test]
    fn test_wait_without_pending_is_none() {
        let gate = ScrollGate::new();
        assert!(gate.wait().is_none());
        assert!(!gate.is_pending());
    }

    #[test]
    fn test_resolve_wakes_waiter_and_clears() {
        let gate = ScrollGate::new();
        gate.pending();
        let waiter = gate.wait().unwrap();
        assert_eq!(waiter.try_outcome(), None);

        gate.resolve();

        assert_eq!(waiter.wait(), WaitOutcome::Resolved);
        assert!(gate.wait().is_none());
    }

    #[test]
    fn test_second_pending_supersedes_first() {
        let gate = ScrollGate::new();
        gate.pending();
        let first = gate.wait().unwrap();

        gate.pending();
        let second = gate.wait().unwrap();

        assert_eq!(first.try_outcome(), Some(WaitOutcome::Superseded));
        assert_eq!(second.try_outcome(), None);

        gate.resolve();
        assert_eq!(second.wait(), WaitOutcome::Resolved);
    }

    #[test]
    fn test_resolve_without_pending_is_noop() {
        let gate = ScrollGate::new();
        gate.resolve();
        assert!(!gate.is_pending());
    }

    #[test]
    fn test_wait_timeout() {
        let gate = ScrollGate::new();
        gate.pending();
        let waiter = gate.wait().unwrap();

        assert_eq!(waiter.wait_timeout(Duration::from_millis(10)), None);
    }

    #[test]
    fn test_waiter_on_other_thread() {
        let gate = Arc::new(ScrollGate::new());
        gate.pending();
        let waiter = gate.wait().unwrap();

        let handle = thread::spawn(move || waiter.wait());
        gate.resolve();

        assert_eq!(handle.join().unwrap(), WaitOutcome::Resolved);
    }
}
