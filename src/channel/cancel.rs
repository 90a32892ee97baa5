//! Cooperative cancellation for channel producers
//!
//! A [`CancelSignal`] fires when its [`CancelHandle`] is cancelled or dropped,
//! or when its deadline passes. Producers poll it once per element and race
//! it against every blocking send, so they never stay parked on a full pipe
//! after the signal fires.

use std::time::{Duration, Instant};

use crossbeam_channel::{at, bounded, never, Receiver, Sender, TryRecvError};

/// Create a connected handle/signal pair
pub fn cancellation() -> (CancelHandle, CancelSignal) {
    // Nothing is ever sent: the signal fires on disconnection, which every
    // clone of the receiver observes at once
    let (trigger, done) = bounded(0);
    (
        CancelHandle { trigger },
        CancelSignal {
            done,
            deadline: None,
        },
    )
}

/// Owner side of a cancellation pair
///
/// Cancelling and dropping are the same event.
#[derive(Debug)]
pub struct CancelHandle {
    trigger: Sender<()>,
}

impl CancelHandle {
    /// Fire the signal for every clone of the paired [`CancelSignal`]
    pub fn cancel(self) {
        drop(self.trigger);
    }
}

/// Observer side of a cancellation pair, optionally with a deadline
#[derive(Debug, Clone)]
pub struct CancelSignal {
    done: Receiver<()>,
    deadline: Option<Instant>,
}

impl CancelSignal {
    /// Signal that never fires
    pub fn never() -> Self {
        Self {
            done: never(),
            deadline: None,
        }
    }

    /// Signal that fires once `after` has elapsed
    pub fn timeout(after: Duration) -> Self {
        Self::never().with_timeout(after)
    }

    /// Also fire once `after` has elapsed from now
    pub fn with_timeout(self, after: Duration) -> Self {
        match Instant::now().checked_add(after) {
            Some(deadline) => self.with_deadline(deadline),
            // Too far out to ever fire
            None => self,
        }
    }

    /// Also fire at `deadline`; the earlier of two deadlines wins
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        });
        self
    }

    /// Deadline, if one was set
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether the signal has fired
    pub fn is_cancelled(&self) -> bool {
        if let Err(TryRecvError::Disconnected) = self.done.try_recv() {
            return true;
        }
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Channel that reports disconnection once cancelled
    pub(crate) fn done(&self) -> &Receiver<()> {
        &self.done
    }

    /// Fresh timer for one producer
    ///
    /// `at` timers deliver a single message, so each producer needs its own.
    pub(crate) fn timer(&self) -> Receiver<Instant> {
        match self.deadline {
            Some(deadline) => at(deadline),
            None => never(),
        }
    }
}

impl Default for CancelSignal {
    fn default() -> Self {
        Self::never()
    }
}
