//! Generation-keyed view state.
//!
//! Every refetch takes a [`Ticket`] from the slot before it starts. When it
//! finishes, its result is committed only if no newer refetch has started in
//! the meantime, so a slow, stale response can never overwrite fresh state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Generation of one in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

struct Committed<T> {
    generation: u64,
    value: T,
}

/// Latest-request-wins holder for a view value.
pub struct ViewSlot<T> {
    latest: AtomicU64,
    committed: Mutex<Option<Committed<T>>>,
}

impl<T> Default for ViewSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ViewSlot<T> {
    pub fn new() -> Self {
        Self {
            latest: AtomicU64::new(0),
            committed: Mutex::new(None),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Committed<T>>> {
        self.committed.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a request. Any ticket handed out earlier becomes stale.
    pub fn begin(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// Store `value` if `ticket` is still the latest request.
    ///
    /// Returns whether the value was accepted.
    pub fn commit(&self, ticket: Ticket, value: T) -> bool {
        let mut committed = self.lock();
        if !self.is_current(ticket) {
            tracing::debug!(
                generation = ticket.0,
                latest = self.latest.load(Ordering::Acquire),
                "Discarding stale view result"
            );
            return false;
        }
        if committed.as_ref().is_some_and(|c| c.generation >= ticket.0) {
            return false;
        }
        *committed = Some(Committed {
            generation: ticket.0,
            value,
        });
        true
    }

    /// Generation of the committed value, if any.
    pub fn committed_generation(&self) -> Option<u64> {
        self.lock().as_ref().map(|c| c.generation)
    }
}

impl<T: Clone> ViewSlot<T> {
    pub fn snapshot(&self) -> Option<T> {
        self.lock().as_ref().map(|c| c.value.clone())
    }
}
