//! Lazily created per-key locks.
//!
//! Serializes work on one key (a package load) while letting different keys
//! proceed in parallel. Slots are created on first use and never removed.

#![expect(
    clippy::disallowed_types,
    reason = "Arc shares a key's slot between the table and its guards"
)]

use std::sync::Arc;

use parking_lot::{Condvar, Mutex};
use rustc_hash::FxHashMap;

#[derive(Default)]
struct SlotState {
    /// Ticket of the current holder.
    holder: Option<u64>,
    next_ticket: u64,
}

/// The lock for one key.
#[derive(Default)]
struct Slot {
    state: Mutex<SlotState>,
    released: Condvar,
}

impl Slot {
    fn acquire(&self) -> u64 {
        let mut state = self.state.lock();
        while state.holder.is_some() {
            self.released.wait(&mut state);
        }
        let ticket = state.next_ticket;
        state.next_ticket += 1;
        state.holder = Some(ticket);
        ticket
    }

    /// Release the slot if it is held, and by `ticket` when one is given.
    fn release(&self, ticket: Option<u64>) -> bool {
        let mut state = self.state.lock();
        let releases = match (state.holder, ticket) {
            (Some(holder), Some(ticket)) => holder == ticket,
            (Some(_), None) => true,
            (None, _) => false,
        };
        if releases {
            state.holder = None;
            drop(state);
            self.released.notify_one();
        }
        releases
    }
}

/// Table of per-key locks.
#[derive(Default)]
pub struct KeyLockTable {
    slots: Mutex<FxHashMap<String, Arc<Slot>>>,
}

impl KeyLockTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until `key` is free, then hold it until the guard drops.
    pub fn lock(&self, key: &str) -> KeyGuard {
        let slot = {
            let mut slots = self.slots.lock();
            match slots.get(key) {
                Some(slot) => Arc::clone(slot),
                None => {
                    let slot = Arc::new(Slot::default());
                    slots.insert(key.to_owned(), Arc::clone(&slot));
                    slot
                }
            }
        };
        // The table lock is released before waiting on the key.
        let ticket = slot.acquire();
        tracing::trace!(key, ticket, "key locked");
        KeyGuard { slot, ticket }
    }

    /// Release `key` regardless of which guard holds it.
    ///
    /// No-op (returning `false`) for a key that was never locked or is not
    /// currently held. A guard whose lock was released this way does nothing
    /// when it drops.
    pub fn unlock(&self, key: &str) -> bool {
        let slot = self.slots.lock().get(key).map(Arc::clone);
        slot.is_some_and(|slot| slot.release(None))
    }

    /// Number of keys that have ever been locked.
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }
}

/// Holds one key of a [`KeyLockTable`]; releases it on drop.
#[must_use = "the key is released as soon as the guard is dropped"]
pub struct KeyGuard {
    slot: Arc<Slot>,
    ticket: u64,
}

impl Drop for KeyGuard {
    fn drop(&mut self) {
        self.slot.release(Some(self.ticket));
    }
}
