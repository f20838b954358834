// SPDX-License-Identifier: MIT

//! Per-workflow exclusive lock (§4.5, §5): not re-entrant, blocking on
//! contention, advisory-pruned from the registry once uncontended.

use dwf_core::WorkflowIdentifier;
use parking_lot::{Condvar, Mutex};
use std::collections::HashMap;
use std::sync::Arc;

struct LockState {
    locked: Mutex<bool>,
    cond: Condvar,
}

impl LockState {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            locked: Mutex::new(false),
            cond: Condvar::new(),
        })
    }

    fn acquire(self: &Arc<Self>) {
        let mut locked = self.locked.lock();
        while *locked {
            self.cond.wait(&mut locked);
        }
        *locked = true;
    }

    fn release(&self) {
        *self.locked.lock() = false;
        self.cond.notify_one();
    }
}

pub(crate) type LockRegistry = Arc<Mutex<HashMap<WorkflowIdentifier, Arc<LockState>>>>;

pub(crate) fn new_registry() -> LockRegistry {
    Arc::new(Mutex::new(HashMap::new()))
}

/// Held for the duration of a read-modify-write region against one
/// workflow's persisted state. Released on drop, including on panic
/// unwinding through the holder.
pub struct WorkflowLockGuard {
    identifier: WorkflowIdentifier,
    state: Arc<LockState>,
    registry: LockRegistry,
}

/// Acquire the lock for `identifier`, blocking until no other guard for the
/// same identifier is held. Not re-entrant: acquiring twice for the same
/// identifier on the same thread deadlocks, matching §5's "not re-entrant"
/// contract (the reference implementation detects contention, not misuse).
pub(crate) fn hold(registry: &LockRegistry, identifier: &WorkflowIdentifier) -> WorkflowLockGuard {
    let state = {
        let mut map = registry.lock();
        map.entry(identifier.clone()).or_insert_with(LockState::new).clone()
    };
    tracing::trace!(workflow = %identifier, "acquiring workflow lock");
    state.acquire();
    tracing::trace!(workflow = %identifier, "acquired workflow lock");
    WorkflowLockGuard {
        identifier: identifier.clone(),
        state,
        registry: registry.clone(),
    }
}

impl Drop for WorkflowLockGuard {
    fn drop(&mut self) {
        self.state.release();
        tracing::trace!(workflow = %self.identifier, "released workflow lock");

        // Advisory: only prune if nobody else is mid-acquire for this
        // identifier. Allowed to race and leave a stale entry (§4.5).
        let mut map = self.registry.lock();
        if let Some(state) = map.get(&self.identifier) {
            if Arc::strong_count(state) <= 2 {
                map.remove(&self.identifier);
            }
        }
    }
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
