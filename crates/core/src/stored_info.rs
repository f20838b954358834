// SPDX-License-Identifier: MIT

//! The persistence-layer wrapper around [`State`] (§3, §4.1): the only
//! sanctioned way a [`ComputationResult`] is folded back into storage.

use crate::results::ComputationResult;
use crate::state::{Given, State, StateOverrides};

/// Information stored for a single computation. Wraps a [`State`] with a
/// `merge` that threads a [`ComputationResult`] through it.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredInfo {
    pub state: State,
}

impl StoredInfo {
    pub fn new(state: State) -> Self {
        Self { state }
    }

    /// Merge a [`ComputationResult`] into this stored state. Carries
    /// `error`/`execution_state`/`result_state` from the result's own
    /// (already-transitioned) state, and `due_at`/`schedule_next_latest_at`
    /// from the result's top-level scheduling hints (which may be
    /// `NotGiven`, leaving the stored value untouched) — not from the
    /// result's state, which never carries them (§4.1, testable property 9).
    pub fn merge(&self, result: &ComputationResult) -> StoredInfo {
        StoredInfo {
            state: self.state.with_overrides(StateOverrides {
                error: Given::Given(result.state.error.clone()),
                execution_state: Given::Given(result.state.execution_state),
                result_state: Given::Given(result.state.result_state),
                due_at: result.due_at,
                schedule_next_latest_at: result.schedule_next_latest_at,
            }),
        }
    }
}

#[cfg(test)]
#[path = "stored_info_tests.rs"]
mod tests;
