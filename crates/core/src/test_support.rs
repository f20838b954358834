// SPDX-License-Identifier: MIT

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::computation_state::ComputationState;
use crate::error::{RawError, ResolvedError, SimpleError};
use crate::id::WorkflowIdentifier;
use crate::path::{JobPath, Name, NamePath};
use crate::state::{ExecutionState, ResultState, State};
use std::time::{Duration, UNIX_EPOCH};

/// A fixed instant, useful as `created_at`/`now` in tests that don't care
/// about wall-clock time, only relative ordering.
pub fn epoch_plus(secs: u64) -> std::time::SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs)
}

pub fn workflow_id(s: &str) -> WorkflowIdentifier {
    WorkflowIdentifier::new(s)
}

/// Build a `NamePath` from plain segment strings, panicking on invalid
/// names (test fixtures are expected to use valid ones).
pub fn name_path(segments: &[&str]) -> NamePath {
    NamePath::from(
        segments
            .iter()
            .map(|s| Name::for_job(*s).expect("test fixture name is valid"))
            .collect::<Vec<_>>(),
    )
}

pub fn job_path(identifier: &WorkflowIdentifier, prefix: &[&str], job_name: &str) -> JobPath {
    JobPath::new(identifier.clone(), name_path(prefix), job_name).expect("test fixture name is valid")
}

/// A fresh, pending `State` at a fixed instant.
pub fn fresh_state() -> State {
    State::fresh(epoch_plus(0))
}

/// A `State` already in the given execution/result states, otherwise fresh.
pub fn state_in(execution_state: ExecutionState, result_state: ResultState) -> State {
    State {
        execution_state,
        result_state,
        ..fresh_state()
    }
}

/// A `ComputationState` with no resolved error, rooted at `path` in `identifier`.
pub fn computation_state(identifier: &WorkflowIdentifier, path: NamePath, state: State) -> ComputationState {
    ComputationState::new(state, identifier.clone(), path, None)
}

pub fn simple_raw_error(message: &str) -> RawError {
    RawError::new("simple", 1, message)
}

pub fn simple_resolved_error(message: &str) -> Box<dyn ResolvedError> {
    Box::new(SimpleError {
        serialized: message.to_string(),
    })
}
