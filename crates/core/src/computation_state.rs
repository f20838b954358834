// SPDX-License-Identifier: MIT

//! Read-only view handed to a computation's `execute`: the original state
//! plus a resolved error, path helpers, and logging context (§3, §4.1).

use crate::error::{ComputationCancelled, ComputationErrored, ResolvedError};
use crate::id::WorkflowIdentifier;
use crate::path::{ExternalInputPath, InvalidExternalInputName, InvalidJobName, JobPath, NamePath};
use crate::state::{ExecutionState, ResultState, ScheduleHint, State};

/// `(original_state, identifier, path, error)` plus derived accessors.
///
/// Produced fresh by the engine for each invocation; must not be retained
/// past the `execute` call that received it (§9).
pub struct ComputationState {
    original_state: State,
    identifier: WorkflowIdentifier,
    path: NamePath,
    error: Option<Box<dyn ResolvedError>>,
}

impl ComputationState {
    pub fn new(
        original_state: State,
        identifier: WorkflowIdentifier,
        path: NamePath,
        error: Option<Box<dyn ResolvedError>>,
    ) -> Self {
        Self {
            original_state,
            identifier,
            path,
            error,
        }
    }

    pub fn original_state(&self) -> &State {
        &self.original_state
    }

    pub fn identifier(&self) -> &WorkflowIdentifier {
        &self.identifier
    }

    pub fn path(&self) -> &NamePath {
        &self.path
    }

    pub fn execution_state(&self) -> ExecutionState {
        self.original_state.execution_state
    }

    pub fn result_state(&self) -> ResultState {
        self.original_state.result_state
    }

    pub fn due_at(&self) -> ScheduleHint {
        self.original_state.due_at
    }

    pub fn error(&self) -> Option<&dyn ResolvedError> {
        self.error.as_deref()
    }

    /// Derive the observable exception per §4.1's table, or `None` when the
    /// computation isn't in a failing/cancelled result state.
    pub fn exception(&self) -> Option<Box<dyn std::error::Error + Send + Sync>> {
        match (self.result_state(), &self.error) {
            (ResultState::Cancelled, None) => Some(Box::new(ComputationCancelled {
                identifier: self.identifier.clone(),
                path: self.path.clone(),
            })),
            (
                ResultState::Cancelled | ResultState::HandledFailure | ResultState::UnhandledFailure,
                Some(error),
            ) => Some(error.as_exception(&self.identifier, &self.path)),
            (
                result_state @ (ResultState::HandledFailure | ResultState::UnhandledFailure),
                None,
            ) => Some(Box::new(ComputationErrored {
                identifier: self.identifier.clone(),
                path: self.path.clone(),
                error: format!("{result_state:?}"),
            })),
            _ => None,
        }
    }

    /// A tracing span keyed on this computation's identity, for the
    /// duration of the `execute` call.
    pub fn logging_context(&self) -> tracing::Span {
        tracing::info_span!(
            "computation",
            workflow = %self.identifier,
            path = %self.path,
        )
    }

    /// Build a child `JobPath` rooted at this computation's own path.
    pub fn job_path(&self, job_name: impl Into<String>) -> Result<JobPath, InvalidJobName> {
        JobPath::new(self.identifier.clone(), self.path.clone(), job_name)
    }

    /// Build an `ExternalInputPath` under this computation's workflow.
    pub fn external_input_path(
        &self,
        name: impl Into<String>,
    ) -> Result<ExternalInputPath, InvalidExternalInputName> {
        ExternalInputPath::new(self.identifier.clone(), name)
    }
}

#[cfg(test)]
#[path = "computation_state_tests.rs"]
mod tests;
