// SPDX-License-Identifier: MIT

//! The transition factory (§4.1): every legal move a computation can make
//! from its current [`State`], and the [`ComputationResult`] it produces.

use crate::computation_state::ComputationState;
use crate::error::{ExceptionSerializer, ResolvedError};
use crate::state::{ExecutionState, Given, ResultState, ScheduleBy, State, StateOverrides};

/// What a computation returns from `execute` (§3, §4.1): the new state plus
/// an audit message and scheduling hints.
#[derive(Debug, Clone)]
pub struct ComputationResult {
    pub state: State,
    pub audit_message: String,
    pub due_at: ScheduleBy,
    pub schedule_next_latest_at: ScheduleBy,
}

/// Optional scheduling-hint overrides shared by every [`Results`] method.
/// Named-field form rather than two more positional parameters, matching
/// the keyword-only resolution in `DESIGN.md`'s Open Question 4.
#[derive(Debug, Clone, Default)]
pub struct ScheduleHints {
    pub due_at: ScheduleBy,
    pub schedule_next_latest_at: ScheduleBy,
}

/// Factory bound to a computation's original state (§4.1). Each method
/// enforces one legal transition of the state machine; there is no way to
/// construct a [`ComputationResult`] that isn't one of these.
pub struct Results {
    original_state: State,
}

impl Results {
    /// Bind a factory to `computation_state`'s original state.
    pub fn using(computation_state: &ComputationState) -> Self {
        Self {
            original_state: computation_state.original_state().clone(),
        }
    }

    fn transition(&self, audit_message: String, hints: ScheduleHints, overrides: StateOverrides) -> ComputationResult {
        ComputationResult {
            state: self.original_state.with_overrides(overrides),
            audit_message,
            due_at: hints.due_at,
            schedule_next_latest_at: hints.schedule_next_latest_at,
        }
    }

    /// No transition: state is unchanged. Carries forward the original
    /// state's scheduling hints when the caller omits them and the
    /// original state already has a non-null hint (§4.1, property B).
    pub fn no_change(&self, audit_message: impl Into<String>, hints: ScheduleHints) -> ComputationResult {
        let due_at = match hints.due_at {
            Given::NotGiven if self.original_state.due_at.is_some() => Given::Given(self.original_state.due_at),
            other => other,
        };
        let schedule_next_latest_at = match hints.schedule_next_latest_at {
            Given::NotGiven if self.original_state.schedule_next_latest_at.is_some() => {
                Given::Given(self.original_state.schedule_next_latest_at)
            }
            other => other,
        };
        self.transition(
            audit_message.into(),
            ScheduleHints {
                due_at,
                schedule_next_latest_at,
            },
            StateOverrides::default(),
        )
    }

    pub fn pending(&self, audit_message: impl Into<String>, hints: ScheduleHints) -> ComputationResult {
        self.transition(
            audit_message.into(),
            hints,
            StateOverrides {
                error: Given::Given(None),
                execution_state: Given::Given(ExecutionState::Pending),
                result_state: Given::Given(ResultState::Absent),
                ..Default::default()
            },
        )
    }

    pub fn progressing(&self, audit_message: impl Into<String>, hints: ScheduleHints) -> ComputationResult {
        self.transition(
            audit_message.into(),
            hints,
            StateOverrides {
                error: Given::Given(None),
                execution_state: Given::Given(ExecutionState::Progressing),
                result_state: Given::Given(ResultState::Absent),
                ..Default::default()
            },
        )
    }

    pub fn success(&self, audit_message: impl Into<String>, hints: ScheduleHints) -> ComputationResult {
        self.transition(
            audit_message.into(),
            hints,
            StateOverrides {
                error: Given::Given(None),
                execution_state: Given::Given(ExecutionState::Stopped),
                result_state: Given::Given(ResultState::Success),
                ..Default::default()
            },
        )
    }

    pub fn paused(&self, audit_message: impl Into<String>, hints: ScheduleHints) -> ComputationResult {
        self.transition(
            audit_message.into(),
            hints,
            StateOverrides {
                error: Given::Given(None),
                execution_state: Given::Given(ExecutionState::Paused),
                result_state: Given::Given(ResultState::Absent),
                ..Default::default()
            },
        )
    }

    pub fn cancelled(&self, audit_message: impl Into<String>, hints: ScheduleHints) -> ComputationResult {
        self.transition(
            audit_message.into(),
            hints,
            StateOverrides {
                error: Given::Given(None),
                execution_state: Given::Given(ExecutionState::Stopped),
                result_state: Given::Given(ResultState::Cancelled),
                ..Default::default()
            },
        )
    }

    pub fn cancelling(&self, audit_message: impl Into<String>, hints: ScheduleHints) -> ComputationResult {
        self.transition(
            audit_message.into(),
            hints,
            StateOverrides {
                error: Given::Given(None),
                execution_state: Given::Given(ExecutionState::Cancelling),
                result_state: Given::Given(ResultState::Absent),
                ..Default::default()
            },
        )
    }

    pub fn handled_failure(
        &self,
        error: &dyn ResolvedError,
        audit_message: impl Into<String>,
        hints: ScheduleHints,
    ) -> ComputationResult {
        self.transition(
            audit_message.into(),
            hints,
            StateOverrides {
                error: Given::Given(Some(error.raw())),
                execution_state: Given::Given(ExecutionState::Stopped),
                result_state: Given::Given(ResultState::HandledFailure),
                ..Default::default()
            },
        )
    }

    pub fn unhandled_failure(
        &self,
        exc: &(dyn std::error::Error + 'static),
        audit_message: impl Into<String>,
        exception_serializer: &dyn ExceptionSerializer,
        hints: ScheduleHints,
    ) -> ComputationResult {
        self.transition(
            audit_message.into(),
            hints,
            StateOverrides {
                error: Given::Given(Some(exception_serializer.serialize_exception(exc))),
                execution_state: Given::Given(ExecutionState::Stopped),
                result_state: Given::Given(ResultState::UnhandledFailure),
                ..Default::default()
            },
        )
    }
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod tests;
