// SPDX-License-Identifier: MIT

//! The immutable per-computation state value (§3, §4.1) and the `NotGiven`
//! sentinel that makes its `clone`-with-overrides total and unambiguous.

use crate::error::RawError;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};

/// Execution state ("motion"): total, ordinal per §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionState {
    Pending = 0,
    Progressing = 1,
    Cancelling = 2,
    Paused = 3,
    Stopped = 4,
}

/// Result state ("outcome"): total, ordinal per §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultState {
    Absent = 0,
    Success = 1,
    Cancelled = 2,
    HandledFailure = 3,
    UnhandledFailure = 4,
}

/// Sentinel distinct from `null`/`None`: "the caller omitted this argument".
///
/// Load-bearing for [`State`]'s override-based clone and for the
/// `no_change`-carries-dates rule in §4.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Given<T> {
    #[default]
    NotGiven,
    Given(T),
}

impl<T> Given<T> {
    pub fn is_given(&self) -> bool {
        matches!(self, Given::Given(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Given::NotGiven => None,
            Given::Given(v) => Some(v),
        }
    }
}

/// A point in time or a duration from some later-supplied base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleAt {
    At(SystemTime),
    After(Duration),
}

/// `due_at`/`schedule_next_latest_at` as stored on [`State`]: present or absent.
pub type ScheduleHint = Option<ScheduleAt>;

/// `due_at`/`schedule_next_latest_at` as passed to a [`crate::results::Results`]
/// constructor: omitted, explicitly absent, or present.
pub type ScheduleBy = Given<ScheduleHint>;

/// Field-by-field overrides for [`State::with_overrides`]. Omitted fields
/// (`Given::NotGiven`) preserve the current value; `created_at` has no
/// override slot because it never changes after `fresh` (§3).
#[derive(Debug, Clone, Default)]
pub struct StateOverrides {
    pub error: Given<Option<RawError>>,
    pub execution_state: Given<ExecutionState>,
    pub result_state: Given<ResultState>,
    pub due_at: Given<ScheduleHint>,
    pub schedule_next_latest_at: Given<ScheduleHint>,
}

/// Immutable per-computation state value (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub error: Option<RawError>,
    pub execution_state: ExecutionState,
    pub result_state: ResultState,
    pub created_at: SystemTime,
    pub due_at: ScheduleHint,
    pub schedule_next_latest_at: ScheduleHint,
}

impl State {
    /// A fresh `State` at workflow/computation instantiation: `PENDING`,
    /// `ABSENT`, no error, no scheduling hints, `created_at = now`.
    pub fn fresh(now: SystemTime) -> Self {
        Self {
            error: None,
            execution_state: ExecutionState::Pending,
            result_state: ResultState::Absent,
            created_at: now,
            due_at: None,
            schedule_next_latest_at: None,
        }
    }

    /// Total clone-with-overrides: every field not explicitly overridden
    /// keeps its current value. `created_at` is never overridable.
    pub fn with_overrides(&self, overrides: StateOverrides) -> State {
        State {
            error: match overrides.error {
                Given::NotGiven => self.error.clone(),
                Given::Given(e) => e,
            },
            execution_state: match overrides.execution_state {
                Given::NotGiven => self.execution_state,
                Given::Given(e) => e,
            },
            result_state: match overrides.result_state {
                Given::NotGiven => self.result_state,
                Given::Given(r) => r,
            },
            created_at: self.created_at,
            due_at: match overrides.due_at {
                Given::NotGiven => self.due_at,
                Given::Given(d) => d,
            },
            schedule_next_latest_at: match overrides.schedule_next_latest_at {
                Given::NotGiven => self.schedule_next_latest_at,
                Given::Given(d) => d,
            },
        }
    }

    /// Resolve a [`ScheduleHint`], converting a `Duration` relative to
    /// `delta_base_from` into an absolute instant, and filtering out
    /// instants earlier than `must_be_greater_than` (§4.4, testable
    /// property 8).
    pub fn resolve_schedule_hint(
        hint: ScheduleHint,
        delta_base_from: SystemTime,
        must_be_greater_than: SystemTime,
    ) -> Option<SystemTime> {
        let instant = match hint? {
            ScheduleAt::At(instant) => instant,
            ScheduleAt::After(duration) => delta_base_from + duration,
        };
        if instant < must_be_greater_than {
            None
        } else {
            Some(instant)
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
