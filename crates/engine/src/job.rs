// SPDX-License-Identifier: MIT

//! The run-scoped execution record for a single addressable computation
//! (§4.1, §4.4): what it looked like before this run, and the append-only
//! log of what happened to it during this run.

use std::sync::Arc;

use dwf_core::{ComputationResult, ComputationState, Name, ScheduleHint, State};

/// One snapshot of a computation: the [`ComputationState`] a caller saw (or
/// would see) plus the [`ComputationResult`] that produced it. Cheaply
/// shared via [`JobRef`] — executions accumulate by reference, the way the
/// reference implementation's job log accumulates by object identity.
pub struct Job {
    pub name: Name,
    pub state: ComputationState,
    result: ComputationResult,
}

/// Shared handle to a [`Job`]. `JobStatus::clone` copies the `Vec` holding
/// these, not the jobs themselves — two clones can append independently
/// without affecting each other or the jobs already recorded (§4.4,
/// testable property 5).
pub type JobRef = Arc<Job>;

impl Job {
    pub fn new(name: Name, state: ComputationState, result: ComputationResult) -> Self {
        Self { name, state, result }
    }

    /// The result that produced this snapshot.
    pub fn result(&self) -> &ComputationResult {
        &self.result
    }

    /// `true` once the computation has reached a terminal execution state.
    pub fn done(&self) -> bool {
        self.state.execution_state() == dwf_core::ExecutionState::Stopped
    }

    pub fn success(&self) -> bool {
        self.state.result_state() == dwf_core::ResultState::Success
    }

    pub fn cancelled(&self) -> bool {
        self.state.result_state() == dwf_core::ResultState::Cancelled
    }

    /// The observable exception, if any (delegates to [`ComputationState::exception`]).
    pub fn exception(&self) -> Option<Box<dyn std::error::Error + Send + Sync>> {
        self.state.exception()
    }

    fn due_at_hint(&self) -> ScheduleHint {
        self.result.due_at.clone().into_option().flatten()
    }

    fn schedule_next_latest_at_hint(&self) -> ScheduleHint {
        self.result.schedule_next_latest_at.clone().into_option().flatten()
    }
}

/// Run-scoped history for one addressable computation (§4.4): the snapshot
/// carried over from a prior run, plus every execution recorded this run.
#[derive(Clone)]
pub struct JobStatus {
    pub name: Name,
    pub job_before: Option<JobRef>,
    job_executions: Vec<JobRef>,
}

impl JobStatus {
    /// No prior run, no executions yet: a computation never seen before.
    pub fn fresh(name: Name) -> Self {
        Self {
            name,
            job_before: None,
            job_executions: Vec::new(),
        }
    }

    /// Carries a prior run's final snapshot forward as `job_before`, with no
    /// executions recorded yet this run.
    pub fn from_prior(name: Name, job_before: Option<JobRef>) -> Self {
        Self {
            name,
            job_before,
            job_executions: Vec::new(),
        }
    }

    pub fn add_execution(&mut self, job: JobRef) {
        self.job_executions.push(job);
    }

    pub fn job_executions(&self) -> &[JobRef] {
        &self.job_executions
    }

    /// The most recent execution this run, or `None` if nothing ran yet —
    /// this does *not* fall back to `job_before` (§4.4).
    pub fn latest(&self) -> Option<&JobRef> {
        self.job_executions.last()
    }

    /// Resolve this job's due date against `delta_base_from`/`must_be_greater_than`
    /// (§4.4, testable property 8). `None` if nothing ran this turn: a
    /// status carried over from a prior run with no execution this tick has
    /// no scheduling hint to contribute.
    pub fn earliest_due_at(
        &self,
        delta_base_from: std::time::SystemTime,
        must_be_greater_than: std::time::SystemTime,
    ) -> Option<std::time::SystemTime> {
        let job = self.latest()?;
        State::resolve_schedule_hint(job.due_at_hint(), delta_base_from, must_be_greater_than)
    }

    pub fn earliest_next_schedule_at(
        &self,
        delta_base_from: std::time::SystemTime,
        must_be_greater_than: std::time::SystemTime,
    ) -> Option<std::time::SystemTime> {
        let job = self.latest()?;
        State::resolve_schedule_hint(
            job.schedule_next_latest_at_hint(),
            delta_base_from,
            must_be_greater_than,
        )
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
