// SPDX-License-Identifier: MIT

//! The scheduler-agnostic run loop (§4.2) and the restricted facade a
//! computation uses to invoke children and resolve external input (§4.3).

use dwf_core::{
    Clock, ComputationResult, ComputationState, DefaultErrorResolver, ErrorResolver, ExceptionSerializer, Given,
    ResolvedError, Results, ScheduleHints, SimpleExceptionSerializer, State,
};
use dwf_core::{ExternalInputPath, JobPath};

use crate::computation::{Computation, ExternalInputResolver};
use crate::job::{Job, JobRef};
use crate::job_tracker::JobTracker;

/// Whether `Engine::run` should execute the computation, skip execution and
/// return its current snapshot, or execute a stand-in computation instead
/// of the one identified by `job_path` (§4.2, testable property 11).
pub enum OverrideExecute<'a> {
    /// Execute `computation` as usual.
    None,
    /// Return the current snapshot without calling `execute` at all, and
    /// without recording an execution (`ComputationExecutor::get_without_executing`).
    Pure,
    /// Call `execute` on this computation instead, but still build the
    /// resulting snapshot's error-resolution identity from `computation`.
    With(&'a dyn Computation),
}

/// Drives one workflow run: read-resolve-execute-record for every
/// computation it's asked to touch, never letting a computation's failure
/// escape as anything but an `UNHANDLED_FAILURE` snapshot (§4.2).
pub struct Engine {
    clock: Box<dyn Clock>,
    default_error_resolver: Box<dyn ErrorResolver>,
    default_exception_serializer: Box<dyn ExceptionSerializer>,
}

impl Engine {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            default_error_resolver: Box::new(DefaultErrorResolver),
            default_exception_serializer: Box::new(SimpleExceptionSerializer),
        }
    }

    /// Run (or peek at) the computation addressed by `job_path` (§4.2).
    pub fn run(
        &self,
        job_path: &JobPath,
        job_tracker: &mut JobTracker,
        computation: &dyn Computation,
        override_execute: OverrideExecute<'_>,
    ) -> JobRef {
        let span = tracing::info_span!("engine.run", workflow = %job_path.identifier, path = %job_path.full_path());
        let _enter = span.enter();

        let result_before = {
            let status = job_tracker.job_status(job_path);
            status.job_before.as_ref().map(|job| job.result().clone())
        };

        let error_before = match self.resolve_error(job_path, computation, result_before.as_ref()) {
            ErrorResolution::Ok(error) => error,
            ErrorResolution::Failed(failure) => return self.record(job_tracker, job_path, failure, None),
        };

        let job_pre = self.make_job(job_path, result_before, error_before);

        if matches!(override_execute, OverrideExecute::Pure) {
            tracing::debug!("returning current snapshot without executing");
            return job_pre;
        }

        let execution = {
            let mut executor = ComputationExecutor {
                engine: self,
                job_tracker: &mut *job_tracker,
            };
            let intention: &dyn Computation = match &override_execute {
                OverrideExecute::With(stand_in) => *stand_in,
                _ => computation,
            };
            intention.execute(&job_pre.state, &mut executor)
        };

        let result = match execution {
            Ok(result) => result,
            Err(exc) => {
                tracing::warn!(error = %exc, "unhandled exception caught by internal logic");
                let exception_serializer = computation.exception_serializer().unwrap_or(self.default_exception_serializer.as_ref());
                Results::using(&job_pre.state).unhandled_failure(
                    exc.as_ref(),
                    "unhandled exception caught by internal logic",
                    exception_serializer,
                    ScheduleHints::default(),
                )
            }
        };

        match self.resolve_error(job_path, computation, Some(&result)) {
            ErrorResolution::Ok(error_after) => self.record(job_tracker, job_path, result, error_after),
            ErrorResolution::Failed(failure) => self.record(job_tracker, job_path, failure, None),
        }
    }

    /// Resolve `path`'s current value without invoking anything (§6).
    pub fn external_input<T>(
        &self,
        path: &ExternalInputPath,
        resolver: &dyn ExternalInputResolver<T>,
    ) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
        let span = tracing::info_span!("engine.external_input", workflow = %path.identifier, name = %path.external_input_name);
        let _enter = span.enter();
        resolver.resolve()
    }

    fn resolve_error(
        &self,
        job_path: &JobPath,
        computation: &dyn Computation,
        result: Option<&ComputationResult>,
    ) -> ErrorResolution {
        let Some(result) = result else {
            return ErrorResolution::Ok(None);
        };
        let Some(raw) = result.state.error.as_ref() else {
            return ErrorResolution::Ok(None);
        };
        let resolver = computation.error_resolver().unwrap_or(self.default_error_resolver.as_ref());
        match resolver.resolve_error(raw) {
            Ok(resolved) => ErrorResolution::Ok(Some(resolved)),
            Err(unresolvable) => {
                tracing::error!(format_code = %raw.format_code, "stored error could not be resolved");
                let cs = ComputationState::new(
                    result.state.clone(),
                    job_path.identifier.clone(),
                    job_path.full_path(),
                    None,
                );
                let exception_serializer = computation.exception_serializer().unwrap_or(self.default_exception_serializer.as_ref());
                let failure = Results::using(&cs).unhandled_failure(
                    &unresolvable,
                    "error resolution failed",
                    exception_serializer,
                    ScheduleHints::default(),
                );
                ErrorResolution::Failed(failure)
            }
        }
    }

    fn make_job(
        &self,
        job_path: &JobPath,
        result: Option<ComputationResult>,
        error: Option<Box<dyn ResolvedError>>,
    ) -> JobRef {
        let original_state = match &result {
            Some(result) => result.state.clone(),
            None => State::fresh(self.clock.now()),
        };
        let computation_state = ComputationState::new(
            original_state.clone(),
            job_path.identifier.clone(),
            job_path.full_path(),
            error,
        );
        let result = result.unwrap_or_else(|| ComputationResult {
            state: original_state,
            audit_message: String::new(),
            due_at: Given::NotGiven,
            schedule_next_latest_at: Given::NotGiven,
        });
        JobRef::new(Job::new(job_path.job_name.clone(), computation_state, result))
    }

    fn record(
        &self,
        job_tracker: &mut JobTracker,
        job_path: &JobPath,
        result: ComputationResult,
        error: Option<Box<dyn ResolvedError>>,
    ) -> JobRef {
        let job_post = self.make_job(job_path, Some(result), error);
        let status = job_tracker.job_status(job_path);
        status.add_execution(job_post.clone());
        job_post
    }
}

enum ErrorResolution {
    Ok(Option<Box<dyn ResolvedError>>),
    Failed(ComputationResult),
}

/// Restricted facade a computation uses from inside `execute` (§4.3): run a
/// child computation, peek at one without running it, or resolve a piece of
/// external input. A `JobPath` can only ever reach [`ComputationExecutor::run`]
/// and an `ExternalInputPath` can only ever reach
/// [`ComputationExecutor::external_input`] — the mismatched-intention
/// failure mode the source grammar raises at call time is a compile error
/// here instead.
pub struct ComputationExecutor<'a> {
    engine: &'a Engine,
    job_tracker: &'a mut JobTracker,
}

impl<'a> ComputationExecutor<'a> {
    pub fn run(&mut self, job_path: &JobPath, computation: &dyn Computation) -> JobRef {
        self.engine.run(job_path, self.job_tracker, computation, OverrideExecute::None)
    }

    /// Run `job_path`, but execute `stand_in` instead of `computation`
    /// (§4.2, testable property 11).
    pub fn run_override(&mut self, job_path: &JobPath, computation: &dyn Computation, stand_in: &dyn Computation) -> JobRef {
        self.engine
            .run(job_path, self.job_tracker, computation, OverrideExecute::With(stand_in))
    }

    /// Return `job_path`'s current snapshot without executing anything.
    pub fn get_without_executing(&mut self, job_path: &JobPath, computation: &dyn Computation) -> JobRef {
        self.engine.run(job_path, self.job_tracker, computation, OverrideExecute::Pure)
    }

    pub fn external_input<T>(
        &self,
        path: &ExternalInputPath,
        resolver: &dyn ExternalInputResolver<T>,
    ) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
        self.engine.external_input(path, resolver)
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
