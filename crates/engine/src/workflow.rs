// SPDX-License-Identifier: MIT

//! The pair of hooks a host registers per `workflow_code` to round-trip a
//! workflow's top-level computation through storage (§6). Distinct from
//! [`dwf_storage::NewWorkflowSaver`], which only needs to produce the very
//! first snapshot of a workflow that doesn't exist yet.

use dwf_core::{NamePath, WorkflowIdentifier};
use dwf_storage::WorkflowInformation;

use crate::computation::Computation;
use crate::job_tracker::JobTracker;

/// Reconstructs a workflow's root [`Computation`] and its
/// [`WorkflowSaver`] counterpart from persisted [`WorkflowInformation`].
///
/// Mirrors a classmethod in the source grammar: implementors are looked up
/// by `workflow_code` through whatever registry a host builds (out of
/// scope here), not dispatched through a `dyn` trait object, since the
/// return type depends on which concrete workflow it is.
pub trait WorkflowLoader: Sized {
    fn from_storage(
        identifier: &WorkflowIdentifier,
        information: &serde_json::Value,
    ) -> (Box<dyn WorkflowSaver>, Box<dyn Computation>);
}

/// Produces the [`WorkflowInformation`] to persist after a run, given this
/// run's [`JobTracker`] and (if one existed) the information that was
/// loaded at the start of the run (§4.5, §6).
pub trait WorkflowSaver {
    fn for_storage(
        &self,
        identifier: &WorkflowIdentifier,
        job_tracker: &JobTracker,
        original: Option<&WorkflowInformation>,
    ) -> WorkflowInformation;
}

/// Reduce `job_tracker`'s tracked jobs under `root` into `(earliest_due_at,
/// earliest_next_schedule_at)`, the pair every [`WorkflowSaver`] needs to
/// stamp onto its [`WorkflowInformation`] (§4.4).
pub fn earliest_schedule_hints(
    job_tracker: &JobTracker,
    root: &NamePath,
    delta_base_from: std::time::SystemTime,
    must_be_greater_than: std::time::SystemTime,
) -> (Option<std::time::SystemTime>, Option<std::time::SystemTime>) {
    (
        job_tracker.earliest_due_at(root, delta_base_from, must_be_greater_than),
        job_tracker.earliest_next_schedule_at(root, delta_base_from, must_be_greater_than),
    )
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
