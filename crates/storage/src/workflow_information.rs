// SPDX-License-Identifier: MIT

//! Opaque-to-the-engine bookkeeping persisted per workflow (§4.5).

use dwf_core::WorkflowIdentifier;
use serde_json::Value;
use std::collections::BTreeSet;
use std::time::SystemTime;

/// The information persisted for a workflow, opaque to the engine: it is
/// produced and interpreted entirely by the `WorkflowLoader`/`WorkflowSaver`
/// pair registered for a given `workflow_code`.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowInformation {
    pub workflow_code: String,
    pub workflow_version: u32,
    pub information: Value,
    pub tags: BTreeSet<String>,
    pub earliest_due_at: Option<SystemTime>,
    pub earliest_next_schedule_at: Option<SystemTime>,
}

impl WorkflowInformation {
    pub fn new(workflow_code: impl Into<String>, workflow_version: u32, information: Value) -> Self {
        Self {
            workflow_code: workflow_code.into(),
            workflow_version,
            information,
            tags: BTreeSet::new(),
            earliest_due_at: None,
            earliest_next_schedule_at: None,
        }
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Produces the initial [`WorkflowInformation`] for a workflow that doesn't
/// exist in storage yet (§6). Lives in this crate rather than alongside the
/// richer `WorkflowLoader`/`WorkflowSaver` pair in `dwf-engine`, since
/// `store_new_workflow` (a `Storage` method) must be able to call it without
/// `dwf-storage` depending on `dwf-engine`'s `Job`/`JobTracker` types.
pub trait NewWorkflowSaver {
    fn for_storage(&self, identifier: &WorkflowIdentifier) -> WorkflowInformation;
}
