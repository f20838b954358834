// SPDX-License-Identifier: MIT

//! Reference in-memory [`Storage`] implementation (§4.5).

use crate::error::WorkflowNotFound;
use crate::lock::{self, LockRegistry, WorkflowLockGuard};
use crate::workflow_information::{NewWorkflowSaver, WorkflowInformation};
use crate::Storage;
use dwf_core::{IdGen, NamePath, StoredInfo, UlidIdGen, WorkflowIdentifier};
use parking_lot::Mutex;
use std::collections::HashMap;

/// In-memory reference implementation of [`Storage`]. Not durable across
/// process restarts; exists to exercise the engine's contract in tests and
/// as a template for real backends.
pub struct MemoryStorage {
    id_gen: Box<dyn IdGen>,
    locks: LockRegistry,
    workflows: Mutex<HashMap<WorkflowIdentifier, WorkflowInformation>>,
    computations: Mutex<HashMap<WorkflowIdentifier, HashMap<NamePath, StoredInfo>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::with_id_gen(Box::new(UlidIdGen))
    }

    /// Construct with an explicit [`IdGen`] — tests use a deterministic one.
    pub fn with_id_gen(id_gen: Box<dyn IdGen>) -> Self {
        Self {
            id_gen,
            locks: lock::new_registry(),
            workflows: Mutex::new(HashMap::new()),
            computations: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for MemoryStorage {
    fn hold_workflow_lock(&self, identifier: &WorkflowIdentifier) -> WorkflowLockGuard {
        lock::hold(&self.locks, identifier)
    }

    fn store_new_workflow(&self, new_saver: &dyn NewWorkflowSaver) -> WorkflowIdentifier {
        let identifier = WorkflowIdentifier::new(self.id_gen.next());
        let information = new_saver.for_storage(&identifier);
        self.workflows.lock().insert(identifier.clone(), information);
        identifier
    }

    fn retrieve_workflow_information(
        &self,
        identifier: &WorkflowIdentifier,
    ) -> Result<WorkflowInformation, WorkflowNotFound> {
        self.workflows
            .lock()
            .get(identifier)
            .cloned()
            .ok_or_else(|| WorkflowNotFound {
                identifier: identifier.clone(),
            })
    }

    fn upsert_workflow_information(&self, identifier: &WorkflowIdentifier, info: WorkflowInformation) {
        self.workflows.lock().insert(identifier.clone(), info);
    }

    fn retrieve_computations(
        &self,
        identifier: &WorkflowIdentifier,
    ) -> Result<HashMap<NamePath, StoredInfo>, WorkflowNotFound> {
        if !self.workflows.lock().contains_key(identifier) {
            return Err(WorkflowNotFound {
                identifier: identifier.clone(),
            });
        }
        Ok(self.computations.lock().get(identifier).cloned().unwrap_or_default())
    }

    fn upsert_computations(
        &self,
        identifier: &WorkflowIdentifier,
        stored_infos: HashMap<NamePath, StoredInfo>,
    ) -> Result<(), WorkflowNotFound> {
        if !self.workflows.lock().contains_key(identifier) {
            return Err(WorkflowNotFound {
                identifier: identifier.clone(),
            });
        }
        let mut computations = self.computations.lock();
        let entry = computations.entry(identifier.clone()).or_default();
        for (path, stored_info) in stored_infos {
            entry.insert(path, stored_info);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
