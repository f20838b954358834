// SPDX-License-Identifier: MIT

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dwf-storage: the persistence contract (§4.5) and a reference in-memory
//! implementation. Per-workflow locking, workflow-information CRUD, and
//! computation-map CRUD live here; the engine and workflow protocol that
//! drive reads/writes through this contract live in `dwf-engine`.

mod error;
mod lock;
mod memory;
mod workflow_information;

pub use error::{ComputationAlreadyExists, WorkflowNotFound};
pub use lock::WorkflowLockGuard;
pub use memory::MemoryStorage;
pub use workflow_information::{NewWorkflowSaver, WorkflowInformation};

use dwf_core::{NamePath, StoredInfo, WorkflowIdentifier};
use std::collections::HashMap;

/// The persistence contract the engine and workflow registration depend on
/// (§4.5). Implementors must provide per-workflow atomicity under
/// [`Storage::hold_workflow_lock`]; everything else may be eventually
/// consistent with respect to concurrent callers that aren't holding it.
pub trait Storage: Send + Sync {
    /// Acquire the exclusive lock for `identifier`, blocking on contention.
    /// Not re-entrant (§5): callers must not nest acquisitions for the same
    /// identifier within one call chain.
    fn hold_workflow_lock(&self, identifier: &WorkflowIdentifier) -> WorkflowLockGuard;

    /// Allocate a globally unique identifier, persist the
    /// [`WorkflowInformation`] `new_saver` produces for it, and return it.
    fn store_new_workflow(&self, new_saver: &dyn NewWorkflowSaver) -> WorkflowIdentifier;

    /// Fails with [`WorkflowNotFound`] if `identifier` has never been
    /// registered.
    fn retrieve_workflow_information(
        &self,
        identifier: &WorkflowIdentifier,
    ) -> Result<WorkflowInformation, WorkflowNotFound>;

    /// Overwrites the stored information atomically.
    fn upsert_workflow_information(&self, identifier: &WorkflowIdentifier, info: WorkflowInformation);

    /// Fails with [`WorkflowNotFound`] if `identifier` has never been
    /// registered, even when its computation map is empty.
    fn retrieve_computations(
        &self,
        identifier: &WorkflowIdentifier,
    ) -> Result<HashMap<NamePath, StoredInfo>, WorkflowNotFound>;

    /// Merges `stored_infos` into the existing map by path: listed paths
    /// are overwritten, unlisted paths are preserved. Fails with
    /// [`WorkflowNotFound`] when `identifier` is unknown.
    fn upsert_computations(
        &self,
        identifier: &WorkflowIdentifier,
        stored_infos: HashMap<NamePath, StoredInfo>,
    ) -> Result<(), WorkflowNotFound>;
}
