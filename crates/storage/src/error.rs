// SPDX-License-Identifier: MIT

//! Storage failure surface (§7).

use dwf_core::{NamePath, WorkflowIdentifier};
use thiserror::Error;

/// `retrieve_workflow_information` / `retrieve_computations` /
/// `upsert_computations` were asked about an identifier that was never
/// registered with this storage.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("workflow not found: {identifier}")]
pub struct WorkflowNotFound {
    pub identifier: WorkflowIdentifier,
}

/// Reserved for implementations that enforce uniqueness of a computation
/// path on creation (§7 "Workflow registration"). The reference in-memory
/// storage upserts rather than rejecting, so it never raises this itself.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("computation already exists: {identifier} at {path}")]
pub struct ComputationAlreadyExists {
    pub identifier: WorkflowIdentifier,
    pub path: NamePath,
}
