// SPDX-License-Identifier: MIT

//! Raw/resolved error model and the two synthesized state-transition
//! exceptions (§7).

use crate::id::WorkflowIdentifier;
use crate::path::NamePath;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A serialized error as stored: `(format_code, format_version, serialized)`.
/// Round-trippable; carries no behavior of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawError {
    pub format_code: String,
    pub format_version: u32,
    pub serialized: String,
}

impl RawError {
    pub fn new(format_code: impl Into<String>, format_version: u32, serialized: impl Into<String>) -> Self {
        Self {
            format_code: format_code.into(),
            format_version,
            serialized: serialized.into(),
        }
    }
}

/// A [`RawError`] promoted by an [`ErrorResolver`]: knows how to materialize
/// a concrete exception for a given `(identifier, path)`.
pub trait ResolvedError: fmt::Debug + Send + Sync {
    /// The raw form this resolved error was produced from (or an equivalent
    /// round-trip of it).
    fn raw(&self) -> RawError;

    /// Materialize a concrete exception observable by callers.
    fn as_exception(
        &self,
        identifier: &WorkflowIdentifier,
        path: &NamePath,
    ) -> Box<dyn std::error::Error + Send + Sync>;
}

/// Default resolved-error representation: an opaque string payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleError {
    pub serialized: String,
}

impl ResolvedError for SimpleError {
    fn raw(&self) -> RawError {
        RawError::new("simple", 1, self.serialized.clone())
    }

    fn as_exception(
        &self,
        identifier: &WorkflowIdentifier,
        path: &NamePath,
    ) -> Box<dyn std::error::Error + Send + Sync> {
        Box::new(ComputationErrored {
            identifier: identifier.clone(),
            path: path.clone(),
            error: self.serialized.clone(),
        })
    }
}

/// Promotes a [`RawError`] to a [`ResolvedError`]. Must be idempotent for
/// inputs that are already in resolved form.
pub trait ErrorResolver {
    fn resolve_error(&self, raw: &RawError) -> Result<Box<dyn ResolvedError>, UnresolvableError>;
}

/// Default resolver: understands only the `"simple"` format produced by
/// [`SimpleExceptionSerializer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultErrorResolver;

impl ErrorResolver for DefaultErrorResolver {
    fn resolve_error(&self, raw: &RawError) -> Result<Box<dyn ResolvedError>, UnresolvableError> {
        match raw.format_code.as_str() {
            "simple" => Ok(Box::new(SimpleError {
                serialized: raw.serialized.clone(),
            })),
            other => Err(UnresolvableError {
                format_code: other.to_string(),
            }),
        }
    }
}

/// A stored error's `format_code` is not recognized by the resolver in use.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot resolve error with format_code {format_code:?}")]
pub struct UnresolvableError {
    pub format_code: String,
}

/// Converts an arbitrary exception raised by a computation into a
/// [`RawError`]. Must never itself raise.
pub trait ExceptionSerializer {
    fn serialize_exception(&self, exc: &(dyn std::error::Error + 'static)) -> RawError;
}

/// Default serializer: stringifies the exception via its `Display` impl.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleExceptionSerializer;

impl ExceptionSerializer for SimpleExceptionSerializer {
    fn serialize_exception(&self, exc: &(dyn std::error::Error + 'static)) -> RawError {
        RawError::new("simple", 1, exc.to_string())
    }
}

/// Synthesized when a computation in `CANCELLED` is observed with no
/// stored error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("computation {path} in workflow {identifier} was cancelled")]
pub struct ComputationCancelled {
    pub identifier: WorkflowIdentifier,
    pub path: NamePath,
}

/// Synthesized when a `*_FAILURE` computation is observed with no stored
/// error, or via a resolved error's [`ResolvedError::as_exception`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("computation {path} in workflow {identifier} errored: {error}")]
pub struct ComputationErrored {
    pub identifier: WorkflowIdentifier,
    pub path: NamePath,
    pub error: String,
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
