// SPDX-License-Identifier: MIT

//! Hierarchical addressing: validated name segments and the two path types
//! a computation is addressed by.

use crate::id::WorkflowIdentifier;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// Name segments are non-empty ASCII word characters plus hyphen: no dots,
/// no whitespace. The source grammar's `^(?!.*[.\s])[\w-]+$` uses a negative
/// lookahead the `regex` crate doesn't support; it's redundant here since
/// `[A-Za-z0-9_-]+` already excludes `.` and whitespace by construction.
// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("static pattern is valid"));

fn is_valid_name(s: &str) -> bool {
    NAME_PATTERN.is_match(s)
}

/// A single validated path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Name(String);

impl Name {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A job name failed validation (§6 path grammar).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid job name: {attempted:?}")]
pub struct InvalidJobName {
    pub attempted: String,
}

/// An external-input name failed validation (§6 path grammar).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid external input name: {attempted:?}")]
pub struct InvalidExternalInputName {
    pub attempted: String,
}

impl Name {
    /// Validate `s` as a job name segment.
    pub fn for_job(s: impl Into<String>) -> Result<Name, InvalidJobName> {
        let s = s.into();
        if is_valid_name(&s) {
            Ok(Name(s))
        } else {
            Err(InvalidJobName { attempted: s })
        }
    }

    /// Validate `s` as an external-input name segment.
    pub fn for_external_input(s: impl Into<String>) -> Result<Name, InvalidExternalInputName> {
        let s = s.into();
        if is_valid_name(&s) {
            Ok(Name(s))
        } else {
            Err(InvalidExternalInputName { attempted: s })
        }
    }
}

/// An ordered, non-empty-segment sequence of [`Name`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct NamePath(Vec<Name>);

impl NamePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn segments(&self) -> &[Name] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a new path with `name` appended.
    pub fn child(&self, name: Name) -> NamePath {
        let mut segments = self.0.clone();
        segments.push(name);
        NamePath(segments)
    }

    /// Whether `self` is `prefix` followed by exactly zero or more segments.
    pub fn starts_with(&self, prefix: &NamePath) -> bool {
        self.0.len() >= prefix.0.len() && self.0[..prefix.0.len()] == prefix.0[..]
    }
}

impl From<Vec<Name>> for NamePath {
    fn from(segments: Vec<Name>) -> Self {
        Self(segments)
    }
}

impl fmt::Display for NamePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(Name::as_str)
            .collect::<Vec<_>>()
            .join("/");
        write!(f, "{}", joined)
    }
}

/// `(identifier, prefix, job_name)`; full path is `prefix ++ [job_name]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobPath {
    pub identifier: WorkflowIdentifier,
    pub prefix: NamePath,
    pub job_name: Name,
}

impl JobPath {
    pub fn new(
        identifier: WorkflowIdentifier,
        prefix: NamePath,
        job_name: impl Into<String>,
    ) -> Result<JobPath, InvalidJobName> {
        Ok(JobPath {
            identifier,
            prefix,
            job_name: Name::for_job(job_name)?,
        })
    }

    /// `prefix ++ [job_name]`.
    pub fn full_path(&self) -> NamePath {
        self.prefix.child(self.job_name.clone())
    }
}

/// `(identifier, external_input_name)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExternalInputPath {
    pub identifier: WorkflowIdentifier,
    pub external_input_name: Name,
}

impl ExternalInputPath {
    pub fn new(
        identifier: WorkflowIdentifier,
        external_input_name: impl Into<String>,
    ) -> Result<ExternalInputPath, InvalidExternalInputName> {
        Ok(ExternalInputPath {
            identifier,
            external_input_name: Name::for_external_input(external_input_name)?,
        })
    }
}

#[cfg(test)]
#[path = "path_tests.rs"]
mod tests;
