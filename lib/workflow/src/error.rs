//! Error types for the workflow crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `CommitError`: resolving refs and commits against the repository history
//! - `DetectError`: scanning a commit tree for matching workflows
//! - `DefinitionError`: turning workflow content into jobs or cron specs
//! - `StoreError`: run persistence and queries
//!
//! Callers add repository or workflow context with `.context()`.

use std::fmt;
use tripwire_core::{RefName, RunId};

/// Errors from the commit source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitError {
    /// The reference does not resolve to a commit.
    RefNotFound { git_ref: RefName },
    /// The branch containing a commit could not be determined.
    BranchLookup { commit_sha: String, reason: String },
    /// The underlying repository could not be read.
    Backend { reason: String },
}

impl fmt::Display for CommitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RefNotFound { git_ref } => write!(f, "reference not found: {git_ref}"),
            Self::BranchLookup { commit_sha, reason } => {
                write!(f, "branch lookup failed for commit {commit_sha}: {reason}")
            }
            Self::Backend { reason } => write!(f, "repository read failed: {reason}"),
        }
    }
}

impl std::error::Error for CommitError {}

/// Errors from workflow detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectError {
    /// The workflow directory could not be listed or read.
    TreeUnreadable { commit_sha: String, reason: String },
}

impl fmt::Display for DetectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TreeUnreadable { commit_sha, reason } => {
                write!(f, "cannot read workflows at {commit_sha}: {reason}")
            }
        }
    }
}

impl std::error::Error for DetectError {}

/// Errors from parsing workflow content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    /// The content is not a valid workflow definition.
    Malformed { reason: String },
    /// The workflow declares no jobs.
    NoJobs,
    /// Two jobs share an id.
    DuplicateJob { job_id: String },
    /// A job needs a job that does not exist.
    UnknownNeed { job_id: String, need: String },
    /// Job dependencies contain a cycle.
    CycleDetected { job_id: String },
}

impl fmt::Display for DefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { reason } => write!(f, "malformed workflow: {reason}"),
            Self::NoJobs => write!(f, "workflow declares no jobs"),
            Self::DuplicateJob { job_id } => write!(f, "duplicate job id '{job_id}'"),
            Self::UnknownNeed { job_id, need } => {
                write!(f, "job '{job_id}' needs unknown job '{need}'")
            }
            Self::CycleDetected { job_id } => {
                write!(f, "job dependencies contain a cycle through '{job_id}'")
            }
        }
    }
}

impl std::error::Error for DefinitionError {}

/// Errors from the run store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The run does not exist.
    RunNotFound { run_id: RunId },
    /// The backing store rejected or failed the operation.
    Backend {
        operation: &'static str,
        reason: String,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RunNotFound { run_id } => write!(f, "run not found: {run_id}"),
            Self::Backend { operation, reason } => {
                write!(f, "store operation '{operation}' failed: {reason}")
            }
        }
    }
}

impl std::error::Error for StoreError {}
