//! Error types for the dispatch crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `ApprovalError`: the approval gate could not reach a decision for one run
//! - `DispatchError`: the dispatch as a whole failed and produced nothing

use std::fmt;
use tripwire_core::{RefName, UserId};

/// Errors from the approval gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApprovalError {
    /// The user's repository permission could not be resolved.
    PermissionLookup { user_id: UserId },
    /// Prior approved runs of the user could not be counted.
    ApprovedRunCount { user_id: UserId },
}

impl fmt::Display for ApprovalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PermissionLookup { user_id } => {
                write!(f, "cannot resolve repository permission of {user_id}")
            }
            Self::ApprovedRunCount { user_id } => {
                write!(f, "cannot count approved runs of {user_id}")
            }
        }
    }
}

impl std::error::Error for ApprovalError {}

/// Errors that abort a whole dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The event's reference did not resolve to a commit.
    ResolveCommit { git_ref: RefName },
    /// The pull request's base branch did not resolve to a commit.
    ResolveBaseCommit { base_branch: String },
    /// Workflow detection failed.
    DetectWorkflows { commit_sha: String },
    /// The event payload could not be serialized.
    SerializePayload,
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResolveCommit { git_ref } => write!(f, "cannot resolve commit for {git_ref}"),
            Self::ResolveBaseCommit { base_branch } => {
                write!(f, "cannot resolve base branch '{base_branch}'")
            }
            Self::DetectWorkflows { commit_sha } => {
                write!(f, "workflow detection failed at {commit_sha}")
            }
            Self::SerializePayload => write!(f, "cannot serialize event payload"),
        }
    }
}

impl std::error::Error for DispatchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_error_display() {
        let err = DispatchError::ResolveCommit {
            git_ref: RefName::from_branch("feature"),
        };
        assert_eq!(
            err.to_string(),
            "cannot resolve commit for refs/heads/feature"
        );
    }

    #[test]
    fn approval_error_display() {
        let user_id = UserId::new();
        let err = ApprovalError::ApprovedRunCount { user_id };
        assert!(err.to_string().contains("approved runs"));
    }
}
