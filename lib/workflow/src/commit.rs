//! Commits and the source that resolves them.

use crate::error::CommitError;
use async_trait::async_trait;
use rootcause::prelude::Report;
use serde::{Deserialize, Serialize};
use tripwire_core::{RefName, Repository};

/// A commit resolved from the repository history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Full commit hash.
    pub sha: String,
    /// Full commit message.
    pub message: String,
}

impl Commit {
    #[must_use]
    pub fn new(sha: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            sha: sha.into(),
            message: message.into(),
        }
    }

    /// First line of the commit message, used as run and schedule title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.message.split('\n').next().unwrap_or_default()
    }
}

/// Resolves references and commits against a repository's history.
#[async_trait]
pub trait CommitSource: Send + Sync {
    /// Resolves a reference (branch, tag, or other ref) to its commit.
    async fn get_commit(
        &self,
        repo: &Repository,
        git_ref: &RefName,
    ) -> Result<Commit, Report<CommitError>>;

    /// Returns the short name of the branch the commit was resolved from.
    async fn branch_name(
        &self,
        repo: &Repository,
        commit: &Commit,
    ) -> Result<String, Report<CommitError>>;
}
