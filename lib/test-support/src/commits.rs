//! Commit source backed by a ref table.

use async_trait::async_trait;
use rootcause::prelude::Report;
use std::collections::HashMap;
use std::sync::Mutex;
use tripwire_core::{RefName, Repository, RepositoryId};
use tripwire_workflow::{Commit, CommitError, CommitSource};

#[derive(Default)]
struct Refs {
    commits: HashMap<(RepositoryId, RefName), Commit>,
    branches: HashMap<String, String>,
}

/// Resolves refs from an in-memory table.
///
/// Commits registered under a branch ref also record that branch for
/// [`CommitSource::branch_name`]; the first branch a commit is seen on wins.
#[derive(Default)]
pub struct MemoryCommitSource {
    refs: Mutex<Refs>,
}

impl MemoryCommitSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Points `git_ref` of `repo` at `commit`.
    pub fn set_ref(&self, repo: &Repository, git_ref: RefName, commit: Commit) {
        let mut refs = self.refs.lock().unwrap();
        if let Some(branch) = git_ref.branch_name() {
            refs.branches
                .entry(commit.sha.clone())
                .or_insert_with(|| branch.to_string());
        }
        refs.commits.insert((repo.id, git_ref), commit);
    }

    /// Points a branch of `repo` at `commit`.
    pub fn set_branch(&self, repo: &Repository, branch: &str, commit: Commit) {
        self.set_ref(repo, RefName::from_branch(branch), commit);
    }
}

#[async_trait]
impl CommitSource for MemoryCommitSource {
    async fn get_commit(
        &self,
        repo: &Repository,
        git_ref: &RefName,
    ) -> Result<Commit, Report<CommitError>> {
        let refs = self.refs.lock().unwrap();
        refs.commits
            .get(&(repo.id, git_ref.clone()))
            .cloned()
            .ok_or_else(|| {
                CommitError::RefNotFound {
                    git_ref: git_ref.clone(),
                }
                .into()
            })
    }

    async fn branch_name(
        &self,
        _repo: &Repository,
        commit: &Commit,
    ) -> Result<String, Report<CommitError>> {
        let refs = self.refs.lock().unwrap();
        refs.branches.get(&commit.sha).cloned().ok_or_else(|| {
            CommitError::BranchLookup {
                commit_sha: commit.sha.clone(),
                reason: "commit is not on any branch".to_string(),
            }
            .into()
        })
    }
}
