//! Commit status notification hook.

use async_trait::async_trait;
use tripwire_core::Repository;
use tripwire_workflow::RunJob;

/// Creates pending commit statuses for freshly inserted jobs.
///
/// Fire-and-forget: implementations log their own failures.
#[async_trait]
pub trait CommitStatusNotifier: Send + Sync {
    async fn create_commit_status(&self, repo: &Repository, jobs: &[RunJob]);
}
