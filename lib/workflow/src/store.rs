//! Run persistence contract.
//!
//! Every method must be atomic on its own. The dispatcher never holds a
//! transaction across calls.

use crate::error::StoreError;
use crate::job::JobGraph;
use crate::run::{Run, RunJob};
use async_trait::async_trait;
use rootcause::prelude::Report;
use tripwire_core::{HookEventType, RefName, RepositoryId, RunId, UserId};

/// Storage for runs and their jobs.
#[async_trait]
pub trait RunStore: Send + Sync {
    /// Inserts a run together with its jobs in one transaction.
    async fn insert_run(&self, run: &Run, jobs: &JobGraph) -> Result<(), Report<StoreError>>;

    /// Cancels every unfinished run of `workflow_id` on `git_ref` that was
    /// raised by `event`, along with its unfinished jobs.
    async fn cancel_running_jobs(
        &self,
        repo_id: RepositoryId,
        git_ref: &RefName,
        workflow_id: &str,
        event: HookEventType,
    ) -> Result<(), Report<StoreError>>;

    /// Returns the persisted jobs of a run.
    async fn find_run_jobs(&self, run_id: RunId) -> Result<Vec<RunJob>, Report<StoreError>>;

    /// Counts approved runs triggered by `user_id` in the repository.
    async fn count_approved_runs(
        &self,
        repo_id: RepositoryId,
        user_id: UserId,
    ) -> Result<u64, Report<StoreError>>;
}
