//! Schedule persistence contract.

use crate::schedule::Schedule;
use async_trait::async_trait;
use rootcause::prelude::Report;
use tripwire_core::RepositoryId;
use tripwire_workflow::StoreError;

/// Storage for repository schedules. Each method is atomic on its own.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Counts the schedules installed for a repository.
    async fn count_schedules(&self, repo_id: RepositoryId) -> Result<u64, Report<StoreError>>;

    /// Creates a batch of schedules in one call.
    async fn create_schedules(&self, schedules: Vec<Schedule>) -> Result<(), Report<StoreError>>;

    /// Removes every schedule of a repository.
    async fn clean_repo_schedules(&self, repo_id: RepositoryId) -> Result<(), Report<StoreError>>;
}
