//! Notifier that remembers what it was asked to report.

use async_trait::async_trait;
use std::sync::Mutex;
use tripwire_core::{Repository, RepositoryId, RunId};
use tripwire_dispatch::CommitStatusNotifier;
use tripwire_workflow::RunJob;

#[derive(Default)]
pub struct RecordingNotifier {
    calls: Mutex<Vec<(RepositoryId, Vec<RunJob>)>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs that commit statuses were created for, in call order.
    #[must_use]
    pub fn notified_runs(&self) -> Vec<RunId> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|(_, jobs)| jobs.first().map(|j| j.run_id))
            .collect()
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CommitStatusNotifier for RecordingNotifier {
    async fn create_commit_status(&self, repo: &Repository, jobs: &[RunJob]) {
        self.calls.lock().unwrap().push((repo.id, jobs.to_vec()));
    }
}
