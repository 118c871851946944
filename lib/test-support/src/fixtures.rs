//! A dispatcher wired to in-memory collaborators.

use crate::{
    JsonWorkflowParser, MemoryCommitSource, MemoryStore, RecordingNotifier, ScriptedDetector,
    StaticPermissions, workflow_content,
};
use std::sync::Arc;
use tripwire_core::{Repository, UserId};
use tripwire_dispatch::{Collaborators, DispatchConfig, Dispatcher};
use tripwire_workflow::{Commit, DetectedWorkflow, TriggerEvent};

/// Default branch of [`Harness::repository`].
pub const DEFAULT_BRANCH: &str = "main";

/// Dispatcher plus handles on every collaborator it was built from.
pub struct Harness {
    pub repository: Repository,
    pub commits: Arc<MemoryCommitSource>,
    pub detector: Arc<ScriptedDetector>,
    pub store: Arc<MemoryStore>,
    pub permissions: Arc<StaticPermissions>,
    pub notifier: Arc<RecordingNotifier>,
    pub dispatcher: Dispatcher,
}

impl Harness {
    /// Builds a harness with default configuration around a fresh repository.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DispatchConfig::default())
    }

    #[must_use]
    pub fn with_config(config: DispatchConfig) -> Self {
        Self::for_repository(
            Repository::new(UserId::new(), "octo/widgets", DEFAULT_BRANCH),
            config,
        )
    }

    #[must_use]
    pub fn for_repository(repository: Repository, config: DispatchConfig) -> Self {
        crate::init_tracing();
        let commits = Arc::new(MemoryCommitSource::new());
        let detector = Arc::new(ScriptedDetector::new());
        let store = Arc::new(MemoryStore::new());
        let permissions = Arc::new(StaticPermissions::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let dispatcher = Dispatcher::new(
            config,
            Collaborators {
                commits: commits.clone(),
                detector: detector.clone(),
                parser: Arc::new(JsonWorkflowParser),
                runs: store.clone(),
                schedules: store.clone(),
                permissions: permissions.clone(),
                notifier: notifier.clone(),
            },
        );
        Self {
            repository,
            commits,
            detector,
            store,
            permissions,
            notifier,
            dispatcher,
        }
    }

    /// Points a branch of the harness repository at a new commit.
    pub fn commit_on(&self, branch: &str, sha: &str, message: &str) -> Commit {
        let commit = Commit::new(sha, message);
        self.commits
            .set_branch(&self.repository, branch, commit.clone());
        commit
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

/// A workflow triggered by `event` with a single `build` job.
#[must_use]
pub fn single_job_workflow(entry_name: &str, event: &str) -> DetectedWorkflow {
    DetectedWorkflow::new(
        entry_name,
        TriggerEvent::new(event),
        workflow_content(&[("build", &[])], &[]),
    )
}

/// A schedule-triggered workflow with the given cron specs.
#[must_use]
pub fn scheduled_workflow(entry_name: &str, specs: &[&str]) -> DetectedWorkflow {
    DetectedWorkflow::new(
        entry_name,
        TriggerEvent::new("schedule"),
        workflow_content(&[("nightly", &[])], specs),
    )
}
