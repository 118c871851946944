//! In-memory run and schedule storage.

use async_trait::async_trait;
use rootcause::prelude::Report;
use std::collections::HashSet;
use std::sync::Mutex;
use tripwire_core::{HookEventType, RefName, RepositoryId, RunId, UserId};
use tripwire_scheduler::{Schedule, ScheduleStore};
use tripwire_workflow::{JobGraph, Run, RunJob, RunStatus, RunStore, StoreError};

#[derive(Default)]
struct State {
    runs: Vec<Run>,
    jobs: Vec<RunJob>,
    schedules: Vec<Schedule>,
    schedule_cleanups: usize,
}

#[derive(Default)]
struct Failures {
    insert_for_workflows: HashSet<String>,
    find_jobs: bool,
    count_approved: bool,
    count_schedules: bool,
    create_schedules: bool,
    clean_schedules: bool,
}

/// Run and schedule store backed by vectors.
///
/// Failures can be injected per operation to exercise error paths.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    failures: Mutex<Failures>,
}

fn backend(operation: &'static str) -> Report<StoreError> {
    StoreError::Backend {
        operation,
        reason: "injected failure".to_string(),
    }
    .into()
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes inserting runs of `workflow_id` fail.
    pub fn fail_insert_for(&self, workflow_id: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert_for_workflows
            .insert(workflow_id.to_string());
    }

    pub fn fail_find_jobs(&self) {
        self.failures.lock().unwrap().find_jobs = true;
    }

    pub fn fail_count_approved(&self) {
        self.failures.lock().unwrap().count_approved = true;
    }

    pub fn fail_count_schedules(&self) {
        self.failures.lock().unwrap().count_schedules = true;
    }

    pub fn fail_create_schedules(&self) {
        self.failures.lock().unwrap().create_schedules = true;
    }

    pub fn fail_clean_schedules(&self) {
        self.failures.lock().unwrap().clean_schedules = true;
    }

    /// Stores a run directly, bypassing the dispatcher.
    pub fn seed_run(&self, run: Run) {
        self.state.lock().unwrap().runs.push(run);
    }

    /// Stores schedules directly, bypassing the dispatcher.
    pub fn seed_schedules(&self, schedules: Vec<Schedule>) {
        self.state.lock().unwrap().schedules.extend(schedules);
    }

    #[must_use]
    pub fn runs(&self) -> Vec<Run> {
        self.state.lock().unwrap().runs.clone()
    }

    #[must_use]
    pub fn run(&self, id: RunId) -> Option<Run> {
        self.state
            .lock()
            .unwrap()
            .runs
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    #[must_use]
    pub fn jobs_of(&self, run_id: RunId) -> Vec<RunJob> {
        self.state
            .lock()
            .unwrap()
            .jobs
            .iter()
            .filter(|j| j.run_id == run_id)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn schedules(&self) -> Vec<Schedule> {
        self.state.lock().unwrap().schedules.clone()
    }

    /// How many times a repository's schedules were cleaned.
    #[must_use]
    pub fn schedule_cleanups(&self) -> usize {
        self.state.lock().unwrap().schedule_cleanups
    }
}

#[async_trait]
impl RunStore for MemoryStore {
    async fn insert_run(&self, run: &Run, jobs: &JobGraph) -> Result<(), Report<StoreError>> {
        if self
            .failures
            .lock()
            .unwrap()
            .insert_for_workflows
            .contains(&run.workflow_id)
        {
            return Err(backend("insert_run"));
        }
        let mut state = self.state.lock().unwrap();
        state.jobs.extend(run.jobs_from_graph(jobs));
        state.runs.push(run.clone());
        Ok(())
    }

    async fn cancel_running_jobs(
        &self,
        repo_id: RepositoryId,
        git_ref: &RefName,
        workflow_id: &str,
        event: HookEventType,
    ) -> Result<(), Report<StoreError>> {
        let mut state = self.state.lock().unwrap();
        let mut cancelled = HashSet::new();
        for run in &mut state.runs {
            if run.repo_id == repo_id
                && &run.git_ref == git_ref
                && run.workflow_id == workflow_id
                && run.event == event
                && !run.status.is_done()
            {
                run.status = RunStatus::Cancelled;
                cancelled.insert(run.id);
            }
        }
        for job in &mut state.jobs {
            if cancelled.contains(&job.run_id) && !job.status.is_done() {
                job.status = RunStatus::Cancelled;
            }
        }
        Ok(())
    }

    async fn find_run_jobs(&self, run_id: RunId) -> Result<Vec<RunJob>, Report<StoreError>> {
        if self.failures.lock().unwrap().find_jobs {
            return Err(backend("find_run_jobs"));
        }
        let state = self.state.lock().unwrap();
        if !state.runs.iter().any(|r| r.id == run_id) {
            return Err(StoreError::RunNotFound { run_id }.into());
        }
        Ok(state
            .jobs
            .iter()
            .filter(|j| j.run_id == run_id)
            .cloned()
            .collect())
    }

    async fn count_approved_runs(
        &self,
        repo_id: RepositoryId,
        user_id: UserId,
    ) -> Result<u64, Report<StoreError>> {
        if self.failures.lock().unwrap().count_approved {
            return Err(backend("count_approved_runs"));
        }
        let state = self.state.lock().unwrap();
        let count = state
            .runs
            .iter()
            .filter(|r| r.repo_id == repo_id && r.trigger_user_id == user_id && r.is_approved())
            .count();
        Ok(count as u64)
    }
}

#[async_trait]
impl ScheduleStore for MemoryStore {
    async fn count_schedules(&self, repo_id: RepositoryId) -> Result<u64, Report<StoreError>> {
        if self.failures.lock().unwrap().count_schedules {
            return Err(backend("count_schedules"));
        }
        let state = self.state.lock().unwrap();
        Ok(state.schedules.iter().filter(|s| s.repo_id == repo_id).count() as u64)
    }

    async fn create_schedules(&self, schedules: Vec<Schedule>) -> Result<(), Report<StoreError>> {
        if self.failures.lock().unwrap().create_schedules {
            return Err(backend("create_schedules"));
        }
        self.state.lock().unwrap().schedules.extend(schedules);
        Ok(())
    }

    async fn clean_repo_schedules(&self, repo_id: RepositoryId) -> Result<(), Report<StoreError>> {
        if self.failures.lock().unwrap().clean_schedules {
            return Err(backend("clean_repo_schedules"));
        }
        let mut state = self.state.lock().unwrap();
        state.schedules.retain(|s| s.repo_id != repo_id);
        state.schedule_cleanups += 1;
        Ok(())
    }
}
