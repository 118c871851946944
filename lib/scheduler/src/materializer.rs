//! Installs schedule-triggered workflows from the default branch.
//!
//! Every qualifying commit replaces the repository's schedule set:
//! 1. Ignore commits that are not on the default branch
//! 2. Purge whatever schedules exist
//! 3. Parse each workflow's cron specs, dropping workflows without any
//! 4. Create the surviving schedules in one batch

use crate::error::SchedulerError;
use crate::schedule::{CronSpec, Schedule};
use crate::store::ScheduleStore;
use chrono::Utc;
use rootcause::prelude::{Report, ResultExt};
use std::sync::Arc;
use tracing::{error, trace, warn};
use tripwire_core::{HookEventType, RefName, Repository, ScheduleId, User};
use tripwire_workflow::{Commit, CommitSource, DetectedWorkflow, WorkflowParser};

/// Everything about the triggering event a schedule records.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleRequest<'a> {
    pub repo: &'a Repository,
    pub doer: &'a User,
    pub event: HookEventType,
    /// Serialized JSON event payload.
    pub event_payload: &'a str,
    pub git_ref: &'a RefName,
    pub commit: &'a Commit,
}

/// What the materializer did with the repository's schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleOutcome {
    /// The commit is not on the default branch; schedules were left alone.
    NotDefaultBranch,
    /// Existing schedules were purged and nothing replaced them.
    Cleared,
    /// Existing schedules were purged and this many were installed.
    Installed(usize),
}

/// Turns schedule-triggered workflows into persisted schedules.
#[derive(Clone)]
pub struct ScheduleMaterializer {
    commits: Arc<dyn CommitSource>,
    store: Arc<dyn ScheduleStore>,
    parser: Arc<dyn WorkflowParser>,
}

impl ScheduleMaterializer {
    #[must_use]
    pub fn new(
        commits: Arc<dyn CommitSource>,
        store: Arc<dyn ScheduleStore>,
        parser: Arc<dyn WorkflowParser>,
    ) -> Self {
        Self {
            commits,
            store,
            parser,
        }
    }

    /// Replaces the repository's schedules with those declared at the commit.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit's branch cannot be resolved, existing
    /// schedules cannot be counted, or the new batch cannot be created.
    /// Workflows that fail to parse or declare no cron specs are skipped.
    pub async fn materialize(
        &self,
        request: ScheduleRequest<'_>,
        workflows: &[DetectedWorkflow],
    ) -> Result<ScheduleOutcome, Report<SchedulerError>> {
        let repo = request.repo;

        let branch = self
            .commits
            .branch_name(repo, request.commit)
            .await
            .context(SchedulerError::BranchLookup { repo_id: repo.id })?;
        if branch != repo.default_branch {
            trace!(
                repo = %repo.full_name,
                branch = %branch,
                "commit branch is not the default branch, leaving schedules alone"
            );
            return Ok(ScheduleOutcome::NotDefaultBranch);
        }

        let existing = self
            .store
            .count_schedules(repo.id)
            .await
            .context(SchedulerError::CountFailed { repo_id: repo.id })?;
        if existing > 0
            && let Err(e) = self.store.clean_repo_schedules(repo.id).await
        {
            error!(repo = %repo.full_name, error = %e, "failed to purge stale schedules");
        }

        if workflows.is_empty() {
            trace!(
                repo = %repo.full_name,
                commit = %request.commit.sha,
                "no schedule workflows found"
            );
            return Ok(ScheduleOutcome::Cleared);
        }

        let schedules: Vec<Schedule> = workflows
            .iter()
            .filter_map(|workflow| self.build_schedule(&request, workflow))
            .collect();
        if schedules.is_empty() {
            return Ok(ScheduleOutcome::Cleared);
        }

        let count = schedules.len();
        self.store
            .create_schedules(schedules)
            .await
            .context(SchedulerError::CreateFailed {
                repo_id: repo.id,
                count,
            })?;

        trace!(repo = %repo.full_name, count, "installed schedules");
        Ok(ScheduleOutcome::Installed(count))
    }

    fn build_schedule(
        &self,
        request: &ScheduleRequest<'_>,
        workflow: &DetectedWorkflow,
    ) -> Option<Schedule> {
        let raw_specs = match self.parser.parse_schedules(&workflow.content) {
            Ok(specs) => specs,
            Err(e) => {
                error!(workflow = %workflow.entry_name, error = %e, "failed to read workflow");
                return None;
            }
        };

        let specs: Vec<CronSpec> = raw_specs
            .iter()
            .filter_map(|raw| match CronSpec::parse(raw) {
                Ok(spec) => Some(spec),
                Err(e) => {
                    warn!(workflow = %workflow.entry_name, error = %e, "ignoring cron spec");
                    None
                }
            })
            .collect();
        if specs.is_empty() {
            warn!(workflow = %workflow.entry_name, "no schedule event");
            return None;
        }

        Some(Schedule {
            id: ScheduleId::new(),
            title: request.commit.title().to_string(),
            repo_id: request.repo.id,
            owner_id: request.repo.owner_id,
            workflow_id: workflow.entry_name.clone(),
            trigger_user_id: request.doer.id,
            git_ref: request.git_ref.clone(),
            commit_sha: request.commit.sha.clone(),
            event: request.event,
            event_payload: request.event_payload.to_string(),
            specs,
            content: workflow.content.clone(),
            created_at: Utc::now(),
        })
    }
}
