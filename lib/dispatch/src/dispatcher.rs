//! The workflow trigger dispatcher.
//!
//! One dispatch per repository event:
//! 1. Drop events raised by the actions user, or while automation is off
//! 2. Resolve the commit the event points at and honor skip markers
//! 3. Detect matching workflows at that commit
//! 4. For pull requests, take `pull_request_target` workflows from the base
//!    branch only
//! 5. Replace default-branch schedules, then create runs
//!
//! Dispatches share no in-memory state. Everything that needs mutual
//! exclusion goes through the stores.

use crate::approval::ApprovalGate;
use crate::config::DispatchConfig;
use crate::context::{PullRequest, TriggerContext};
use crate::error::DispatchError;
use crate::notifier::CommitStatusNotifier;
use crate::runs::{RunMaterializer, RunRequest};
use crate::skip::SkipFilter;
use rootcause::prelude::{Report, ResultExt};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::{debug, error, instrument, trace};
use tripwire_authz::PermissionOracle;
use tripwire_core::{HookEventType, RefName, Repository, RunId};
use tripwire_scheduler::{ScheduleMaterializer, ScheduleOutcome, ScheduleRequest, ScheduleStore};
use tripwire_workflow::{CommitSource, DetectedWorkflow, RunStore, WorkflowDetector, WorkflowParser};

/// External systems the dispatcher drives.
#[derive(Clone)]
pub struct Collaborators {
    pub commits: Arc<dyn CommitSource>,
    pub detector: Arc<dyn WorkflowDetector>,
    pub parser: Arc<dyn WorkflowParser>,
    pub runs: Arc<dyn RunStore>,
    pub schedules: Arc<dyn ScheduleStore>,
    pub permissions: Arc<dyn PermissionOracle>,
    pub notifier: Arc<dyn CommitStatusNotifier>,
}

/// Why a dispatch produced nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The event was raised by the actions user itself.
    ActionsUser,
    /// Automation is disabled for the installation.
    GloballyDisabled,
    /// The repository has its actions unit switched off.
    RepositoryDisabled,
    /// The commit message carries a skip marker.
    SkipMarker,
}

/// What a completed dispatch created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Reference the commit was resolved from.
    pub git_ref: RefName,
    pub commit_sha: String,
    /// Runs inserted, in detection order.
    pub runs: Vec<RunId>,
    /// What happened to the repository's schedules; `None` if the schedule
    /// step failed.
    pub schedules: Option<ScheduleOutcome>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Ignored(IgnoreReason),
    Dispatched(DispatchSummary),
}

/// Decides which workflows an event triggers and materializes them.
#[derive(Clone)]
pub struct Dispatcher {
    config: DispatchConfig,
    skip: SkipFilter,
    commits: Arc<dyn CommitSource>,
    detector: Arc<dyn WorkflowDetector>,
    schedule_store: Arc<dyn ScheduleStore>,
    runs: RunMaterializer,
    schedules: ScheduleMaterializer,
}

impl Dispatcher {
    /// Creates a dispatcher that works from the given configuration snapshot.
    #[must_use]
    pub fn new(config: DispatchConfig, collaborators: Collaborators) -> Self {
        let gate = ApprovalGate::new(
            Arc::clone(&collaborators.permissions),
            Arc::clone(&collaborators.runs),
        );
        let runs = RunMaterializer::new(
            Arc::clone(&collaborators.runs),
            Arc::clone(&collaborators.parser),
            gate,
            Arc::clone(&collaborators.notifier),
        );
        let schedules = ScheduleMaterializer::new(
            Arc::clone(&collaborators.commits),
            Arc::clone(&collaborators.schedules),
            Arc::clone(&collaborators.parser),
        );
        Self {
            skip: SkipFilter::new(config.actions.skip_workflow_strings.clone()),
            config,
            commits: collaborators.commits,
            detector: collaborators.detector,
            schedule_store: collaborators.schedules,
            runs,
            schedules,
        }
    }

    /// Returns a dispatcher sharing these collaborators but using a newer
    /// configuration snapshot.
    #[must_use]
    pub fn with_config(&self, config: DispatchConfig) -> Self {
        Self {
            skip: SkipFilter::new(config.actions.skip_workflow_strings.clone()),
            config,
            ..self.clone()
        }
    }

    /// Dispatches an event and logs any failure.
    ///
    /// This is the entry point for event sources that do not act on the
    /// outcome.
    pub async fn notify(&self, ctx: &TriggerContext) {
        trace!(
            method = ctx.method,
            event = %ctx.event,
            doer = %ctx.doer.name,
            "executing actions notification"
        );
        if let Err(e) = self.dispatch(ctx).await {
            error!(method = ctx.method, error = %e, "actions notification failed");
        }
    }

    /// Dispatches an event.
    ///
    /// # Errors
    ///
    /// Returns an error, having created nothing, if the commit or the pull
    /// request base cannot be resolved, detection fails, or the payload
    /// cannot be serialized. Failures for individual workflows are logged
    /// and do not fail the dispatch.
    #[instrument(
        skip_all,
        fields(
            method = ctx.method,
            event = %ctx.event,
            repo = %ctx.repository.full_name,
            doer = %ctx.doer.name,
        )
    )]
    pub async fn dispatch(
        &self,
        ctx: &TriggerContext,
    ) -> Result<DispatchOutcome, Report<DispatchError>> {
        let repo = &ctx.repository;

        // Automation-generated activity must not re-trigger automation.
        if ctx.doer.is_actions() {
            debug!("ignoring event raised by the actions user");
            return Ok(DispatchOutcome::Ignored(IgnoreReason::ActionsUser));
        }

        if self.config.actions.disabled {
            if let Err(e) = self.schedule_store.clean_repo_schedules(repo.id).await {
                error!(error = %e, "failed to clean repository schedules");
            }
            return Ok(DispatchOutcome::Ignored(IgnoreReason::GloballyDisabled));
        }

        if !repo.actions.enabled {
            return Ok(DispatchOutcome::Ignored(IgnoreReason::RepositoryDisabled));
        }

        let git_ref = resolve_ref(ctx);
        let commit = self
            .commits
            .get_commit(repo, &git_ref)
            .await
            .context(DispatchError::ResolveCommit {
                git_ref: git_ref.clone(),
            })?;

        if self.skip.should_skip(ctx.event, &commit.message) {
            return Ok(DispatchOutcome::Ignored(IgnoreReason::SkipMarker));
        }

        let payload = match &ctx.payload {
            Some(payload) => Some(payload.to_json().context(DispatchError::SerializePayload)?),
            None => None,
        };
        let event_payload = payload.clone().unwrap_or(JsonValue::Null).to_string();

        let detected = self
            .detector
            .detect(
                repo,
                &commit,
                ctx.event,
                payload.as_ref(),
                ctx.is_default_branch_push(),
            )
            .await
            .context(DispatchError::DetectWorkflows {
                commit_sha: commit.sha.clone(),
            })?;
        trace!(
            commit = %commit.sha,
            workflows = detected.workflows.len(),
            schedules = detected.schedules.len(),
            "detected workflows"
        );

        // pull_request_target workflows from the head are never trusted; the
        // base branch pass below supplies them.
        let mut workflows: Vec<DetectedWorkflow> = detected
            .workflows
            .into_iter()
            .filter(|wf| is_enabled(repo, wf) && !wf.is_pull_request_target())
            .collect();

        if let Some(pull_request) = &ctx.pull_request {
            workflows.extend(
                self.detect_pull_request_target(ctx, pull_request, payload.as_ref())
                    .await?,
            );
        }

        let schedules = match self
            .schedules
            .materialize(
                ScheduleRequest {
                    repo,
                    doer: &ctx.doer,
                    event: ctx.event,
                    event_payload: &event_payload,
                    git_ref: &git_ref,
                    commit: &commit,
                },
                &detected.schedules,
            )
            .await
        {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                error!(commit = %commit.sha, error = %e, "failed to update schedules");
                None
            }
        };

        let runs = self
            .runs
            .materialize(
                RunRequest {
                    ctx,
                    git_ref: &git_ref,
                    commit: &commit,
                    event_payload: &event_payload,
                },
                &workflows,
            )
            .await;

        Ok(DispatchOutcome::Dispatched(DispatchSummary {
            git_ref,
            commit_sha: commit.sha,
            runs,
            schedules,
        }))
    }

    /// Detects `pull_request_target` workflows on the pull request's base branch.
    async fn detect_pull_request_target(
        &self,
        ctx: &TriggerContext,
        pull_request: &PullRequest,
        payload: Option<&JsonValue>,
    ) -> Result<Vec<DetectedWorkflow>, Report<DispatchError>> {
        let repo = &ctx.repository;
        let base_ref = RefName::from_branch(&pull_request.base_branch);
        let base_commit = self
            .commits
            .get_commit(repo, &base_ref)
            .await
            .context(DispatchError::ResolveBaseCommit {
                base_branch: pull_request.base_branch.clone(),
            })?;

        let detected = self
            .detector
            .detect(repo, &base_commit, ctx.event, payload, false)
            .await
            .context(DispatchError::DetectWorkflows {
                commit_sha: base_commit.sha.clone(),
            })?;

        let targets: Vec<DetectedWorkflow> = detected
            .workflows
            .into_iter()
            .filter(|wf| wf.is_pull_request_target() && is_enabled(repo, wf))
            .collect();
        if targets.is_empty() {
            trace!(commit = %base_commit.sha, "no pull_request_target workflows on base branch");
        }
        Ok(targets)
    }
}

/// Reference to resolve the commit from.
///
/// A deleted reference has no commit, so deletions fall back to the
/// default branch, as does an event without a reference.
fn resolve_ref(ctx: &TriggerContext) -> RefName {
    match ctx.explicit_ref() {
        Some(git_ref) if ctx.event != HookEventType::Delete => git_ref.clone(),
        _ => RefName::from_branch(&ctx.repository.default_branch),
    }
}

fn is_enabled(repo: &Repository, workflow: &DetectedWorkflow) -> bool {
    if repo.actions.is_workflow_disabled(&workflow.entry_name) {
        trace!(workflow = %workflow.entry_name, "workflow disabled by repository");
        return false;
    }
    true
}
