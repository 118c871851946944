//! Turns matched workflows into persisted runs.
//!
//! Each workflow is handled on its own: a failure computing approval,
//! parsing, inserting, or loading jobs is logged and only that workflow is
//! dropped.

use crate::approval::ApprovalGate;
use crate::context::TriggerContext;
use crate::notifier::CommitStatusNotifier;
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, trace};
use tripwire_core::{HookEventType, RefName, RunId};
use tripwire_workflow::{
    Commit, DetectedWorkflow, JobGraph, Run, RunStatus, RunStore, WorkflowParser,
};

/// The resolved event the runs are created for.
#[derive(Debug, Clone, Copy)]
pub struct RunRequest<'a> {
    pub ctx: &'a TriggerContext,
    pub git_ref: &'a RefName,
    pub commit: &'a Commit,
    /// Serialized JSON event payload.
    pub event_payload: &'a str,
}

/// Creates runs for event-triggered workflows.
#[derive(Clone)]
pub struct RunMaterializer {
    store: Arc<dyn RunStore>,
    parser: Arc<dyn WorkflowParser>,
    gate: ApprovalGate,
    notifier: Arc<dyn CommitStatusNotifier>,
}

impl RunMaterializer {
    #[must_use]
    pub fn new(
        store: Arc<dyn RunStore>,
        parser: Arc<dyn WorkflowParser>,
        gate: ApprovalGate,
        notifier: Arc<dyn CommitStatusNotifier>,
    ) -> Self {
        Self {
            store,
            parser,
            gate,
            notifier,
        }
    }

    /// Materializes one run per workflow, in order.
    ///
    /// Returns the ids of the runs that were inserted.
    pub async fn materialize(
        &self,
        request: RunRequest<'_>,
        workflows: &[DetectedWorkflow],
    ) -> Vec<RunId> {
        let repo = &request.ctx.repository;
        if workflows.is_empty() {
            trace!(repo = %repo.full_name, commit = %request.commit.sha, "no workflows found");
            return Vec::new();
        }

        let is_fork_pull_request = request.ctx.is_fork_pull_request();
        let mut created = Vec::with_capacity(workflows.len());
        for workflow in workflows {
            let run = Run {
                id: RunId::new(),
                title: request.commit.title().to_string(),
                repo_id: repo.id,
                owner_id: repo.owner_id,
                workflow_id: workflow.entry_name.clone(),
                trigger_user_id: request.ctx.doer.id,
                git_ref: request.git_ref.clone(),
                commit_sha: request.commit.sha.clone(),
                event: request.ctx.event,
                event_payload: request.event_payload.to_string(),
                trigger_event: workflow.trigger_event.name.clone(),
                is_fork_pull_request,
                need_approval: false,
                approved_by: None,
                status: RunStatus::Waiting,
                created_at: Utc::now(),
            };
            if let Some(id) = self.materialize_one(run, &request, workflow).await {
                created.push(id);
            }
        }
        created
    }

    async fn materialize_one(
        &self,
        mut run: Run,
        request: &RunRequest<'_>,
        workflow: &DetectedWorkflow,
    ) -> Option<RunId> {
        let repo = &request.ctx.repository;
        let doer = &request.ctx.doer;

        run.need_approval = match self.gate.need_approval(&run, repo, doer).await {
            Ok(need) => need,
            Err(e) => {
                error!(
                    repo = %repo.full_name,
                    user = %doer.id,
                    workflow = %workflow.entry_name,
                    error = %e,
                    "failed to check whether run needs approval"
                );
                return None;
            }
        };

        let jobs = match self.parser.parse_jobs(&workflow.content) {
            Ok(jobs) => jobs,
            Err(e) => {
                error!(workflow = %workflow.entry_name, error = %e, "failed to parse workflow");
                return None;
            }
        };
        let graph = match JobGraph::from_jobs(jobs) {
            Ok(graph) => graph,
            Err(e) => {
                error!(workflow = %workflow.entry_name, error = %e, "invalid job graph");
                return None;
            }
        };

        if run.event == HookEventType::Push
            && let Err(e) = self
                .store
                .cancel_running_jobs(run.repo_id, &run.git_ref, &run.workflow_id, run.event)
                .await
        {
            error!(
                repo = %repo.full_name,
                workflow = %run.workflow_id,
                git_ref = %run.git_ref,
                error = %e,
                "failed to cancel superseded runs"
            );
        }

        if let Err(e) = self.store.insert_run(&run, &graph).await {
            error!(repo = %repo.full_name, workflow = %run.workflow_id, error = %e, "failed to insert run");
            return None;
        }

        let jobs = match self.store.find_run_jobs(run.id).await {
            Ok(jobs) => jobs,
            Err(e) => {
                error!(run = %run.id, error = %e, "failed to load run jobs");
                return Some(run.id);
            }
        };
        self.notifier.create_commit_status(repo, &jobs).await;

        trace!(
            run = %run.id,
            workflow = %run.workflow_id,
            jobs = jobs.len(),
            need_approval = run.need_approval,
            "created run"
        );
        Some(run.id)
    }
}
