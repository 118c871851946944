//! Run and run-job records.
//!
//! A run is created here in the `Waiting` state; everything after that
//! (picking jobs up, finishing, approving) is owned by the execution side.

use crate::job::JobGraph;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tripwire_core::{HookEventType, JobId, RefName, RepositoryId, RunId, UserId};

/// Status shared by runs and their jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Unknown,
    Success,
    Failure,
    Cancelled,
    Skipped,
    /// Queued and waiting for a runner.
    Waiting,
    Running,
    /// Held back by unfinished needs or a pending approval.
    Blocked,
}

impl RunStatus {
    /// Returns true if the status is final.
    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(
            self,
            Self::Success | Self::Failure | Self::Cancelled | Self::Skipped
        )
    }
}

/// A materialized workflow run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub id: RunId,
    /// First line of the triggering commit message.
    pub title: String,
    pub repo_id: RepositoryId,
    pub owner_id: UserId,
    /// Entry name of the workflow definition.
    pub workflow_id: String,
    pub trigger_user_id: UserId,
    pub git_ref: RefName,
    pub commit_sha: String,
    /// The repository event that was recorded.
    pub event: HookEventType,
    /// Serialized JSON event payload.
    pub event_payload: String,
    /// The trigger name the workflow declared.
    pub trigger_event: String,
    pub is_fork_pull_request: bool,
    pub need_approval: bool,
    /// Who approved the run, if it needed approval and got it.
    pub approved_by: Option<UserId>,
    pub status: RunStatus,
    pub created_at: DateTime<Utc>,
}

impl Run {
    /// Returns true once someone approved the run.
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.approved_by.is_some()
    }

    /// Records an approval. Only the execution side calls this.
    pub fn approve(&mut self, approver: UserId) {
        self.approved_by = Some(approver);
    }

    /// Builds the job records to persist alongside this run.
    ///
    /// Jobs with needs start blocked, as does every job of a run that is
    /// waiting for approval.
    #[must_use]
    pub fn jobs_from_graph(&self, graph: &JobGraph) -> Vec<RunJob> {
        graph
            .jobs()
            .map(|job| RunJob {
                id: JobId::new(),
                run_id: self.id,
                repo_id: self.repo_id,
                owner_id: self.owner_id,
                commit_sha: self.commit_sha.clone(),
                is_fork_pull_request: self.is_fork_pull_request,
                name: job.name.clone(),
                job_id: job.job_id.clone(),
                needs: job.needs.clone(),
                status: if job.needs.is_empty() && !self.need_approval {
                    RunStatus::Waiting
                } else {
                    RunStatus::Blocked
                },
            })
            .collect()
    }
}

/// A persisted job of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunJob {
    pub id: JobId,
    pub run_id: RunId,
    pub repo_id: RepositoryId,
    pub owner_id: UserId,
    pub commit_sha: String,
    pub is_fork_pull_request: bool,
    pub name: String,
    pub job_id: String,
    pub needs: Vec<String>,
    pub status: RunStatus,
}
