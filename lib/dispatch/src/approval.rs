//! Approval gate for runs raised from untrusted pull requests.

use crate::error::ApprovalError;
use rootcause::prelude::{Report, ResultExt};
use std::sync::Arc;
use tracing::trace;
use tripwire_authz::{PermissionOracle, UnitType};
use tripwire_core::{Repository, User};
use tripwire_workflow::{EVENT_PULL_REQUEST_TARGET, Run, RunStore};

/// Decides whether a run must wait for manual approval.
#[derive(Clone)]
pub struct ApprovalGate {
    permissions: Arc<dyn PermissionOracle>,
    runs: Arc<dyn RunStore>,
}

impl ApprovalGate {
    #[must_use]
    pub fn new(permissions: Arc<dyn PermissionOracle>, runs: Arc<dyn RunStore>) -> Self {
        Self { permissions, runs }
    }

    /// Returns true if `run` must be approved before it executes.
    ///
    /// In order:
    /// 1. Runs that are not from a fork, or that declare the
    ///    `pull_request_target` trigger (evaluated against the base branch),
    ///    never need approval.
    /// 2. Restricted users always need approval.
    /// 3. Users who can write to the actions unit do not.
    /// 4. Users with an approved run in the repository do not.
    /// 5. Everyone else does.
    ///
    /// # Errors
    ///
    /// Returns an error if the permission lookup or the approved-run count
    /// fails.
    pub async fn need_approval(
        &self,
        run: &Run,
        repo: &Repository,
        user: &User,
    ) -> Result<bool, Report<ApprovalError>> {
        if !run.is_fork_pull_request || run.trigger_event == EVENT_PULL_REQUEST_TARGET {
            return Ok(false);
        }

        if user.is_restricted {
            trace!(user = %user.id, "need approval because user is restricted");
            return Ok(true);
        }

        let permission = self
            .permissions
            .permission_of(repo.id, user.id)
            .await
            .context(ApprovalError::PermissionLookup { user_id: user.id })?;
        if permission.can_write(UnitType::Actions) {
            trace!(user = %user.id, "no approval needed because user can write");
            return Ok(false);
        }

        let approved = self
            .runs
            .count_approved_runs(repo.id, user.id)
            .await
            .context(ApprovalError::ApprovedRunCount { user_id: user.id })?;
        if approved > 0 {
            trace!(user = %user.id, approved, "no approval needed because user was approved before");
            return Ok(false);
        }

        trace!(user = %user.id, "need approval for first-time contributor");
        Ok(true)
    }
}
