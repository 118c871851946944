//! The trigger context handed to the dispatcher.
//!
//! A context is assembled once per event with [`TriggerContextBuilder`] and
//! is immutable afterwards. Each builder step consumes the builder, so a
//! half-built context can never be shared and mutated from two places.

use crate::payload::Payload;
use serde::{Deserialize, Serialize};
use tripwire_core::{HookEventType, RefName, Repository, RepositoryId, User};

/// How a pull request's head was pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PullRequestFlow {
    /// Head branch lives in the base repository or a fork of it.
    Github,
    /// Head was pushed to `refs/for/<branch>/<topic>` by anyone with read access.
    Agit,
    /// A flow this dispatcher does not know about.
    #[serde(other)]
    Unknown,
}

/// The pull request an event is associated with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// Number of the pull request within the base repository.
    pub index: u64,
    pub base_repo_id: RepositoryId,
    /// Repository the head branch lives in; `None` if it was deleted.
    pub head_repo_id: Option<RepositoryId>,
    pub base_branch: String,
    pub head_branch: String,
    pub flow: PullRequestFlow,
}

impl PullRequest {
    /// Returns true if the head lives outside the base repository.
    #[must_use]
    pub fn is_from_fork(&self) -> bool {
        self.head_repo_id != Some(self.base_repo_id)
    }

    /// Reference the pull request head is published under.
    #[must_use]
    pub fn git_ref_name(&self) -> RefName {
        RefName::pull_head(self.index)
    }

    /// Returns true if runs for this pull request must be treated as
    /// coming from an untrusted fork.
    ///
    /// Topic-branch pushes have no fork concept but anyone with read access
    /// can open one, and an unknown flow is assumed to be a fork.
    #[must_use]
    pub fn is_fork_for_automation(&self) -> bool {
        match self.flow {
            PullRequestFlow::Github => self.is_from_fork(),
            PullRequestFlow::Agit | PullRequestFlow::Unknown => true,
        }
    }
}

/// Everything the dispatcher knows about one event occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerContext {
    pub repository: Repository,
    /// The actor that raised the event.
    pub doer: User,
    pub event: HookEventType,
    pub git_ref: Option<RefName>,
    pub payload: Option<Payload>,
    pub pull_request: Option<PullRequest>,
    /// Name of the notification entry point, carried into log fields.
    pub method: &'static str,
}

impl TriggerContext {
    /// Default `method` logging field.
    pub const DEFAULT_METHOD: &'static str = "notify";

    /// Starts building a context for an event.
    #[must_use]
    pub fn builder(repository: Repository, doer: User, event: HookEventType) -> TriggerContextBuilder {
        TriggerContextBuilder {
            inner: Self {
                repository,
                doer,
                event,
                git_ref: None,
                payload: None,
                pull_request: None,
                method: Self::DEFAULT_METHOD,
            },
        }
    }

    /// The explicit reference, if one was set and is not empty.
    #[must_use]
    pub fn explicit_ref(&self) -> Option<&RefName> {
        self.git_ref.as_ref().filter(|r| !r.is_empty())
    }

    /// Returns true for a push to the repository's default branch.
    #[must_use]
    pub fn is_default_branch_push(&self) -> bool {
        self.event == HookEventType::Push
            && self
                .git_ref
                .as_ref()
                .and_then(RefName::branch_name)
                .is_some_and(|branch| branch == self.repository.default_branch)
    }

    /// Returns true if runs for this context come from an untrusted fork.
    #[must_use]
    pub fn is_fork_pull_request(&self) -> bool {
        self.pull_request
            .as_ref()
            .is_some_and(PullRequest::is_fork_for_automation)
    }
}

/// Builder for [`TriggerContext`].
#[derive(Debug, Clone)]
#[must_use]
pub struct TriggerContextBuilder {
    inner: TriggerContext,
}

impl TriggerContextBuilder {
    /// Replaces the actor.
    pub fn with_doer(mut self, doer: User) -> Self {
        self.inner.doer = doer;
        self
    }

    pub fn with_ref(mut self, git_ref: RefName) -> Self {
        self.inner.git_ref = Some(git_ref);
        self
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.inner.payload = Some(payload);
        self
    }

    /// Associates a pull request.
    ///
    /// If no reference has been set yet, the pull request's head reference
    /// is used.
    pub fn with_pull_request(mut self, pull_request: PullRequest) -> Self {
        if self.inner.explicit_ref().is_none() {
            self.inner.git_ref = Some(pull_request.git_ref_name());
        }
        self.inner.pull_request = Some(pull_request);
        self
    }

    /// Names the entry point for log fields.
    pub fn with_method(mut self, method: &'static str) -> Self {
        self.inner.method = method;
        self
    }

    pub fn build(self) -> TriggerContext {
        self.inner
    }
}
