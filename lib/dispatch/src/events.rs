//! Trigger contexts for the common repository events.
//!
//! Callers raising an event build its context here rather than assembling
//! payloads by hand, so every event records the same payload shape.

use crate::context::{PullRequest, TriggerContext, TriggerContextBuilder};
use crate::payload::{
    PackageAction, PackageInfo, PackagePayload, Payload, PayloadRepository, PayloadUser,
    PullRequestPayload, PushPayload, ReleaseAction, ReleaseInfo, ReleasePayload,
};
use tripwire_core::{HookEventType, RefName, Repository, User};

/// An issue or pull request conversation.
#[derive(Debug, Clone)]
pub struct Issue {
    pub repository: Repository,
    pub poster: User,
}

/// A release of a repository.
#[derive(Debug, Clone)]
pub struct Release {
    pub repository: Repository,
    pub info: ReleaseInfo,
}

/// A published package version, optionally linked to a repository.
#[derive(Debug, Clone)]
pub struct PackageDescriptor {
    pub package: PackageInfo,
    pub repository: Option<Repository>,
}

impl TriggerContext {
    /// Starts a context for an issue event, with the issue's poster as doer.
    pub fn from_issue(issue: &Issue, event: HookEventType) -> TriggerContextBuilder {
        Self::builder(issue.repository.clone(), issue.poster.clone(), event)
    }
}

/// Context for commits pushed to a reference.
#[must_use]
pub fn push_context(
    repo: &Repository,
    pusher: &User,
    git_ref: RefName,
    before: &str,
    after: &str,
) -> TriggerContext {
    let payload = PushPayload {
        git_ref: git_ref.clone(),
        before: before.to_string(),
        after: after.to_string(),
        repository: PayloadRepository::from(repo),
        pusher: PayloadUser::from(pusher),
    };
    TriggerContext::builder(repo.clone(), pusher.clone(), HookEventType::Push)
        .with_ref(git_ref)
        .with_payload(Payload::Push(payload))
        .with_method("push_commits")
        .build()
}

/// Context for a pull request being opened, synchronized, or otherwise changed.
#[must_use]
pub fn pull_request_context(
    repo: &Repository,
    doer: &User,
    pull_request: PullRequest,
    event: HookEventType,
    action: &str,
) -> TriggerContext {
    let payload = PullRequestPayload {
        action: action.to_string(),
        number: pull_request.index,
        base_branch: pull_request.base_branch.clone(),
        head_branch: pull_request.head_branch.clone(),
        repository: PayloadRepository::from(repo),
        sender: PayloadUser::from(doer),
    };
    TriggerContext::builder(repo.clone(), doer.clone(), event)
        .with_payload(Payload::PullRequest(payload))
        .with_pull_request(pull_request)
        .with_method("pull_request")
        .build()
}

/// Context for a release being published, updated, or deleted.
#[must_use]
pub fn release_context(doer: &User, release: &Release, action: ReleaseAction) -> TriggerContext {
    let payload = ReleasePayload {
        action,
        release: release.info.clone(),
        repository: PayloadRepository::from(&release.repository),
        sender: PayloadUser::from(doer),
    };
    TriggerContext::builder(release.repository.clone(), doer.clone(), HookEventType::Release)
        .with_ref(RefName::from_tag(&release.info.tag_name))
        .with_payload(Payload::Release(payload))
        .with_method("release")
        .build()
}

/// Context for a package event.
///
/// Returns `None` for packages not linked to a repository; those cannot
/// trigger automation.
#[must_use]
pub fn package_context(
    sender: &User,
    descriptor: &PackageDescriptor,
    action: PackageAction,
) -> Option<TriggerContext> {
    let repository = descriptor.repository.clone()?;
    let payload = PackagePayload {
        action,
        package: descriptor.package.clone(),
        sender: PayloadUser::from(sender),
    };
    Some(
        TriggerContext::builder(repository, sender.clone(), HookEventType::Package)
            .with_payload(Payload::Package(payload))
            .with_method("package")
            .build(),
    )
}
