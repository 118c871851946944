//! Repository event trigger dispatcher.
//!
//! Given a repository event, decides which automation workflows run, under
//! which approval gate, and materializes them as runs or default-branch
//! schedules:
//!
//! - **Trigger context**: the immutable description of one event
//! - **Skip filter**: commit-message opt-out
//! - **Approval gate**: holds fork pull request runs from untrusted users
//! - **Run materializer**: creates runs, cancelling superseded push runs
//! - **Dispatcher**: ties detection, matching, and both materializers together

pub mod approval;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod events;
pub mod notifier;
pub mod payload;
pub mod runs;
pub mod skip;

pub use approval::ApprovalGate;
pub use config::{ActionsSettings, DispatchConfig};
pub use context::{PullRequest, PullRequestFlow, TriggerContext, TriggerContextBuilder};
pub use dispatcher::{Collaborators, DispatchOutcome, DispatchSummary, Dispatcher, IgnoreReason};
pub use error::{ApprovalError, DispatchError};
pub use events::{
    Issue, PackageDescriptor, Release, package_context, pull_request_context, push_context,
    release_context,
};
pub use notifier::CommitStatusNotifier;
pub use payload::Payload;
pub use runs::{RunMaterializer, RunRequest};
pub use skip::SkipFilter;
