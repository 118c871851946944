//! Workflow-side model and collaborator contracts for tripwire.
//!
//! This crate provides:
//!
//! - **Commits**: [`Commit`] and the [`CommitSource`] that resolves refs
//! - **Detection**: [`DetectedWorkflow`] and the [`WorkflowDetector`] contract
//! - **Parsing**: [`WorkflowParser`] and the validated [`JobGraph`] built from its output
//! - **Runs**: [`Run`], [`RunJob`], [`RunStatus`] and the [`RunStore`] contract

pub mod commit;
pub mod detect;
pub mod error;
pub mod job;
pub mod parser;
pub mod run;
pub mod store;

pub use commit::{Commit, CommitSource};
pub use detect::{
    DetectedWorkflow, DetectedWorkflows, EVENT_PULL_REQUEST_TARGET, TriggerEvent,
    WorkflowDetector,
};
pub use error::{CommitError, DefinitionError, DetectError, StoreError};
pub use job::JobGraph;
pub use parser::{ParsedJob, WorkflowParser};
pub use run::{Run, RunJob, RunStatus};
pub use store::RunStore;
