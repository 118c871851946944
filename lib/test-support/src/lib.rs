//! In-memory collaborators for exercising the dispatcher end to end.
//!
//! Everything here keeps its state behind a `Mutex` so tests can inspect
//! what the dispatcher wrote after the fact.

pub mod commits;
pub mod detector;
pub mod fixtures;
pub mod notifier;
pub mod parser;
pub mod permissions;
pub mod store;

pub use commits::MemoryCommitSource;
pub use detector::{DetectCall, ScriptedDetector};
pub use fixtures::{DEFAULT_BRANCH, Harness, scheduled_workflow, single_job_workflow};
pub use notifier::RecordingNotifier;
pub use parser::{JsonWorkflowParser, workflow_content};
pub use permissions::StaticPermissions;
pub use store::MemoryStore;

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Initialises tracing for tests.
///
/// Output is captured per test and only shown for failures. Levels come
/// from `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        fmt().with_env_filter(filter).with_test_writer().init();
    });
}
