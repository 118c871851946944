//! Detector that returns pre-scripted results per commit.

use async_trait::async_trait;
use rootcause::prelude::Report;
use serde_json::Value as JsonValue;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use tripwire_core::{HookEventType, Repository};
use tripwire_workflow::{Commit, DetectError, DetectedWorkflows, WorkflowDetector};

/// One recorded call to [`ScriptedDetector::detect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectCall {
    pub commit_sha: String,
    pub event: HookEventType,
    pub has_payload: bool,
    pub is_default_branch_push: bool,
}

/// Returns whatever was scripted for a commit; unscripted commits detect nothing.
#[derive(Default)]
pub struct ScriptedDetector {
    results: Mutex<HashMap<String, DetectedWorkflows>>,
    failing: Mutex<HashSet<String>>,
    calls: Mutex<Vec<DetectCall>>,
}

impl ScriptedDetector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(&self, commit_sha: &str, detected: DetectedWorkflows) {
        self.results
            .lock()
            .unwrap()
            .insert(commit_sha.to_string(), detected);
    }

    /// Makes detection at `commit_sha` fail.
    pub fn fail_at(&self, commit_sha: &str) {
        self.failing.lock().unwrap().insert(commit_sha.to_string());
    }

    #[must_use]
    pub fn calls(&self) -> Vec<DetectCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorkflowDetector for ScriptedDetector {
    async fn detect(
        &self,
        _repo: &Repository,
        commit: &Commit,
        event: HookEventType,
        payload: Option<&JsonValue>,
        is_default_branch_push: bool,
    ) -> Result<DetectedWorkflows, Report<DetectError>> {
        self.calls.lock().unwrap().push(DetectCall {
            commit_sha: commit.sha.clone(),
            event,
            has_payload: payload.is_some(),
            is_default_branch_push,
        });
        if self.failing.lock().unwrap().contains(&commit.sha) {
            return Err(DetectError::TreeUnreadable {
                commit_sha: commit.sha.clone(),
                reason: "scripted failure".to_string(),
            }
            .into());
        }
        Ok(self
            .results
            .lock()
            .unwrap()
            .get(&commit.sha)
            .cloned()
            .unwrap_or_default())
    }
}
