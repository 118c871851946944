//! Workflows detected in a commit tree for a given event.
//!
//! Detection itself (walking the workflow directory and matching each
//! definition's `on:` section against the event) belongs to the
//! [`WorkflowDetector`] implementation. This module defines what it hands
//! back.

use crate::commit::Commit;
use crate::error::DetectError;
use async_trait::async_trait;
use rootcause::prelude::Report;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use tripwire_core::{HookEventType, Repository};

/// Trigger name of the fork-safe pull request variant.
///
/// Workflows declaring it are always taken from the base branch.
pub const EVENT_PULL_REQUEST_TARGET: &str = "pull_request_target";

/// The trigger a workflow declared and that matched the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerEvent {
    /// Declared event name, e.g. `push` or `pull_request_target`.
    pub name: String,
    /// Activity filters declared for the event (`types`, `branches`, ...).
    #[serde(default)]
    pub acts: BTreeMap<String, Vec<String>>,
}

impl TriggerEvent {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            acts: BTreeMap::new(),
        }
    }
}

/// A workflow definition that matched an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedWorkflow {
    /// File name of the definition, unique within the repository.
    pub entry_name: String,
    pub trigger_event: TriggerEvent,
    /// Raw definition bytes.
    pub content: Vec<u8>,
}

impl DetectedWorkflow {
    #[must_use]
    pub fn new(
        entry_name: impl Into<String>,
        trigger_event: TriggerEvent,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            entry_name: entry_name.into(),
            trigger_event,
            content: content.into(),
        }
    }

    /// Returns true if the workflow declared the fork-safe pull request trigger.
    #[must_use]
    pub fn is_pull_request_target(&self) -> bool {
        self.trigger_event.name == EVENT_PULL_REQUEST_TARGET
    }
}

/// Detection result: event-triggered and schedule-triggered workflows.
///
/// The two collections are disjoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectedWorkflows {
    pub workflows: Vec<DetectedWorkflow>,
    pub schedules: Vec<DetectedWorkflow>,
}

/// Finds the workflows in a commit tree that match an event.
#[async_trait]
pub trait WorkflowDetector: Send + Sync {
    /// Detects workflows at `commit` for `event`.
    ///
    /// `is_default_branch_push` enables trigger forms that only apply to
    /// pushes on the default branch. Must be deterministic for a given
    /// commit and event.
    async fn detect(
        &self,
        repo: &Repository,
        commit: &Commit,
        event: HookEventType,
        payload: Option<&JsonValue>,
        is_default_branch_push: bool,
    ) -> Result<DetectedWorkflows, Report<DetectError>>;
}
