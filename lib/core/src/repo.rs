//! Repository and user values as seen by the dispatcher.
//!
//! These are read-only snapshots loaded by the caller; the dispatcher never
//! mutates them.

use crate::id::{RepositoryId, UserId};
use serde::{Deserialize, Serialize};

/// Per-repository automation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionsUnit {
    /// Whether the actions unit is enabled for the repository.
    pub enabled: bool,
    /// Workflow entry names the repository has switched off.
    #[serde(default)]
    pub disabled_workflows: Vec<String>,
}

impl ActionsUnit {
    #[must_use]
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            disabled_workflows: Vec::new(),
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            disabled_workflows: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_workflow_disabled(&self, entry_name: &str) -> bool {
        self.disabled_workflows.iter().any(|w| w == entry_name)
    }
}

impl Default for ActionsUnit {
    fn default() -> Self {
        Self::enabled()
    }
}

/// A repository that events are raised against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: RepositoryId,
    /// The user or organization that owns the repository.
    pub owner_id: UserId,
    /// Full name, `owner/name`.
    pub full_name: String,
    /// Short name of the default branch, e.g. `main`.
    pub default_branch: String,
    #[serde(default)]
    pub actions: ActionsUnit,
}

impl Repository {
    /// Creates a repository with actions enabled.
    #[must_use]
    pub fn new(
        owner_id: UserId,
        full_name: impl Into<String>,
        default_branch: impl Into<String>,
    ) -> Self {
        Self {
            id: RepositoryId::new(),
            owner_id,
            full_name: full_name.into(),
            default_branch: default_branch.into(),
            actions: ActionsUnit::enabled(),
        }
    }

    #[must_use]
    pub fn with_actions(mut self, actions: ActionsUnit) -> Self {
        self.actions = actions;
        self
    }
}

/// What kind of account a user is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserKind {
    Individual,
    /// The automation system's own service identity.
    Actions,
}

/// An actor that raises events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub kind: UserKind,
    /// Restricted users always need approval for fork pull request runs.
    #[serde(default)]
    pub is_restricted: bool,
}

impl User {
    /// Name of the automation service identity.
    pub const ACTIONS_USER_NAME: &'static str = "tripwire-actions";

    #[must_use]
    pub fn individual(name: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            kind: UserKind::Individual,
            is_restricted: false,
        }
    }

    /// The automation system's own identity.
    #[must_use]
    pub fn actions() -> Self {
        Self {
            id: UserId::new(),
            name: Self::ACTIONS_USER_NAME.to_string(),
            kind: UserKind::Actions,
            is_restricted: false,
        }
    }

    #[must_use]
    pub fn restricted(mut self) -> Self {
        self.is_restricted = true;
        self
    }

    /// Returns true if this is the automation service identity.
    #[must_use]
    pub fn is_actions(&self) -> bool {
        self.kind == UserKind::Actions
    }
}
