//! Event payloads recorded on runs and schedules.
//!
//! Payloads are serialized to JSON once per dispatch; the same document is
//! handed to the detector and stored on every record the dispatch creates.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tripwire_core::{RefName, Repository, RepositoryId, User, UserId};

/// Minimal user view embedded in payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadUser {
    pub id: UserId,
    pub login: String,
}

impl From<&User> for PayloadUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            login: user.name.clone(),
        }
    }
}

/// Minimal repository view embedded in payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadRepository {
    pub id: RepositoryId,
    pub full_name: String,
    pub default_branch: String,
}

impl From<&Repository> for PayloadRepository {
    fn from(repo: &Repository) -> Self {
        Self {
            id: repo.id,
            full_name: repo.full_name.clone(),
            default_branch: repo.default_branch.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushPayload {
    #[serde(rename = "ref")]
    pub git_ref: RefName,
    pub before: String,
    pub after: String,
    pub repository: PayloadRepository,
    pub pusher: PayloadUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestPayload {
    /// `opened`, `synchronized`, `closed`, ...
    pub action: String,
    pub number: u64,
    pub base_branch: String,
    pub head_branch: String,
    pub repository: PayloadRepository,
    pub sender: PayloadUser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseAction {
    Published,
    Updated,
    Deleted,
}

/// A release as exposed in payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseInfo {
    pub tag_name: String,
    pub title: String,
    #[serde(default)]
    pub note: String,
    pub is_draft: bool,
    pub is_prerelease: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleasePayload {
    pub action: ReleaseAction,
    pub release: ReleaseInfo,
    pub repository: PayloadRepository,
    pub sender: PayloadUser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageAction {
    Created,
    Deleted,
}

/// A package version as exposed in payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
    /// Registry type, e.g. `cargo` or `container`.
    pub package_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackagePayload {
    pub action: PackageAction,
    pub package: PackageInfo,
    pub sender: PayloadUser,
}

/// Event-specific payload carried by a trigger context.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Push(PushPayload),
    PullRequest(PullRequestPayload),
    Release(ReleasePayload),
    Package(PackagePayload),
    /// Any other event, already in JSON form.
    Json(JsonValue),
}

impl Payload {
    /// Serializes the payload into a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be represented as JSON.
    pub fn to_json(&self) -> Result<JsonValue, serde_json::Error> {
        serde_json::to_value(self)
    }
}
