//! Fully-qualified git reference names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix of branch references.
pub const BRANCH_PREFIX: &str = "refs/heads/";
/// Prefix of tag references.
pub const TAG_PREFIX: &str = "refs/tags/";
/// Prefix of pull request references.
pub const PULL_PREFIX: &str = "refs/pull/";

/// A git reference such as `refs/heads/main` or `refs/tags/v1.0`.
///
/// Short names are accepted as-is; only fully-qualified names report a
/// branch or tag name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RefName(String);

impl RefName {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Reference to the head of a branch.
    #[must_use]
    pub fn from_branch(branch: &str) -> Self {
        Self(format!("{BRANCH_PREFIX}{branch}"))
    }

    /// Reference to a tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        Self(format!("{TAG_PREFIX}{tag}"))
    }

    /// Head reference of a pull request.
    #[must_use]
    pub fn pull_head(index: u64) -> Self {
        Self(format!("{PULL_PREFIX}{index}/head"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the branch name if this is a branch reference.
    #[must_use]
    pub fn branch_name(&self) -> Option<&str> {
        self.0.strip_prefix(BRANCH_PREFIX)
    }
}

impl fmt::Display for RefName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RefName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
