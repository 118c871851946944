//! Permission types for repository units.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Access level to a repository unit, ordered from least to most.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
    #[default]
    None,
    Read,
    Write,
    Admin,
    Owner,
}

impl AccessMode {
    /// Returns the wire name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Read => "read",
            Self::Write => "write",
            Self::Admin => "admin",
            Self::Owner => "owner",
        }
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Units a repository is split into for permission purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    Code,
    Issues,
    PullRequests,
    Releases,
    Wiki,
    Packages,
    Actions,
}

/// A user's effective permission on one repository.
///
/// The repository-wide mode applies to any unit without an explicit entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RepoPermission {
    /// Repository-wide access mode.
    pub access_mode: AccessMode,
    /// Per-unit overrides.
    #[serde(default)]
    pub units: BTreeMap<UnitType, AccessMode>,
}

impl RepoPermission {
    /// Permission with the same mode for every unit.
    #[must_use]
    pub fn uniform(access_mode: AccessMode) -> Self {
        Self {
            access_mode,
            units: BTreeMap::new(),
        }
    }

    /// Overrides the mode of a single unit.
    #[must_use]
    pub fn with_unit(mut self, unit: UnitType, mode: AccessMode) -> Self {
        self.units.insert(unit, mode);
        self
    }

    /// Effective mode on a unit.
    #[must_use]
    pub fn unit_access_mode(&self, unit: UnitType) -> AccessMode {
        self.units.get(&unit).copied().unwrap_or(self.access_mode)
    }

    #[must_use]
    pub fn can_write(&self, unit: UnitType) -> bool {
        self.unit_access_mode(unit) >= AccessMode::Write
    }
}
