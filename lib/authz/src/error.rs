//! Authorization error types.

use std::fmt;
use tripwire_core::{RepositoryId, UserId};

/// Authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthzError {
    /// The permission lookup itself failed.
    LookupFailed {
        /// Repository the lookup was for.
        repo_id: RepositoryId,
        /// User the lookup was for.
        user_id: UserId,
        /// Error details.
        details: String,
    },
}

impl fmt::Display for AuthzError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LookupFailed {
                repo_id,
                user_id,
                details,
            } => {
                write!(
                    f,
                    "permission lookup for {} on {} failed: {}",
                    user_id, repo_id, details
                )
            }
        }
    }
}

impl std::error::Error for AuthzError {}
