//! Source of effective repository permissions.

use crate::error::AuthzError;
use crate::types::RepoPermission;
use async_trait::async_trait;
use rootcause::prelude::Report;
use tripwire_core::{RepositoryId, UserId};

/// Computes a user's effective permission on a repository.
///
/// Implementations are read-only.
#[async_trait]
pub trait PermissionOracle: Send + Sync {
    async fn permission_of(
        &self,
        repo_id: RepositoryId,
        user_id: UserId,
    ) -> Result<RepoPermission, Report<AuthzError>>;
}
