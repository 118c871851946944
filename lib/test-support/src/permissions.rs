//! Permission oracle with a fixed table.

use async_trait::async_trait;
use rootcause::prelude::Report;
use std::collections::HashMap;
use std::sync::Mutex;
use tripwire_authz::{AuthzError, PermissionOracle, RepoPermission};
use tripwire_core::{RepositoryId, UserId};

/// Returns the permission registered for a user, or no access at all.
#[derive(Default)]
pub struct StaticPermissions {
    grants: Mutex<HashMap<UserId, RepoPermission>>,
    failing: Mutex<bool>,
}

impl StaticPermissions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&self, user_id: UserId, permission: RepoPermission) {
        self.grants.lock().unwrap().insert(user_id, permission);
    }

    /// Makes every lookup fail.
    pub fn fail(&self) {
        *self.failing.lock().unwrap() = true;
    }
}

#[async_trait]
impl PermissionOracle for StaticPermissions {
    async fn permission_of(
        &self,
        repo_id: RepositoryId,
        user_id: UserId,
    ) -> Result<RepoPermission, Report<AuthzError>> {
        if *self.failing.lock().unwrap() {
            return Err(AuthzError::LookupFailed {
                repo_id,
                user_id,
                details: "injected failure".to_string(),
            }
            .into());
        }
        Ok(self
            .grants
            .lock()
            .unwrap()
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }
}
