//! Repository permission contracts for tripwire.
//!
//! Permissions are resolved per repository unit. The dispatcher only asks
//! whether a user can write to the actions unit; everything else is here so
//! oracle implementations can express the full model.

mod error;
mod oracle;
mod types;

pub use error::AuthzError;
pub use oracle::PermissionOracle;
pub use types::{AccessMode, RepoPermission, UnitType};
