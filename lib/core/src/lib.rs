//! Core domain types for tripwire.
//!
//! This crate provides the values shared by every layer of the dispatcher:
//! typed ids, hook event kinds, git reference names, repository and user
//! snapshots, and the rootcause-based `Result` alias.

pub mod error;
pub mod event;
pub mod git_ref;
pub mod id;
pub mod repo;

pub use error::{ParseError, Result};
pub use event::HookEventType;
pub use git_ref::RefName;
pub use id::{JobId, RepositoryId, RunId, ScheduleId, UserId};
pub use repo::{ActionsUnit, Repository, User, UserKind};
