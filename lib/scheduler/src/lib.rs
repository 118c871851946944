//! Schedules for workflow triggers.
//!
//! This crate provides:
//!
//! - **Cron specs**: validated schedule expressions declared by workflows
//! - **Schedule store**: the persistence contract for schedule records
//! - **Materializer**: replaces a repository's schedule set from its default branch

pub mod error;
pub mod materializer;
pub mod schedule;
pub mod store;

pub use error::{ScheduleError, SchedulerError};
pub use materializer::{ScheduleMaterializer, ScheduleOutcome, ScheduleRequest};
pub use schedule::{CronSpec, Schedule};
pub use store::ScheduleStore;
