//! Error types for the scheduler crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `ScheduleError`: a single cron spec is unusable
//! - `SchedulerError`: the schedule installation step as a whole

use std::fmt;
use tripwire_core::RepositoryId;

/// Errors from schedule specs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Invalid cron expression.
    InvalidCronExpression { expression: String, reason: String },
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCronExpression { expression, reason } => {
                write!(f, "invalid cron expression '{expression}': {reason}")
            }
        }
    }
}

impl std::error::Error for ScheduleError {}

/// High-level scheduler errors.
///
/// Use these to add context when wrapping lower-level errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// The branch of the triggering commit could not be resolved.
    BranchLookup { repo_id: RepositoryId },
    /// Existing schedules could not be counted.
    CountFailed { repo_id: RepositoryId },
    /// The new schedule batch could not be created.
    CreateFailed { repo_id: RepositoryId, count: usize },
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BranchLookup { repo_id } => {
                write!(f, "cannot resolve commit branch for {repo_id}")
            }
            Self::CountFailed { repo_id } => {
                write!(f, "cannot count schedules of {repo_id}")
            }
            Self::CreateFailed { repo_id, count } => {
                write!(f, "failed to create {count} schedules for {repo_id}")
            }
        }
    }
}

impl std::error::Error for SchedulerError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_error_display() {
        let err = ScheduleError::InvalidCronExpression {
            expression: "invalid".to_string(),
            reason: "expected 5 fields".to_string(),
        };
        assert!(err.to_string().contains("invalid"));
        assert!(err.to_string().contains("5 fields"));
    }

    #[test]
    fn scheduler_error_display() {
        let repo_id = RepositoryId::new();
        let err = SchedulerError::CreateFailed { repo_id, count: 3 };
        assert_eq!(
            err.to_string(),
            format!("failed to create 3 schedules for {repo_id}")
        );
    }
}
