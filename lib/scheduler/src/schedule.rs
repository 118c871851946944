//! Schedule records installed from the default branch.

use crate::error::ScheduleError;
use chrono::{DateTime, Utc};
use croner::Cron;
use serde::{Deserialize, Serialize};
use tripwire_core::{HookEventType, RefName, RepositoryId, ScheduleId, UserId};

const DESCRIPTORS: [&str; 7] = [
    "@yearly",
    "@annually",
    "@monthly",
    "@weekly",
    "@daily",
    "@midnight",
    "@hourly",
];

/// A single cron spec declared by a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CronSpec(String);

impl CronSpec {
    /// Parses and validates a spec.
    ///
    /// Accepts standard five-field expressions and the `@daily`-style
    /// descriptors.
    ///
    /// # Errors
    ///
    /// Returns an error if the expression is neither, or if a field is out
    /// of range or not cron syntax.
    pub fn parse(expression: &str) -> Result<Self, ScheduleError> {
        let expression = expression.trim();
        if expression.starts_with('@') {
            if DESCRIPTORS.contains(&expression) {
                return Ok(Self(expression.to_string()));
            }
            return Err(ScheduleError::InvalidCronExpression {
                expression: expression.to_string(),
                reason: "unknown descriptor".to_string(),
            });
        }

        let fields = expression.split_whitespace().count();
        if fields != 5 {
            return Err(ScheduleError::InvalidCronExpression {
                expression: expression.to_string(),
                reason: format!("expected 5 fields, got {fields}"),
            });
        }
        Cron::new(expression)
            .parse()
            .map_err(|e| ScheduleError::InvalidCronExpression {
                expression: expression.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self(expression.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A recurring automation intent for one workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: ScheduleId,
    /// First line of the commit message that installed the schedule.
    pub title: String,
    pub repo_id: RepositoryId,
    pub owner_id: UserId,
    /// Entry name of the workflow definition.
    pub workflow_id: String,
    pub trigger_user_id: UserId,
    pub git_ref: RefName,
    pub commit_sha: String,
    pub event: HookEventType,
    pub event_payload: String,
    pub specs: Vec<CronSpec>,
    /// Raw workflow content, kept so scheduled runs use this exact definition.
    pub content: Vec<u8>,
    pub created_at: DateTime<Utc>,
}
