//! Workflow definition parsing contract.
//!
//! The definition grammar is owned by the parser implementation; the
//! dispatcher only needs the job list of a definition and its cron specs.

use crate::error::DefinitionError;
use rootcause::prelude::Report;
use serde::{Deserialize, Serialize};

/// One job split out of a workflow definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedJob {
    /// Job key within the definition.
    pub job_id: String,
    /// Display name, falls back to the job id.
    pub name: String,
    /// Job ids this job waits for.
    #[serde(default)]
    pub needs: Vec<String>,
    /// Self-contained single-job definition handed to runners.
    pub content: Vec<u8>,
}

impl ParsedJob {
    #[must_use]
    pub fn new(job_id: impl Into<String>) -> Self {
        let job_id = job_id.into();
        Self {
            name: job_id.clone(),
            job_id,
            needs: Vec::new(),
            content: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_needs<I, S>(mut self, needs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.needs = needs.into_iter().map(Into::into).collect();
        self
    }
}

/// Parses raw workflow content.
pub trait WorkflowParser: Send + Sync {
    /// Splits a definition into its jobs.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not a valid definition.
    fn parse_jobs(&self, content: &[u8]) -> Result<Vec<ParsedJob>, Report<DefinitionError>>;

    /// Returns the cron specs declared under the schedule trigger.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not a valid definition.
    fn parse_schedules(&self, content: &[u8]) -> Result<Vec<String>, Report<DefinitionError>>;
}
