//! Workflow parser over a small JSON stand-in for real definitions.

use rootcause::prelude::Report;
use serde::{Deserialize, Serialize};
use tripwire_workflow::{DefinitionError, ParsedJob, WorkflowParser};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Definition {
    #[serde(default)]
    jobs: Vec<JobDefinition>,
    #[serde(default)]
    schedules: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct JobDefinition {
    id: String,
    #[serde(default)]
    needs: Vec<String>,
}

/// Builds definition content for [`JsonWorkflowParser`].
///
/// `jobs` are `(id, needs)` pairs.
#[must_use]
pub fn workflow_content(jobs: &[(&str, &[&str])], schedules: &[&str]) -> Vec<u8> {
    let definition = Definition {
        jobs: jobs
            .iter()
            .map(|(id, needs)| JobDefinition {
                id: (*id).to_string(),
                needs: needs.iter().map(|n| (*n).to_string()).collect(),
            })
            .collect(),
        schedules: schedules.iter().map(|s| (*s).to_string()).collect(),
    };
    serde_json::to_vec(&definition).unwrap()
}

/// Parses definitions produced by [`workflow_content`]; anything else is malformed.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonWorkflowParser;

impl JsonWorkflowParser {
    fn read(content: &[u8]) -> Result<Definition, Report<DefinitionError>> {
        serde_json::from_slice(content).map_err(|e| {
            DefinitionError::Malformed {
                reason: e.to_string(),
            }
            .into()
        })
    }
}

impl WorkflowParser for JsonWorkflowParser {
    fn parse_jobs(&self, content: &[u8]) -> Result<Vec<ParsedJob>, Report<DefinitionError>> {
        let definition = Self::read(content)?;
        Ok(definition
            .jobs
            .into_iter()
            .map(|job| ParsedJob::new(job.id).with_needs(job.needs))
            .collect())
    }

    fn parse_schedules(&self, content: &[u8]) -> Result<Vec<String>, Report<DefinitionError>> {
        Ok(Self::read(content)?.schedules)
    }
}
