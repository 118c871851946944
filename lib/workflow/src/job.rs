//! Job dependency graph of a single workflow run.
//!
//! Jobs are nodes, `needs` are edges from the needed job to the dependent
//! one. The graph must be acyclic; jobs are handed to the store in
//! topological order so a job is always inserted after what it needs.

use crate::error::DefinitionError;
use crate::parser::ParsedJob;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Validated, ordered set of jobs for one run.
#[derive(Debug, Clone)]
pub struct JobGraph {
    graph: DiGraph<ParsedJob, ()>,
    order: Vec<NodeIndex>,
}

impl JobGraph {
    /// Builds the graph from parsed jobs.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no jobs, a job id repeats, a job needs
    /// an unknown job, or the needs form a cycle.
    pub fn from_jobs(jobs: Vec<ParsedJob>) -> Result<Self, DefinitionError> {
        if jobs.is_empty() {
            return Err(DefinitionError::NoJobs);
        }

        let mut graph = DiGraph::with_capacity(jobs.len(), 0);
        let mut index: HashMap<String, NodeIndex> = HashMap::with_capacity(jobs.len());
        for job in jobs {
            let job_id = job.job_id.clone();
            let node = graph.add_node(job);
            if index.insert(job_id.clone(), node).is_some() {
                return Err(DefinitionError::DuplicateJob { job_id });
            }
        }

        let mut edges = Vec::new();
        for node in graph.node_indices() {
            let job = &graph[node];
            for need in &job.needs {
                let Some(&needed) = index.get(need) else {
                    return Err(DefinitionError::UnknownNeed {
                        job_id: job.job_id.clone(),
                        need: need.clone(),
                    });
                };
                edges.push((needed, node));
            }
        }
        for (needed, dependent) in edges {
            graph.add_edge(needed, dependent, ());
        }

        let order = toposort(&graph, None).map_err(|cycle| DefinitionError::CycleDetected {
            job_id: graph[cycle.node_id()].job_id.clone(),
        })?;

        Ok(Self { graph, order })
    }

    /// Jobs in dependency order.
    pub fn jobs(&self) -> impl Iterator<Item = &ParsedJob> {
        self.order.iter().map(|&idx| &self.graph[idx])
    }
}
