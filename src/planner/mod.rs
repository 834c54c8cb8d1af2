//! Execution planning: topological layering of a validated graph.
//!
//! The planner is a pure function of a graph snapshot. It is only defined
//! for graphs whose validation report has no errors; calling it on anything
//! else is a contract violation and fails loudly rather than returning a
//! partial plan.

mod layout;

pub use layout::*;

use crate::error::PlanError;
use crate::graph::Graph;
use crate::validator::ValidationReport;
use ahash::AHashMap;
use tracing::debug;

/// An ordered sequence of layers covering every node exactly once.
///
/// All nodes within one layer are mutually independent (no edges among them)
/// and every node's direct predecessors sit in a strictly earlier layer, so
/// the executor may run a whole layer concurrently and treat each layer
/// boundary as a synchronization barrier.
///
/// A plan is a derived view with no identity of its own: it must be
/// recomputed whenever the graph mutates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    layers: Vec<Vec<String>>,
}

impl ExecutionPlan {
    pub fn layers(&self) -> &[Vec<String>] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Index of the layer containing `node_id`, if the node is planned.
    pub fn layer_of(&self, node_id: &str) -> Option<usize> {
        self.layers
            .iter()
            .position(|layer| layer.iter().any(|id| id == node_id))
    }

    /// Flattens the layers into one sequential execution order.
    pub fn execution_order(&self) -> Vec<String> {
        self.layers.iter().flatten().cloned().collect()
    }

    pub fn node_count(&self) -> usize {
        self.layers.iter().map(Vec::len).sum()
    }
}

/// Computes the layered execution plan for a validated graph.
///
/// Kahn's algorithm: every node starts with its in-degree; the in-degree-0
/// frontier becomes a layer, each consumed node decrements its successors,
/// and successors reaching zero form the next layer. Ties within a layer
/// resolve to node insertion order, so repeated calls on an unchanged graph
/// return identical plans.
pub fn plan(graph: &Graph, report: &ValidationReport) -> Result<ExecutionPlan, PlanError> {
    if !report.is_valid() {
        return Err(PlanError::InvalidGraph {
            error_count: report.error_count(),
        });
    }

    let mut in_degree: AHashMap<&str, usize> = graph
        .nodes()
        .iter()
        .map(|n| (n.id.as_str(), graph.in_degree(&n.id)))
        .collect();

    let mut placed: usize = 0;
    let mut layers: Vec<Vec<String>> = Vec::new();

    while placed < graph.node_count() {
        // Scanning the node list keeps each layer in insertion order.
        let frontier: Vec<&str> = graph
            .nodes()
            .iter()
            .map(|n| n.id.as_str())
            .filter(|id| in_degree.get(id) == Some(&0))
            .collect();

        if frontier.is_empty() {
            // Unreachable if validation ran first; a cycle slipped through.
            return Err(PlanError::CycleLeftover {
                remaining: graph.node_count() - placed,
            });
        }

        for id in &frontier {
            in_degree.remove(id);
            for successor in graph.successors_of(id) {
                if let Some(degree) = in_degree.get_mut(successor.as_str()) {
                    *degree -= 1;
                }
            }
        }

        placed += frontier.len();
        layers.push(frontier.into_iter().map(str::to_string).collect());
    }

    debug!(
        layers = layers.len(),
        nodes = placed,
        "computed execution plan"
    );
    Ok(ExecutionPlan { layers })
}
