//! Structural validation of a workflow graph.
//!
//! [`validate`] is a pure function over a graph snapshot: it holds no state,
//! is safe to call repeatedly and concurrently, and returns every violation
//! it finds as data rather than failing fast. Rules are independent of each
//! other; a graph that trips several of them gets all of their issues in one
//! report.

mod report;
mod rules;

pub use report::*;

use crate::graph::{ExecutionType, Graph};
use crate::semantics::ExecutionBehavior;
use ahash::AHashSet;
use itertools::Itertools;
use tracing::debug;

/// Validates the structural correctness of a graph.
///
/// A report with zero `Error`-severity issues means the graph is structurally
/// executable. Warnings (orphan nodes, unwired terminals) never block
/// execution.
pub fn validate(graph: &Graph) -> ValidationReport {
    let mut report = ValidationReport::default();

    check_trigger_cardinality(graph, &mut report);
    check_cycles(graph, &mut report);
    check_connectivity(graph, &mut report);
    for node in graph.nodes() {
        rules::check_node(graph, node, &mut report.issues);
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        errors = report.error_count(),
        warnings = report.warnings().count(),
        valid = report.is_valid(),
        "validated workflow graph"
    );
    report
}

/// Exactly one trigger when any exists; zero triggers only when some node
/// type may start the workflow; triggers never have incoming edges.
fn check_trigger_cardinality(graph: &Graph, report: &mut ValidationReport) {
    let triggers: Vec<_> = graph
        .nodes()
        .iter()
        .filter(|n| n.execution_type() == ExecutionType::Trigger)
        .collect();

    if triggers.is_empty() {
        let has_starter = graph
            .nodes()
            .iter()
            .any(|n| ExecutionBehavior::for_type(n.execution_type()).can_be_first);
        if !graph.nodes().is_empty() && !has_starter {
            report.push(Issue::error(
                IssueCode::NoTrigger,
                "Workflow has no trigger and no node type that can start it",
            ));
        }
    } else {
        // One issue per extra trigger so the editor can highlight each.
        for extra in triggers.iter().skip(1) {
            report.push(
                Issue::error(
                    IssueCode::MultipleTriggers,
                    format!(
                        "Workflow has more than one trigger; '{}' is redundant",
                        extra.id
                    ),
                )
                .on_node(&extra.id),
            );
        }
    }

    for trigger in &triggers {
        // One issue per incoming connection so the editor can highlight each
        // offending edge.
        for predecessor in graph.predecessors_of(&trigger.id) {
            report.push(
                Issue::error(
                    IssueCode::TriggerHasInput,
                    format!(
                        "Trigger node '{}' must not have an incoming edge from '{}'",
                        trigger.id, predecessor
                    ),
                )
                .on_node(&trigger.id)
                .on_edge(predecessor, &trigger.id),
            );
        }
    }
}

/// Iterative depth-first search over all nodes (not just reachable ones, so
/// cycles in disconnected subgraphs are caught too), maintaining a
/// recursion-stack set. The first back-edge found reports the cycle path and
/// ends the search; re-running after a fix surfaces the next cycle.
fn check_cycles(graph: &Graph, report: &mut ValidationReport) {
    let mut visited: AHashSet<&str> = AHashSet::new();
    let mut on_stack: AHashSet<&str> = AHashSet::new();

    for root in graph.nodes() {
        if visited.contains(root.id.as_str()) {
            continue;
        }
        // Each frame holds the node and the index of the next successor to
        // try, emulating recursion without growing the call stack.
        let mut path: Vec<(&str, usize)> = vec![(root.id.as_str(), 0)];
        on_stack.insert(root.id.as_str());

        while let Some(frame) = path.last_mut() {
            let (id, next) = (frame.0, frame.1);
            let successors = graph.successors_of(id);
            if next < successors.len() {
                frame.1 += 1;
                let successor = successors[next].as_str();
                if on_stack.contains(successor) {
                    let start = path.iter().position(|(p, _)| *p == successor).unwrap_or(0);
                    let cycle: Vec<String> =
                        path[start..].iter().map(|(p, _)| p.to_string()).collect();
                    report.push(
                        Issue::error(
                            IssueCode::CycleDetected,
                            format!("Workflow contains a cycle: {}", cycle.iter().join(" -> ")),
                        )
                        .on_node(successor)
                        .with_cycle(cycle),
                    );
                    return;
                }
                if !visited.contains(successor) {
                    on_stack.insert(successor);
                    path.push((successor, 0));
                }
            } else {
                visited.insert(id);
                on_stack.remove(id);
                path.pop();
            }
        }
    }
}

/// Orphan nodes and unwired terminals. All warnings: a workflow under
/// construction commonly has these transiently.
fn check_connectivity(graph: &Graph, report: &mut ValidationReport) {
    for node in graph.nodes() {
        let in_degree = graph.in_degree(&node.id);
        let out_degree = graph.out_degree(&node.id);

        if in_degree == 0 && out_degree == 0 {
            report.push(
                Issue::warning(
                    IssueCode::OrphanNode,
                    format!("Node '{}' is not connected to anything", node.id),
                )
                .on_node(&node.id),
            );
        }

        match node.execution_type() {
            ExecutionType::Trigger if out_degree == 0 => {
                report.push(
                    Issue::warning(
                        IssueCode::NoOutput,
                        format!("Trigger node '{}' feeds nothing downstream", node.id),
                    )
                    .on_node(&node.id),
                );
            }
            ExecutionType::Output if in_degree == 0 => {
                report.push(
                    Issue::warning(
                        IssueCode::MissingInput,
                        format!("Output node '{}' receives no input", node.id),
                    )
                    .on_node(&node.id),
                );
            }
            _ => {}
        }
    }
}
