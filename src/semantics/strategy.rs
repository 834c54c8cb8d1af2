use crate::error::GraphError;
use crate::graph::{ErrorStrategy, Graph};
use tracing::trace;

/// The state transition the executor must apply after a node failure.
///
/// Computed, never performed: the executor does the waiting, skipping, and
/// substituting.
#[derive(Debug, Clone, PartialEq)]
pub enum FailureDecision {
    /// Abort the whole plan.
    Abort,
    /// Continue remaining layers with the listed nodes marked skipped.
    SkipBranch { skipped: Vec<String> },
    /// Re-invoke the node after the given delay. `attempt` is zero-based.
    RetryAfter { attempt: u32, delay_ms: u64 },
    /// Use the named node's recorded output in place of this node's.
    Substitute { fallback_node_id: String },
}

/// Resolves a node failure into a [`FailureDecision`] according to the
/// node's error strategy.
///
/// `attempts_made` counts invocations that have already failed, the initial
/// one included; a `Retry` strategy with `count` retries therefore degrades
/// to abort once `attempts_made > count`.
pub fn resolve_failure(
    graph: &Graph,
    node_id: &str,
    attempts_made: u32,
) -> Result<FailureDecision, GraphError> {
    let node = graph
        .node(node_id)
        .ok_or_else(|| GraphError::NodeNotFound(node_id.to_string()))?;

    let decision = match &node.error_strategy {
        ErrorStrategy::Stop => FailureDecision::Abort,
        ErrorStrategy::SkipBranch => FailureDecision::SkipBranch {
            skipped: graph.downstream_of(node_id),
        },
        ErrorStrategy::Retry {
            count,
            delay_ms,
            backoff_multiplier,
        } => {
            if attempts_made <= *count {
                let attempt = attempts_made.saturating_sub(1);
                FailureDecision::RetryAfter {
                    attempt,
                    delay_ms: backoff_delay(*delay_ms, *backoff_multiplier, attempt),
                }
            } else {
                // Retries exhausted; fail over to stop semantics.
                FailureDecision::Abort
            }
        }
        ErrorStrategy::Fallback { node_id: fallback } => {
            if graph.contains_node(fallback) {
                FailureDecision::Substitute {
                    fallback_node_id: fallback.clone(),
                }
            } else {
                // Validation reports this as INVALID_CONNECTION; at run time
                // the only safe degradation is stop semantics.
                FailureDecision::Abort
            }
        }
    };

    trace!(node = node_id, attempts_made, ?decision, "resolved failure");
    Ok(decision)
}

/// `delay_ms * multiplier^attempt`, saturating on overflow.
///
/// Fractional multipliers in (0, 1) shrink the delay per attempt; only
/// non-finite or non-positive values fall back to a constant delay.
fn backoff_delay(delay_ms: u64, multiplier: f64, attempt: u32) -> u64 {
    let multiplier = if multiplier.is_finite() && multiplier > 0.0 {
        multiplier
    } else {
        1.0
    };
    let scaled = delay_ms as f64 * multiplier.powi(attempt as i32);
    if scaled >= u64::MAX as f64 {
        u64::MAX
    } else {
        scaled as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{ActionConfig, Edge, Node, NodePayload};

    fn graph_with_strategy(strategy: ErrorStrategy) -> Graph {
        let mut g = Graph::new();
        for id in ["a", "b", "c"] {
            let mut node = Node::new(id, id, NodePayload::Action(ActionConfig::default()));
            if id == "b" {
                node = node.with_error_strategy(strategy.clone());
            }
            g.add_node(node).unwrap();
        }
        g.add_edge(Edge::new("a", "b")).unwrap();
        g.add_edge(Edge::new("b", "c")).unwrap();
        g
    }

    #[test]
    fn stop_aborts() {
        let g = graph_with_strategy(ErrorStrategy::Stop);
        assert_eq!(resolve_failure(&g, "b", 1).unwrap(), FailureDecision::Abort);
    }

    #[test]
    fn skip_branch_skips_exactly_the_downstream_set() {
        let g = graph_with_strategy(ErrorStrategy::SkipBranch);
        assert_eq!(
            resolve_failure(&g, "b", 1).unwrap(),
            FailureDecision::SkipBranch {
                skipped: vec!["c".to_string()]
            }
        );
    }

    #[test]
    fn retry_backs_off_then_aborts() {
        let g = graph_with_strategy(ErrorStrategy::Retry {
            count: 2,
            delay_ms: 100,
            backoff_multiplier: 3.0,
        });
        assert_eq!(
            resolve_failure(&g, "b", 1).unwrap(),
            FailureDecision::RetryAfter {
                attempt: 0,
                delay_ms: 100
            }
        );
        assert_eq!(
            resolve_failure(&g, "b", 2).unwrap(),
            FailureDecision::RetryAfter {
                attempt: 1,
                delay_ms: 300
            }
        );
        assert_eq!(resolve_failure(&g, "b", 3).unwrap(), FailureDecision::Abort);
    }

    #[test]
    fn fractional_multiplier_shrinks_the_delay() {
        let g = graph_with_strategy(ErrorStrategy::Retry {
            count: 3,
            delay_ms: 1000,
            backoff_multiplier: 0.5,
        });
        assert_eq!(
            resolve_failure(&g, "b", 2).unwrap(),
            FailureDecision::RetryAfter {
                attempt: 1,
                delay_ms: 500
            }
        );
        assert_eq!(
            resolve_failure(&g, "b", 3).unwrap(),
            FailureDecision::RetryAfter {
                attempt: 2,
                delay_ms: 250
            }
        );
    }

    #[test]
    fn degenerate_multiplier_keeps_the_delay_constant() {
        let g = graph_with_strategy(ErrorStrategy::Retry {
            count: 3,
            delay_ms: 400,
            backoff_multiplier: 0.0,
        });
        assert_eq!(
            resolve_failure(&g, "b", 3).unwrap(),
            FailureDecision::RetryAfter {
                attempt: 2,
                delay_ms: 400
            }
        );
    }

    #[test]
    fn fallback_substitutes_or_degrades() {
        let g = graph_with_strategy(ErrorStrategy::Fallback {
            node_id: "a".to_string(),
        });
        assert_eq!(
            resolve_failure(&g, "b", 1).unwrap(),
            FailureDecision::Substitute {
                fallback_node_id: "a".to_string()
            }
        );

        let g = graph_with_strategy(ErrorStrategy::Fallback {
            node_id: "ghost".to_string(),
        });
        assert_eq!(resolve_failure(&g, "b", 1).unwrap(), FailureDecision::Abort);
    }

    #[test]
    fn unknown_node_is_a_graph_error() {
        let g = graph_with_strategy(ErrorStrategy::Stop);
        assert!(matches!(
            resolve_failure(&g, "ghost", 1),
            Err(GraphError::NodeNotFound(_))
        ));
    }
}
