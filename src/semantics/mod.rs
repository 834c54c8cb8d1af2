//! Execution semantics consulted by the external plan executor.
//!
//! Nothing in this module performs I/O or waits: given a node, a failure, or
//! a string with variable references, it computes the resulting decision and
//! hands it back. The executor owns the clock, the network, and the output
//! map.

mod strategy;
mod variables;

pub use strategy::*;
pub use variables::*;

use crate::graph::ExecutionType;
use serde::{Deserialize, Serialize};

/// Static execution metadata for one node type.
///
/// `blocks_execution` tells the executor whether this node's completion must
/// be awaited before dependents run; transforms are synchronous/local and do
/// not block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionBehavior {
    pub can_be_first: bool,
    pub can_be_middle: bool,
    pub can_be_last: bool,
    pub blocks_execution: bool,
}

impl ExecutionBehavior {
    /// The fixed lookup table keyed by execution type.
    pub const fn for_type(execution_type: ExecutionType) -> Self {
        match execution_type {
            ExecutionType::Trigger => Self {
                can_be_first: true,
                can_be_middle: false,
                can_be_last: false,
                blocks_execution: true,
            },
            ExecutionType::Action => Self {
                can_be_first: true,
                can_be_middle: true,
                can_be_last: true,
                blocks_execution: true,
            },
            ExecutionType::Transform => Self {
                can_be_first: false,
                can_be_middle: true,
                can_be_last: true,
                blocks_execution: false,
            },
            ExecutionType::Control => Self {
                can_be_first: false,
                can_be_middle: true,
                can_be_last: false,
                blocks_execution: true,
            },
            ExecutionType::Output => Self {
                can_be_first: false,
                can_be_middle: false,
                can_be_last: true,
                blocks_execution: true,
            },
        }
    }
}

/// Status of one node over an execution run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Skipped,
}

/// Aggregate status of the whole workflow run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStatus {
    Completed,
    Failed,
    Partial,
}

/// Folds per-node statuses into the workflow-level outcome: all
/// completed (or skipped by strategy) is `Completed`; failures alongside
/// completions are `Partial`; failures with nothing completed are `Failed`.
pub fn aggregate_status<'a, I>(statuses: I) -> WorkflowStatus
where
    I: IntoIterator<Item = &'a NodeStatus>,
{
    let mut any_failed = false;
    let mut any_completed = false;
    for status in statuses {
        match status {
            NodeStatus::Failed => any_failed = true,
            NodeStatus::Completed => any_completed = true,
            _ => {}
        }
    }
    match (any_failed, any_completed) {
        (false, _) => WorkflowStatus::Completed,
        (true, true) => WorkflowStatus::Partial,
        (true, false) => WorkflowStatus::Failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn behavior_table() {
        assert!(ExecutionBehavior::for_type(ExecutionType::Trigger).can_be_first);
        assert!(!ExecutionBehavior::for_type(ExecutionType::Trigger).can_be_last);
        assert!(ExecutionBehavior::for_type(ExecutionType::Action).can_be_first);
        assert!(!ExecutionBehavior::for_type(ExecutionType::Transform).blocks_execution);
        assert!(ExecutionBehavior::for_type(ExecutionType::Control).blocks_execution);
        assert!(!ExecutionBehavior::for_type(ExecutionType::Output).can_be_first);
    }

    #[test]
    fn status_aggregation() {
        use NodeStatus::*;
        assert_eq!(
            aggregate_status(&[Completed, Completed]),
            WorkflowStatus::Completed
        );
        assert_eq!(
            aggregate_status(&[Completed, Skipped]),
            WorkflowStatus::Completed
        );
        assert_eq!(
            aggregate_status(&[Completed, Failed]),
            WorkflowStatus::Partial
        );
        assert_eq!(aggregate_status(&[Failed, Skipped]), WorkflowStatus::Failed);
    }
}
