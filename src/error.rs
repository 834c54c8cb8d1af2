use thiserror::Error;

/// Errors that can occur while mutating a workflow graph.
///
/// These guard the construction invariants: node ids are unique, edge keys
/// are unique, and every edge endpoint must reference a node already present
/// in the graph. A graph violating them is never representable, so the
/// validator does not re-check these conditions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("A node with id '{0}' already exists in the graph")]
    DuplicateNode(String),

    #[error("Node '{0}' not found in the graph")]
    NodeNotFound(String),

    // The endpoint fields carry an `_id` suffix because thiserror reserves a
    // field literally named `source` for the error's cause chain.
    #[error(
        "Edge from '{source_id}' (handle {source_handle:?}) to '{target_id}' (handle {target_handle:?}) already exists"
    )]
    DuplicateEdge {
        source_id: String,
        source_handle: Option<String>,
        target_id: String,
        target_handle: Option<String>,
    },

    #[error("Edge endpoint '{endpoint}' does not reference a node in the graph")]
    DanglingEdge { endpoint: String },
}

/// Errors that can occur during execution planning.
///
/// `plan` is defined only for graphs that passed validation; both variants
/// here are programming-contract violations rather than user-facing
/// validation results, and they must surface loudly instead of producing a
/// partial plan.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("Cannot plan an invalid graph: the validation report contains {error_count} error(s)")]
    InvalidGraph { error_count: usize },

    #[error(
        "Internal consistency failure: {remaining} node(s) were never consumed by layering (undetected cycle)"
    )]
    CycleLeftover { remaining: usize },
}

/// Errors that can occur when converting a custom user format into a `Graph`.
#[derive(Error, Debug, Clone)]
pub enum WorkflowConversionError {
    #[error("Invalid workflow document: {0}")]
    ValidationError(String),

    #[error("Workflow document could not be parsed: {0}")]
    ParseError(String),
}

/// Errors that can occur while persisting or loading a workflow snapshot.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Snapshot error: {0}")]
    Generic(String),
}

impl From<GraphError> for WorkflowConversionError {
    fn from(err: GraphError) -> Self {
        WorkflowConversionError::ValidationError(err.to_string())
    }
}
