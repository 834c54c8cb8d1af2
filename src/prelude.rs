//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types and functions from the keiro
//! crate. Import this module to get the core engine surface without having
//! to import each item individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use keiro::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let json = std::fs::read_to_string("path/to/workflow.json")?;
//! let graph = WorkflowDocument::from_json(&json)?.into_workflow()?;
//!
//! let report = validate(&graph);
//! if report.is_valid() {
//!     let plan = plan(&graph, &report)?;
//!     println!("{} layer(s)", plan.layer_count());
//! }
//! # Ok(())
//! # }
//! ```

// Graph model
pub use crate::graph::{
    ActionConfig, ControlConfig, Edge, ErrorStrategy, ExecutionType, Graph, Node, NodePayload,
    OutputConfig, TransformConfig, TriggerConfig,
};

// Validation
pub use crate::validator::{Issue, IssueCode, Severity, ValidationReport, validate};

// Planning
pub use crate::planner::{ExecutionPlan, NodePosition, auto_layout, plan};

// Execution semantics
pub use crate::semantics::{
    ExecutionBehavior, FailureDecision, NodeStatus, OutputMap, WorkflowStatus, aggregate_status,
    extract_references, resolve_failure, resolve_variables, validate_references,
};

// Document layer
pub use crate::document::{IntoWorkflow, WorkflowDocument};

// Error types
pub use crate::error::{GraphError, PlanError, SnapshotError, WorkflowConversionError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
