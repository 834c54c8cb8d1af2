//! # Keiro - Workflow Graph Engine
//!
//! **Keiro** models a user-built API-integration workflow as a directed
//! graph, validates its structural correctness, computes a deterministic
//! layered execution plan, and defines the semantics governing how each node
//! type participates in execution: blocking behavior, error strategies, and
//! variable-reference resolution.
//!
//! ## Core Workflow
//!
//! The engine is an in-memory contract, not a runtime. The editor (or any
//! persistence layer) supplies a [`Graph`](graph::Graph) after every
//! structural mutation; the engine answers with a validation report, a plan,
//! and per-node execution metadata. The executor that actually invokes
//! remote APIs is an external collaborator.
//!
//! 1.  **Build or load a graph**: mutate a [`Graph`](graph::Graph) node by
//!     node, or convert a serialized [`WorkflowDocument`](document::WorkflowDocument)
//!     through the [`IntoWorkflow`](document::IntoWorkflow) trait.
//! 2.  **Validate**: [`validate`](validator::validate) returns an exhaustive
//!     [`ValidationReport`](validator::ValidationReport) listing every
//!     violation, never a thrown error.
//! 3.  **Plan**: [`plan`](planner::plan) layers a valid graph with Kahn's
//!     algorithm; each layer may run concurrently, each boundary is a
//!     synchronization barrier. [`auto_layout`](planner::auto_layout) derives
//!     canvas coordinates from the same leveling.
//! 4.  **Execute (externally)**: the executor consults
//!     [`ExecutionBehavior`](semantics::ExecutionBehavior) for blocking
//!     metadata, [`resolve_failure`](semantics::resolve_failure) when a node
//!     fails, and [`resolve_variables`](semantics::resolve_variables) to fill
//!     `{{nodeId.field}}` references from recorded outputs.
//!
//! ## Quick Start
//!
//! ```rust
//! use keiro::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut graph = Graph::new();
//!     graph.add_node(Node::new(
//!         "Trigger1",
//!         "Start",
//!         NodePayload::Trigger(TriggerConfig::default()),
//!     ))?;
//!     graph.add_node(Node::new(
//!         "Http1",
//!         "Fetch fact",
//!         NodePayload::Action(ActionConfig {
//!             url: "https://catfact.ninja/fact".to_string(),
//!             ..ActionConfig::default()
//!         }),
//!     ))?;
//!     graph.add_node(Node::new(
//!         "Out1",
//!         "Result",
//!         NodePayload::Output(OutputConfig::default()),
//!     ))?;
//!
//!     // The editor's cycle guard, checked before accepting a connection.
//!     assert!(!graph.would_create_cycle("Trigger1", "Http1"));
//!     graph.add_edge(Edge::new("Trigger1", "Http1"))?;
//!     graph.add_edge(Edge::new("Http1", "Out1"))?;
//!
//!     let report = validate(&graph);
//!     assert!(report.is_valid());
//!
//!     let plan = plan(&graph, &report)?;
//!     assert_eq!(plan.execution_order(), ["Trigger1", "Http1", "Out1"]);
//!
//!     Ok(())
//! }
//! ```
//!
//! The validator and planner are pure functions over a graph snapshot: they
//! hold no state, and concurrent callers with distinct snapshots need no
//! locking.

pub mod document;
pub mod error;
pub mod graph;
pub mod planner;
pub mod prelude;
pub mod semantics;
pub mod validator;
