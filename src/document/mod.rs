//! The serialized workflow document exchanged with the editor and the
//! persistence layer.
//!
//! The document is the editor's JSON shape: nodes carry canvas positions and
//! camelCase field names. Converting a document into a [`Graph`] goes through
//! the same mutation API as incremental edits, so a deserialized workflow is
//! indistinguishable from one built edit by edit.

mod conversion;
mod snapshot;

pub use conversion::*;

use crate::error::WorkflowConversionError;
use crate::graph::{Edge, ErrorStrategy, Graph, NodePayload};
use crate::planner::NodePosition;
use serde::{Deserialize, Serialize};

/// Canvas coordinates as the editor stores them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct DocumentPosition {
    pub x: f64,
    pub y: f64,
}

/// One node as serialized by the editor.
#[derive(Debug, Clone, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct DocumentNode {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub position: Option<DocumentPosition>,
    #[serde(flatten)]
    pub payload: NodePayload,
    #[serde(default, alias = "errorStrategy")]
    pub error_strategy: ErrorStrategy,
}

/// A complete workflow document: name, nodes with positions, edges.
#[derive(Debug, Clone, Default, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct WorkflowDocument {
    #[serde(default)]
    pub name: String,
    pub nodes: Vec<DocumentNode>,
    pub edges: Vec<Edge>,
}

impl WorkflowDocument {
    pub fn from_json(json: &str) -> Result<Self, WorkflowConversionError> {
        serde_json::from_str(json).map_err(|e| WorkflowConversionError::ParseError(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, WorkflowConversionError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| WorkflowConversionError::ParseError(e.to_string()))
    }

    /// Builds a document back from a graph, attaching the given positions
    /// (typically the planner's [`auto_layout`](crate::planner::auto_layout)
    /// output) to each node that has one.
    pub fn from_graph(name: impl Into<String>, graph: &Graph, positions: &[NodePosition]) -> Self {
        let nodes = graph
            .nodes()
            .iter()
            .map(|node| DocumentNode {
                id: node.id.clone(),
                label: node.label.clone(),
                position: positions
                    .iter()
                    .find(|p| p.node_id == node.id)
                    .map(|p| DocumentPosition { x: p.x, y: p.y }),
                payload: node.payload.clone(),
                error_strategy: node.error_strategy.clone(),
            })
            .collect();
        Self {
            name: name.into(),
            nodes,
            edges: graph.edges().to_vec(),
        }
    }
}
