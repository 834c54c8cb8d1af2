use super::WorkflowDocument;
use crate::error::WorkflowConversionError;
use crate::graph::{Graph, Node};

/// A trait for custom data models that can be converted into a workflow
/// [`Graph`].
///
/// This is the extension point that keeps the engine format-agnostic: parse
/// your own storage or transport format into your own structs, then
/// implement `IntoWorkflow` to hand the engine a graph. The provided
/// [`WorkflowDocument`] implementation covers the editor's native JSON.
pub trait IntoWorkflow {
    /// Consumes the object and builds the workflow graph.
    fn into_workflow(self) -> Result<Graph, WorkflowConversionError>;
}

impl IntoWorkflow for WorkflowDocument {
    /// Replays the document through the graph's mutation API, so the same
    /// construction invariants apply as during incremental editing: a
    /// document with duplicate ids, duplicate edge keys, or dangling edge
    /// endpoints fails conversion rather than producing a malformed graph.
    fn into_workflow(self) -> Result<Graph, WorkflowConversionError> {
        let mut graph = Graph::new();
        for doc_node in self.nodes {
            let node = Node {
                id: doc_node.id,
                label: doc_node.label,
                payload: doc_node.payload,
                error_strategy: doc_node.error_strategy,
            };
            graph.add_node(node)?;
        }
        for edge in self.edges {
            graph.add_edge(edge)?;
        }
        Ok(graph)
    }
}
