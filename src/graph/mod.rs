//! The workflow graph model: nodes, edges, and adjacency queries.
//!
//! A [`Graph`] is mutated one operation at a time by the external editor;
//! every mutation is atomic and leaves the graph well-formed (though possibly
//! invalid in the validator's sense). Construction invariants (unique node
//! ids, unique edge keys, no dangling endpoints) are enforced here and are
//! therefore never validation-time concerns.

mod edge;
mod node;

pub use edge::*;
pub use node::*;

use crate::error::GraphError;
use ahash::{AHashMap, AHashSet};

/// An ordered sequence of nodes plus a set of edges between them.
///
/// Node insertion order is irrelevant to execution semantics but is kept
/// stable: the editor iterates it for display and the planner uses it as the
/// deterministic tie-break within a layer. The serialized form of a workflow
/// is [`WorkflowDocument`](crate::document::WorkflowDocument); a graph is
/// only ever built through its mutation API.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    node_index: AHashMap<String, usize>,
    edge_keys: AHashSet<EdgeKey>,
    /// Deduplicated direct successors per node id.
    successors: AHashMap<String, Vec<String>>,
    /// Deduplicated direct predecessors per node id.
    predecessors: AHashMap<String, Vec<String>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds every derived index from the node and edge lists.
    fn rebuild_indexes(&mut self) {
        self.node_index.clear();
        self.edge_keys.clear();
        self.successors.clear();
        self.predecessors.clear();
        for (i, node) in self.nodes.iter().enumerate() {
            self.node_index.insert(node.id.clone(), i);
        }
        let edges = std::mem::take(&mut self.edges);
        for edge in &edges {
            self.edge_keys.insert(edge.key());
            Self::link(&mut self.successors, &edge.source, &edge.target);
            Self::link(&mut self.predecessors, &edge.target, &edge.source);
        }
        self.edges = edges;
    }

    fn link(index: &mut AHashMap<String, Vec<String>>, from: &str, to: &str) {
        let entry = index.entry(from.to_string()).or_default();
        if !entry.iter().any(|id| id == to) {
            entry.push(to.to_string());
        }
    }

    // --- Mutations -------------------------------------------------------

    /// Adds a node. Fails if a node with the same id is already present.
    pub fn add_node(&mut self, node: Node) -> Result<(), GraphError> {
        if self.node_index.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode(node.id));
        }
        self.node_index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    /// Removes a node and every edge incident to it.
    pub fn remove_node(&mut self, node_id: &str) -> Result<Node, GraphError> {
        let index = *self
            .node_index
            .get(node_id)
            .ok_or_else(|| GraphError::NodeNotFound(node_id.to_string()))?;
        let node = self.nodes.remove(index);
        self.edges
            .retain(|e| e.source != node_id && e.target != node_id);
        self.rebuild_indexes();
        Ok(node)
    }

    /// Adds an edge. Both endpoints must already exist, and the full
    /// `(source, source_handle, target, target_handle)` key must be new.
    ///
    /// Self-loops are representable here on purpose: the editor's cycle guard
    /// is [`Graph::would_create_cycle`], and anything that slips past it must
    /// still be caught by validation.
    pub fn add_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        if !self.node_index.contains_key(&edge.source) {
            return Err(GraphError::DanglingEdge {
                endpoint: edge.source,
            });
        }
        if !self.node_index.contains_key(&edge.target) {
            return Err(GraphError::DanglingEdge {
                endpoint: edge.target,
            });
        }
        let key = edge.key();
        if self.edge_keys.contains(&key) {
            return Err(GraphError::DuplicateEdge {
                source_id: edge.source,
                source_handle: edge.source_handle,
                target_id: edge.target,
                target_handle: edge.target_handle,
            });
        }
        self.edge_keys.insert(key);
        Self::link(&mut self.successors, &edge.source, &edge.target);
        Self::link(&mut self.predecessors, &edge.target, &edge.source);
        self.edges.push(edge);
        Ok(())
    }

    /// Removes the edge matching the full key. Returns whether one existed.
    pub fn remove_edge(&mut self, edge: &Edge) -> bool {
        let key = edge.key();
        if !self.edge_keys.remove(&key) {
            return false;
        }
        self.edges.retain(|e| e.key() != key);
        // Parallel edges with different handles may still connect the pair.
        let pair_remains = self
            .edges
            .iter()
            .any(|e| e.source == edge.source && e.target == edge.target);
        if !pair_remains {
            if let Some(succ) = self.successors.get_mut(&edge.source) {
                succ.retain(|id| *id != edge.target);
            }
            if let Some(pred) = self.predecessors.get_mut(&edge.target) {
                pred.retain(|id| *id != edge.source);
            }
        }
        true
    }

    // --- Queries ---------------------------------------------------------

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.node_index.get(node_id).map(|&i| &self.nodes[i])
    }

    pub fn node_mut(&mut self, node_id: &str) -> Option<&mut Node> {
        self.node_index
            .get(node_id)
            .copied()
            .map(move |i| &mut self.nodes[i])
    }

    pub fn contains_node(&self, node_id: &str) -> bool {
        self.node_index.contains_key(node_id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Direct successors of a node, deduplicated, in edge-insertion order.
    pub fn successors_of(&self, node_id: &str) -> &[String] {
        self.successors
            .get(node_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Direct predecessors of a node, deduplicated, in edge-insertion order.
    pub fn predecessors_of(&self, node_id: &str) -> &[String] {
        self.predecessors
            .get(node_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of distinct nodes with an edge into `node_id`.
    pub fn in_degree(&self, node_id: &str) -> usize {
        self.predecessors_of(node_id).len()
    }

    /// Number of distinct nodes this node has an edge to.
    pub fn out_degree(&self, node_id: &str) -> usize {
        self.successors_of(node_id).len()
    }

    /// Every node reachable by following edges forward from `node_id`,
    /// excluding the node itself, deduplicated in discovery order.
    ///
    /// Uses an explicit stack with a visited set, so it terminates even on a
    /// graph that (incorrectly) contains a cycle.
    pub fn downstream_of(&self, node_id: &str) -> Vec<String> {
        self.closure(node_id, |id| self.successors_of(id))
    }

    /// Every node reachable by following edges backward from `node_id`,
    /// excluding the node itself, deduplicated in discovery order.
    pub fn upstream_of(&self, node_id: &str) -> Vec<String> {
        self.closure(node_id, |id| self.predecessors_of(id))
    }

    fn closure<'a, F>(&'a self, start: &str, neighbors: F) -> Vec<String>
    where
        F: Fn(&str) -> &'a [String],
    {
        let mut visited: AHashSet<&str> = AHashSet::new();
        let mut order = Vec::new();
        let mut stack: Vec<&str> = neighbors(start).iter().map(String::as_str).rev().collect();
        visited.insert(start);
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            order.push(id.to_string());
            for next in neighbors(id).iter().rev() {
                if !visited.contains(next.as_str()) {
                    stack.push(next);
                }
            }
        }
        order
    }

    /// True iff adding the edge `source -> target` would close a cycle.
    ///
    /// This is the single pre-check the editor must call before accepting a
    /// new connection. It is a guard, not a substitute for full validation:
    /// cycles assembled by other means are still caught by the validator.
    pub fn would_create_cycle(&self, source: &str, target: &str) -> bool {
        if source == target {
            return true;
        }
        self.downstream_of(target).iter().any(|id| id == source)
    }
}
