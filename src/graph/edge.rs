use serde::{Deserialize, Serialize};

/// A directed connection between two nodes, referenced by id.
///
/// Handles name the output/input ports on multi-port nodes (a control node's
/// branch outputs, for example). Two edges may connect the same node pair as
/// long as their handles differ; the full `(source, source_handle, target,
/// target_handle)` key is unique within a graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct Edge {
    pub source: String,
    pub target: String,
    #[serde(default, alias = "sourceHandle")]
    pub source_handle: Option<String>,
    #[serde(default, alias = "targetHandle")]
    pub target_handle: Option<String>,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
        }
    }

    pub fn with_handles(
        mut self,
        source_handle: impl Into<String>,
        target_handle: impl Into<String>,
    ) -> Self {
        self.source_handle = Some(source_handle.into());
        self.target_handle = Some(target_handle.into());
        self
    }

    /// The uniqueness key used to reject duplicate edges at insertion.
    pub(crate) fn key(&self) -> EdgeKey {
        (
            self.source.clone(),
            self.source_handle.clone(),
            self.target.clone(),
            self.target_handle.clone(),
        )
    }
}

pub(crate) type EdgeKey = (String, Option<String>, String, Option<String>);
