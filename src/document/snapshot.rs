use super::WorkflowDocument;
use crate::error::SnapshotError;
use bincode::config::standard;
use bincode::{decode_from_slice, encode_to_vec};
use std::fs;
use std::io::{Read, Write};

impl WorkflowDocument {
    /// Saves the document to a file in the compact bincode format.
    pub fn save(&self, path: &str) -> Result<(), SnapshotError> {
        let bytes = self.to_bytes()?;
        let mut file = fs::File::create(path).map_err(|e| {
            SnapshotError::Generic(format!("Could not create file '{}': {}", path, e))
        })?;
        file.write_all(&bytes).map_err(|e| {
            SnapshotError::Generic(format!("Could not write to file '{}': {}", path, e))
        })?;
        Ok(())
    }

    /// Loads a document from a bincode snapshot file.
    pub fn from_file(path: &str) -> Result<Self, SnapshotError> {
        let mut file = fs::File::open(path).map_err(|e| {
            SnapshotError::Generic(format!("Could not open file '{}': {}", path, e))
        })?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|e| {
            SnapshotError::Generic(format!("Could not read from file '{}': {}", path, e))
        })?;
        Self::from_bytes(&bytes)
    }

    /// Deserializes a document from snapshot bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        decode_from_slice(bytes, standard())
            .map(|(document, _)| document) // bincode 2 returns (data, bytes_read)
            .map_err(|e| SnapshotError::Generic(format!("Deserialization failed: {}", e)))
    }

    /// Serializes the document to snapshot bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        encode_to_vec(self, standard())
            .map_err(|e| SnapshotError::Generic(format!("Serialization failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentNode, DocumentPosition};
    use crate::graph::{ActionConfig, Edge, ErrorStrategy, NodePayload, TriggerConfig};

    fn sample_document() -> WorkflowDocument {
        WorkflowDocument {
            name: "snapshot sample".to_string(),
            nodes: vec![
                DocumentNode {
                    id: "Trigger1".to_string(),
                    label: "Start".to_string(),
                    position: Some(DocumentPosition { x: 80.0, y: 80.0 }),
                    payload: NodePayload::Trigger(TriggerConfig::default()),
                    error_strategy: ErrorStrategy::Stop,
                },
                DocumentNode {
                    id: "Http1".to_string(),
                    label: "Fetch".to_string(),
                    position: None,
                    payload: NodePayload::Action(ActionConfig {
                        url: "https://catfact.ninja/fact".to_string(),
                        ..ActionConfig::default()
                    }),
                    error_strategy: ErrorStrategy::SkipBranch,
                },
            ],
            edges: vec![Edge::new("Trigger1", "Http1").with_handles("out", "in")],
        }
    }

    #[test]
    fn snapshot_bytes_round_trip() {
        let document = sample_document();
        let bytes = document.to_bytes().unwrap();
        let restored = WorkflowDocument::from_bytes(&bytes).unwrap();

        assert_eq!(restored.name, document.name);
        assert_eq!(restored.nodes.len(), 2);
        assert_eq!(restored.edges[0].source_handle.as_deref(), Some("out"));
        assert_eq!(restored.nodes[1].error_strategy, ErrorStrategy::SkipBranch);
    }

    #[test]
    fn corrupt_snapshot_is_an_error() {
        assert!(WorkflowDocument::from_bytes(&[0xff, 0x00, 0x13]).is_err());
    }
}
