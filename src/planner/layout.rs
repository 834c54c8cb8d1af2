use super::ExecutionPlan;
use serde::{Deserialize, Serialize};

/// Canvas coordinates derived for one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePosition {
    #[serde(alias = "nodeId")]
    pub node_id: String,
    pub x: f64,
    pub y: f64,
}

/// Horizontal distance between layers on the canvas.
pub const LAYER_SPACING: f64 = 280.0;
/// Vertical distance between nodes within a layer.
pub const LANE_SPACING: f64 = 140.0;
/// Offset of the first node from the canvas origin.
pub const ORIGIN: (f64, f64) = (80.0, 80.0);

/// Derives canvas coordinates from the plan's layer assignment: the layer
/// index maps to the x axis and the within-layer index to the y axis, both at
/// fixed spacing. Purely a visual convenience; nothing downstream depends on
/// these positions.
pub fn auto_layout(plan: &ExecutionPlan) -> Vec<NodePosition> {
    let mut positions = Vec::with_capacity(plan.node_count());
    for (layer_index, layer) in plan.layers().iter().enumerate() {
        for (lane, node_id) in layer.iter().enumerate() {
            positions.push(NodePosition {
                node_id: node_id.clone(),
                x: ORIGIN.0 + layer_index as f64 * LAYER_SPACING,
                y: ORIGIN.1 + lane as f64 * LANE_SPACING,
            });
        }
    }
    positions
}
