//! Per-frame snapshots handed to the renderer.

use super::types::GraphNode;

/// Resolved render state for one node.
#[derive(Clone, Debug)]
pub struct NodeFrame {
	pub id: String,
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub color: Option<String>,
}

/// Resolved endpoint positions for one edge.
#[derive(Clone, Copy, Debug)]
pub struct EdgeFrame {
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
}

/// Read-only snapshot of the current simulation state. Re-derived
/// fresh each tick; nothing mutates it after capture.
#[derive(Clone, Debug, Default)]
pub struct FrameSnapshot {
	nodes: Vec<NodeFrame>,
	edges: Vec<EdgeFrame>,
}

impl FrameSnapshot {
	pub(crate) fn capture(nodes: &[GraphNode], edges: &[(usize, usize)]) -> Self {
		let node_frames = nodes
			.iter()
			.map(|n| NodeFrame {
				id: n.id.clone(),
				x: n.x,
				y: n.y,
				radius: n.radius,
				color: n.color.clone(),
			})
			.collect();
		let edge_frames = edges
			.iter()
			.map(|&(s, t)| EdgeFrame {
				x1: nodes[s].x,
				y1: nodes[s].y,
				x2: nodes[t].x,
				y2: nodes[t].y,
			})
			.collect();
		Self {
			nodes: node_frames,
			edges: edge_frames,
		}
	}

	pub fn nodes(&self) -> &[NodeFrame] {
		&self.nodes
	}

	pub fn edges(&self) -> &[EdgeFrame] {
		&self.edges
	}
}
