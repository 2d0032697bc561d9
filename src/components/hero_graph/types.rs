//! Graph data model shared by the generator, analyzer and simulation.

use std::collections::HashMap;

/// Default palette seeded onto the most-connected nodes.
pub const DEFAULT_PALETTE: &[&str] = &["#920C00", "#7977FF", "#000792"];

/// How many top-degree nodes receive a palette color.
pub const DEFAULT_HUB_COUNT: usize = 10;

/// Smallest rendered node radius, keeps degree-0 nodes visible.
pub const MIN_NODE_RADIUS: f64 = 2.0;
/// Radius cap so dense hubs don't swallow the layout.
pub const MAX_NODE_RADIUS: f64 = 10.0;

/// A single graph node. Positions are mutated every simulation tick;
/// everything else is written once during generation/analysis.
#[derive(Clone, Debug)]
pub struct GraphNode {
	pub id: String,
	/// Displayed position (solver output plus oscillation overlay).
	pub x: f64,
	pub y: f64,
	/// Oscillation anchor, tracks the solver's settled position.
	pub home_x: f64,
	pub home_y: f64,
	/// Oscillation phases, randomly initialized at creation.
	pub phase_x: f64,
	pub phase_y: f64,
	/// Fixed per-node phase advance per tick.
	pub phase_step: f64,
	/// Count of incident edges.
	pub degree: usize,
	/// Palette color, assigned at most once and never overwritten.
	pub color: Option<String>,
	/// Render radius derived from degree.
	pub radius: f64,
}

impl GraphNode {
	/// Create a node at a position with zeroed oscillation state.
	/// The generator overwrites the phase fields from its RNG.
	pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
		Self {
			id: id.into(),
			x,
			y,
			home_x: x,
			home_y: y,
			phase_x: 0.0,
			phase_y: 0.0,
			phase_step: 0.0,
			degree: 0,
			color: None,
			radius: MIN_NODE_RADIUS,
		}
	}
}

/// Undirected edge between two distinct node ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphEdge {
	pub source: String,
	pub target: String,
}

impl GraphEdge {
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
		}
	}

	/// Canonical unordered key used for deduplication.
	pub fn key(&self) -> (String, String) {
		if self.source <= self.target {
			(self.source.clone(), self.target.clone())
		} else {
			(self.target.clone(), self.source.clone())
		}
	}
}

/// An owned node/edge set with an id index for O(1) lookup.
#[derive(Clone, Debug, Default)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
	index: HashMap<String, usize>,
}

impl GraphData {
	pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
		let index = nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.clone(), i))
			.collect();
		Self { nodes, edges, index }
	}

	pub fn node_index(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	pub fn push_node(&mut self, node: GraphNode) {
		self.index.insert(node.id.clone(), self.nodes.len());
		self.nodes.push(node);
	}

	/// Append an edge and keep both endpoint degrees in sync.
	/// Endpoints must already be present.
	pub fn push_edge(&mut self, edge: GraphEdge) {
		debug_assert!(
			self.index.contains_key(&edge.source) && self.index.contains_key(&edge.target),
			"edge endpoints must exist: {} -> {}",
			edge.source,
			edge.target
		);
		if let Some(&i) = self.index.get(&edge.source) {
			self.nodes[i].degree += 1;
		}
		if let Some(&i) = self.index.get(&edge.target) {
			self.nodes[i].degree += 1;
		}
		self.edges.push(edge);
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

/// Render radius as a monotonic saturating function of degree.
pub fn radius_for_degree(degree: usize) -> f64 {
	(MIN_NODE_RADIUS + degree as f64 * 0.5).min(MAX_NODE_RADIUS)
}
