//! Graph generation strategies.
//!
//! Three ways to build the initial node/edge set: Delaunay triangulation
//! over random points, a k-nearest-neighbor mesh, and a synthetic
//! hub-and-spoke dataset. All of them are deterministic for a given seed.

use std::collections::HashSet;
use std::f64::consts::TAU;

use delaunator::{Point, triangulate};
use log::{debug, warn};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::error::GraphError;
use super::types::{GraphData, GraphEdge, GraphNode};

/// Hard cap for the O(N^2) nearest-neighbor scan.
const KNN_NODE_LIMIT: usize = 1000;

/// Attempts per point before giving up on the exclusion rejection loop.
const EXCLUSION_SAMPLE_ATTEMPTS: usize = 50;

/// Axis-aligned sampling region.
#[derive(Clone, Copy, Debug)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
		Self { x, y, width, height }
	}
}

/// Circular exclusion region carving a visual hole out of the mesh.
#[derive(Clone, Copy, Debug)]
pub struct Circle {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
}

impl Circle {
	pub fn contains(&self, x: f64, y: f64) -> bool {
		let (dx, dy) = (x - self.x, y - self.y);
		dx * dx + dy * dy < self.radius * self.radius
	}
}

/// Which construction strategy to run.
#[derive(Clone, Debug)]
pub enum Strategy {
	/// Random points, Delaunay-triangulated, triangle edges extracted.
	Triangulation {
		count: usize,
		bounds: Rect,
		exclusion: Option<Circle>,
	},
	/// Each node linked to its k nearest neighbors. Quadratic scan,
	/// only meant for a few hundred nodes.
	NearestNeighbors { count: usize, k: usize, bounds: Rect },
	/// Named hub nodes with spoke children plus random child-child links.
	HubSpoke {
		hubs: Vec<String>,
		children_per_hub: usize,
		extra_links: usize,
	},
}

/// Full generation configuration.
#[derive(Clone, Debug)]
pub struct GenerateConfig {
	pub strategy: Strategy,
	pub seed: u64,
	/// When set, augment the finished graph so every node reaches
	/// this degree floor (where possible).
	pub min_degree: Option<usize>,
}

impl GenerateConfig {
	fn validate(&self) -> Result<(), GraphError> {
		match &self.strategy {
			Strategy::NearestNeighbors { count, k, bounds } => {
				if *k == 0 {
					return Err(GraphError::InvalidConfig("k must be at least 1".into()));
				}
				if *count > KNN_NODE_LIMIT {
					return Err(GraphError::InvalidConfig(format!(
						"nearest-neighbor strategy capped at {KNN_NODE_LIMIT} nodes, got {count}"
					)));
				}
				if bounds.width <= 0.0 || bounds.height <= 0.0 {
					return Err(GraphError::InvalidConfig("bounds must have positive area".into()));
				}
			}
			Strategy::Triangulation { bounds, .. } => {
				if bounds.width <= 0.0 || bounds.height <= 0.0 {
					return Err(GraphError::InvalidConfig("bounds must have positive area".into()));
				}
			}
			Strategy::HubSpoke { hubs, children_per_hub, .. } => {
				let mut seen = HashSet::new();
				for hub in hubs {
					if !seen.insert(hub.as_str()) {
						return Err(GraphError::InvalidConfig(format!(
							"duplicate hub name: {hub}"
						)));
					}
				}
				// Children are named "Node 1".."Node {total}"; a hub in
				// that range would collide with a generated child id.
				let child_count = hubs.len() * children_per_hub;
				for hub in hubs {
					if let Some(n) = hub.strip_prefix("Node ").and_then(|s| s.parse::<usize>().ok())
					{
						if (1..=child_count).contains(&n) {
							return Err(GraphError::InvalidConfig(format!(
								"hub name collides with child id: {hub}"
							)));
						}
					}
				}
			}
		}
		Ok(())
	}
}

/// Build a graph from the configured strategy. Pure: the same config
/// (including seed) always yields the same graph.
pub fn generate_graph(config: &GenerateConfig) -> Result<GraphData, GraphError> {
	config.validate()?;
	let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

	let mut data = match &config.strategy {
		Strategy::Triangulation { count, bounds, exclusion } => {
			triangulation_graph(*count, *bounds, *exclusion, &mut rng)
		}
		Strategy::NearestNeighbors { count, k, bounds } => {
			nearest_neighbor_graph(*count, *k, *bounds, &mut rng)
		}
		Strategy::HubSpoke { hubs, children_per_hub, extra_links } => {
			hub_spoke_graph(hubs, *children_per_hub, *extra_links, &mut rng)
		}
	};

	if let Some(floor) = config.min_degree {
		augment_min_degree(&mut data, floor, &mut rng);
	}

	init_oscillation(&mut data, &mut rng);
	debug!(
		"generated graph: {} nodes, {} edges",
		data.nodes.len(),
		data.edges.len()
	);
	Ok(data)
}

fn sample_point(bounds: Rect, exclusion: Option<Circle>, rng: &mut ChaCha8Rng) -> Option<(f64, f64)> {
	for _ in 0..EXCLUSION_SAMPLE_ATTEMPTS {
		let x = bounds.x + rng.gen_range(0.0..bounds.width);
		let y = bounds.y + rng.gen_range(0.0..bounds.height);
		match exclusion {
			Some(hole) if hole.contains(x, y) => continue,
			_ => return Some((x, y)),
		}
	}
	None
}

fn triangulation_graph(
	count: usize,
	bounds: Rect,
	exclusion: Option<Circle>,
	rng: &mut ChaCha8Rng,
) -> GraphData {
	let mut data = GraphData::default();
	let mut points = Vec::with_capacity(count);

	for _ in 0..count {
		let Some((x, y)) = sample_point(bounds, exclusion, rng) else {
			continue;
		};
		let id = data.nodes.len().to_string();
		data.push_node(GraphNode::new(id, x, y));
		points.push(Point { x, y });
	}

	// Fewer than 3 usable points yields no triangles, which is fine.
	// Sampling already rejected everything inside the exclusion hole,
	// so every triangulation edge has usable endpoints.
	let triangulation = triangulate(&points);
	let mut seen: HashSet<(usize, usize)> = HashSet::new();
	for tri in triangulation.triangles.chunks_exact(3) {
		for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
			let key = if a < b { (a, b) } else { (b, a) };
			if seen.insert(key) {
				data.push_edge(GraphEdge::new(a.to_string(), b.to_string()));
			}
		}
	}
	data
}

fn nearest_neighbor_graph(count: usize, k: usize, bounds: Rect, rng: &mut ChaCha8Rng) -> GraphData {
	let mut data = GraphData::default();
	let mut positions = Vec::with_capacity(count);

	for i in 0..count {
		let x = bounds.x + rng.gen_range(0.0..bounds.width);
		let y = bounds.y + rng.gen_range(0.0..bounds.height);
		data.push_node(GraphNode::new(i.to_string(), x, y));
		positions.push((x, y));
	}

	let mut seen: HashSet<(usize, usize)> = HashSet::new();
	for i in 0..count {
		let mut by_distance: Vec<(f64, usize)> = (0..count)
			.filter(|&j| j != i)
			.map(|j| {
				let (dx, dy) = (positions[j].0 - positions[i].0, positions[j].1 - positions[i].1);
				(dx * dx + dy * dy, j)
			})
			.collect();
		by_distance.sort_by(|a, b| a.0.total_cmp(&b.0));

		for &(_, j) in by_distance.iter().take(k) {
			let key = if i < j { (i, j) } else { (j, i) };
			if seen.insert(key) {
				data.push_edge(GraphEdge::new(i.to_string(), j.to_string()));
			}
		}
	}
	data
}

fn hub_spoke_graph(
	hubs: &[String],
	children_per_hub: usize,
	extra_links: usize,
	rng: &mut ChaCha8Rng,
) -> GraphData {
	let mut data = GraphData::default();
	for hub in hubs {
		data.push_node(GraphNode::new(hub.clone(), 0.0, 0.0));
	}

	let mut children = Vec::with_capacity(hubs.len() * children_per_hub);
	let mut next_id = 1usize;
	for hub in hubs {
		for _ in 0..children_per_hub {
			let child = format!("Node {next_id}");
			next_id += 1;
			data.push_node(GraphNode::new(child.clone(), 0.0, 0.0));
			data.push_edge(GraphEdge::new(hub.clone(), child.clone()));
			children.push(child);
		}
	}

	// Extra links only among children, drawn without replacement from the
	// remaining pair space so dense requests terminate.
	let mut candidates: Vec<(usize, usize)> = (0..children.len())
		.flat_map(|a| ((a + 1)..children.len()).map(move |b| (a, b)))
		.collect();
	for added in 0..extra_links {
		if candidates.is_empty() {
			warn!("child pair space exhausted after {added} extra links");
			break;
		}
		let pick = rng.gen_range(0..candidates.len());
		let (a, b) = candidates.swap_remove(pick);
		data.push_edge(GraphEdge::new(children[a].clone(), children[b].clone()));
	}

	scatter_positions(&mut data, rng);
	data
}

/// The synthetic dataset has no geometry, so give the solver a spread
/// of starting positions instead of a degenerate single point.
fn scatter_positions(data: &mut GraphData, rng: &mut ChaCha8Rng) {
	for node in &mut data.nodes {
		node.x = rng.gen_range(0.0..600.0);
		node.y = rng.gen_range(0.0..600.0);
		node.home_x = node.x;
		node.home_y = node.y;
	}
}

/// Raise every node to the degree floor by linking it to random
/// not-yet-adjacent peers. A node with no eligible peer left is
/// simply left below the floor.
pub fn augment_min_degree(data: &mut GraphData, floor: usize, rng: &mut ChaCha8Rng) {
	let mut adjacent: HashSet<(String, String)> =
		data.edges.iter().map(|e| e.key()).collect();

	for i in 0..data.nodes.len() {
		while data.nodes[i].degree < floor {
			let id = data.nodes[i].id.clone();
			let eligible: Vec<usize> = (0..data.nodes.len())
				.filter(|&j| {
					j != i && !adjacent.contains(&GraphEdge::new(id.clone(), data.nodes[j].id.clone()).key())
				})
				.collect();
			if eligible.is_empty() {
				debug!("node {id} stuck below degree floor {floor}");
				break;
			}
			let j = eligible[rng.gen_range(0..eligible.len())];
			let edge = GraphEdge::new(id, data.nodes[j].id.clone());
			adjacent.insert(edge.key());
			data.push_edge(edge);
		}
	}
}

fn init_oscillation(data: &mut GraphData, rng: &mut ChaCha8Rng) {
	for node in &mut data.nodes {
		node.phase_x = rng.gen_range(0.0..TAU);
		node.phase_y = rng.gen_range(0.0..TAU);
		node.phase_step = rng.gen_range(0.01..0.03);
	}
}
