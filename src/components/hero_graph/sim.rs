//! Force-directed layout engine.
//!
//! One discrete physics step per animation frame: pairwise repulsion,
//! edge springs, weak centering, then an iterative collision
//! constraint pass. An idle oscillation overlay and optional pointer
//! gravity keep the picture alive after the solver settles.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::error::GraphError;
use super::frame::FrameSnapshot;
use super::types::GraphData;

/// Coincident-node guard so distances never divide to NaN.
const MIN_DISTANCE: f64 = 0.01;

/// Solver and overlay parameters.
#[derive(Clone, Debug)]
pub struct PhysicsConfig {
	/// Pairwise repulsion strength, scaled by 1/d^2.
	pub repulsion: f64,
	/// Spring stiffness per edge, in [0, 1] (1 ~ near-rigid).
	pub spring_stiffness: f64,
	/// Target separation along edges.
	pub spring_length: f64,
	/// Pull toward `origin`, keeps the set from drifting off.
	pub centering: f64,
	/// Velocity damping per tick, in [0, 1].
	pub damping: f64,
	/// Displacement scale; decays by `decay` each tick.
	pub energy: f64,
	/// Energy decay per tick. Zero keeps the layout perpetually live.
	pub decay: f64,
	/// Extra clearance on top of summed radii.
	pub collision_padding: f64,
	/// Max separation sweeps per tick.
	pub collision_iterations: usize,
	/// Idle oscillation amplitude around `home`.
	pub oscillation_amplitude: f64,
	/// Fraction of the pointer vector applied per tick, in [0, 1).
	pub gravity_strength: f64,
	/// Centering reference point.
	pub origin: (f64, f64),
}

impl Default for PhysicsConfig {
	fn default() -> Self {
		Self {
			repulsion: 800.0,
			spring_stiffness: 0.05,
			spring_length: 60.0,
			centering: 0.01,
			damping: 0.9,
			energy: 1.0,
			decay: 0.0,
			collision_padding: 2.0,
			collision_iterations: 3,
			oscillation_amplitude: 2.5,
			gravity_strength: 0.01,
			origin: (0.0, 0.0),
		}
	}
}

impl PhysicsConfig {
	fn validate(&self) -> Result<(), GraphError> {
		if !(0.0..=1.0).contains(&self.spring_stiffness) {
			return Err(GraphError::InvalidConfig("spring stiffness must be in [0, 1]".into()));
		}
		if !(0.0..=1.0).contains(&self.damping) {
			return Err(GraphError::InvalidConfig("damping must be in [0, 1]".into()));
		}
		if !(0.0..1.0).contains(&self.gravity_strength) {
			return Err(GraphError::InvalidConfig("gravity strength must be in [0, 1)".into()));
		}
		Ok(())
	}
}

/// A running layout instance. Owns its node/edge storage exclusively;
/// `stop` is terminal and idempotent.
#[derive(Debug)]
pub struct Simulation {
	data: GraphData,
	/// Edges resolved to node indices at setup.
	edges: Vec<(usize, usize)>,
	velocities: Vec<(f64, f64)>,
	energy: f64,
	pointer: Option<(f64, f64)>,
	running: bool,
	config: PhysicsConfig,
}

impl Simulation {
	/// Validate the config, resolve edge endpoints and jitter starting
	/// positions. An edge naming an unknown node fails here, never
	/// during a tick.
	pub fn new(mut data: GraphData, config: PhysicsConfig, seed: u64) -> Result<Self, GraphError> {
		config.validate()?;

		let mut edges = Vec::with_capacity(data.edges.len());
		for edge in &data.edges {
			let (Some(s), Some(t)) = (data.node_index(&edge.source), data.node_index(&edge.target))
			else {
				return Err(GraphError::DanglingEdge {
					source_id: edge.source.clone(),
					target_id: edge.target.clone(),
				});
			};
			edges.push((s, t));
		}

		// Small jitter keeps coincident nodes from locking together.
		let mut rng = ChaCha8Rng::seed_from_u64(seed);
		for node in &mut data.nodes {
			let (jx, jy) = (rng.gen_range(-0.5..0.5), rng.gen_range(-0.5..0.5));
			node.home_x += jx;
			node.home_y += jy;
			node.x = node.home_x;
			node.y = node.home_y;
		}

		let velocities = vec![(0.0, 0.0); data.nodes.len()];
		let energy = config.energy;
		Ok(Self {
			data,
			edges,
			velocities,
			energy,
			pointer: None,
			running: true,
			config,
		})
	}

	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Record the last known pointer position for the gravity overlay.
	pub fn set_pointer(&mut self, x: f64, y: f64) {
		self.pointer = Some((x, y));
	}

	pub fn clear_pointer(&mut self) {
		self.pointer = None;
	}

	/// Terminal stop. Safe to call more than once; later ticks no-op.
	pub fn stop(&mut self) {
		self.running = false;
	}

	/// Advance one physics step and refresh displayed positions.
	pub fn tick(&mut self) {
		if !self.running || self.data.nodes.is_empty() {
			return;
		}
		self.apply_forces();
		self.resolve_collisions();
		self.apply_oscillation();
		self.apply_pointer_gravity();
		self.energy *= 1.0 - self.config.decay;
	}

	/// Immutable per-frame snapshot of current positions and styles.
	pub fn frame(&self) -> FrameSnapshot {
		FrameSnapshot::capture(&self.data.nodes, &self.edges)
	}

	fn apply_forces(&mut self) {
		let n = self.data.nodes.len();
		let mut forces = vec![(0.0f64, 0.0f64); n];

		// Pairwise repulsion, 1/d^2 with an epsilon floor. Exact O(N^2);
		// the generator caps node counts well below where that hurts.
		for i in 0..n {
			for j in (i + 1)..n {
				let dx = self.data.nodes[i].home_x - self.data.nodes[j].home_x;
				let dy = self.data.nodes[i].home_y - self.data.nodes[j].home_y;
				let dist_sq = (dx * dx + dy * dy).max(MIN_DISTANCE * MIN_DISTANCE);
				let dist = dist_sq.sqrt();
				let force = self.config.repulsion / dist_sq;
				let (fx, fy) = (dx / dist * force, dy / dist * force);
				forces[i].0 += fx;
				forces[i].1 += fy;
				forces[j].0 -= fx;
				forces[j].1 -= fy;
			}
		}

		// Edge springs toward the rest length.
		for &(s, t) in &self.edges {
			let dx = self.data.nodes[t].home_x - self.data.nodes[s].home_x;
			let dy = self.data.nodes[t].home_y - self.data.nodes[s].home_y;
			let dist = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
			let force = (dist - self.config.spring_length) * self.config.spring_stiffness;
			let (fx, fy) = (dx / dist * force, dy / dist * force);
			forces[s].0 += fx;
			forces[s].1 += fy;
			forces[t].0 -= fx;
			forces[t].1 -= fy;
		}

		// Weak centering pull.
		let (ox, oy) = self.config.origin;
		for (i, node) in self.data.nodes.iter().enumerate() {
			forces[i].0 += (ox - node.home_x) * self.config.centering;
			forces[i].1 += (oy - node.home_y) * self.config.centering;
		}

		// Damped velocity integration scaled by the energy term.
		for i in 0..n {
			let v = &mut self.velocities[i];
			v.0 = (v.0 + forces[i].0) * self.config.damping;
			v.1 = (v.1 + forces[i].1) * self.config.damping;
			self.data.nodes[i].home_x += v.0 * self.energy;
			self.data.nodes[i].home_y += v.1 * self.energy;
		}
	}

	/// Position-correction sweeps separating overlapping pairs. Runs
	/// until a sweep makes no correction or the iteration cap is hit.
	fn resolve_collisions(&mut self) {
		let n = self.data.nodes.len();
		for _ in 0..self.config.collision_iterations {
			let mut corrected = false;
			for i in 0..n {
				for j in (i + 1)..n {
					let min_dist = self.data.nodes[i].radius
						+ self.data.nodes[j].radius
						+ self.config.collision_padding;
					let dx = self.data.nodes[j].home_x - self.data.nodes[i].home_x;
					let dy = self.data.nodes[j].home_y - self.data.nodes[i].home_y;
					let dist = (dx * dx + dy * dy).sqrt();
					if dist >= min_dist {
						continue;
					}
					// Coincident pair: pick a fixed axis to separate along.
					let (ux, uy) = if dist < MIN_DISTANCE {
						(1.0, 0.0)
					} else {
						(dx / dist, dy / dist)
					};
					let push = (min_dist - dist.max(MIN_DISTANCE)) / 2.0;
					self.data.nodes[i].home_x -= ux * push;
					self.data.nodes[i].home_y -= uy * push;
					self.data.nodes[j].home_x += ux * push;
					self.data.nodes[j].home_y += uy * push;
					corrected = true;
				}
			}
			if !corrected {
				break;
			}
		}
	}

	/// Displayed position = home + amplitude * sin(phase), phase
	/// advancing by the node's fixed randomized step.
	fn apply_oscillation(&mut self) {
		let amp = self.config.oscillation_amplitude;
		for node in &mut self.data.nodes {
			node.phase_x += node.phase_step;
			node.phase_y += node.phase_step;
			node.x = node.home_x + amp * node.phase_x.sin();
			node.y = node.home_y + amp * node.phase_y.sin();
		}
	}

	/// Nudge everything a small fraction toward the last pointer
	/// position. Applied to the anchor too, so the pull accumulates.
	fn apply_pointer_gravity(&mut self) {
		let Some((px, py)) = self.pointer else {
			return;
		};
		let g = self.config.gravity_strength;
		for node in &mut self.data.nodes {
			node.home_x += (px - node.home_x) * g;
			node.home_y += (py - node.home_y) * g;
			node.x += (px - node.x) * g;
			node.y += (py - node.y) * g;
		}
	}
}

#[cfg(test)]
mod tests {
	use std::f64::consts::TAU;

	use super::*;
	use crate::components::hero_graph::types::{GraphData, GraphEdge, GraphNode};

	/// Config with every force and overlay switched off.
	fn inert_config() -> PhysicsConfig {
		PhysicsConfig {
			repulsion: 0.0,
			spring_stiffness: 0.0,
			centering: 0.0,
			collision_iterations: 0,
			oscillation_amplitude: 0.0,
			gravity_strength: 0.0,
			..PhysicsConfig::default()
		}
	}

	fn two_nodes() -> GraphData {
		GraphData::new(
			vec![
				GraphNode::new("a", 0.0, 0.0),
				GraphNode::new("b", 100.0, 0.0),
			],
			vec![GraphEdge::new("a", "b")],
		)
	}

	#[test]
	fn dangling_edge_fails_at_setup() {
		let data = GraphData::new(
			vec![GraphNode::new("a", 0.0, 0.0)],
			vec![GraphEdge::new("a", "ghost")],
		);
		let err = Simulation::new(data, PhysicsConfig::default(), 0).unwrap_err();
		assert_eq!(
			err,
			GraphError::DanglingEdge {
				source_id: "a".into(),
				target_id: "ghost".into()
			}
		);
	}

	#[test]
	fn invalid_stiffness_rejected() {
		let config = PhysicsConfig {
			spring_stiffness: 1.5,
			..PhysicsConfig::default()
		};
		let err = Simulation::new(two_nodes(), config, 0).unwrap_err();
		assert!(matches!(err, GraphError::InvalidConfig(_)));
	}

	#[test]
	fn stop_is_idempotent_and_freezes_positions() {
		let mut sim = Simulation::new(two_nodes(), PhysicsConfig::default(), 1).unwrap();
		sim.tick();
		sim.stop();
		sim.stop();
		assert!(!sim.is_running());
		let before: Vec<(f64, f64)> = sim.data.nodes.iter().map(|n| (n.x, n.y)).collect();
		sim.tick();
		let after: Vec<(f64, f64)> = sim.data.nodes.iter().map(|n| (n.x, n.y)).collect();
		assert_eq!(before, after);
	}

	#[test]
	fn empty_graph_ticks_without_panic() {
		let mut sim = Simulation::new(GraphData::default(), PhysicsConfig::default(), 0).unwrap();
		sim.tick();
		assert!(sim.frame().nodes().is_empty());
	}

	#[test]
	fn repulsion_pushes_nodes_apart() {
		let data = GraphData::new(
			vec![
				GraphNode::new("a", -5.0, 0.0),
				GraphNode::new("b", 5.0, 0.0),
			],
			Vec::new(),
		);
		let config = PhysicsConfig {
			repulsion: 500.0,
			..inert_config()
		};
		let mut sim = Simulation::new(data, config, 2).unwrap();
		let gap_before = sim.data.nodes[1].home_x - sim.data.nodes[0].home_x;
		sim.tick();
		let gap_after = sim.data.nodes[1].home_x - sim.data.nodes[0].home_x;
		assert!(gap_after > gap_before);
	}

	#[test]
	fn spring_pulls_stretched_edge_together() {
		let config = PhysicsConfig {
			spring_stiffness: 0.5,
			spring_length: 10.0,
			..inert_config()
		};
		let mut sim = Simulation::new(two_nodes(), config, 3).unwrap();
		let gap_before = sim.data.nodes[1].home_x - sim.data.nodes[0].home_x;
		sim.tick();
		let gap_after = sim.data.nodes[1].home_x - sim.data.nodes[0].home_x;
		assert!(gap_after < gap_before);
	}

	#[test]
	fn coincident_nodes_never_produce_nan() {
		let data = GraphData::new(
			vec![
				GraphNode::new("a", 50.0, 50.0),
				GraphNode::new("b", 50.0, 50.0),
			],
			vec![GraphEdge::new("a", "b")],
		);
		let mut sim = Simulation::new(data, PhysicsConfig::default(), 4).unwrap();
		for _ in 0..10 {
			sim.tick();
		}
		for node in &sim.data.nodes {
			assert!(node.x.is_finite() && node.y.is_finite());
			assert!(node.home_x.is_finite() && node.home_y.is_finite());
		}
	}

	#[test]
	fn oscillation_is_periodic() {
		let mut data = GraphData::new(vec![GraphNode::new("a", 10.0, 20.0)], Vec::new());
		let steps = 200usize;
		data.nodes[0].phase_step = TAU / steps as f64;
		let config = PhysicsConfig {
			oscillation_amplitude: 2.5,
			..inert_config()
		};
		let mut sim = Simulation::new(data, config, 5).unwrap();
		sim.tick();
		let (x0, y0) = (sim.data.nodes[0].x, sim.data.nodes[0].y);
		for _ in 0..steps {
			sim.tick();
		}
		assert!((sim.data.nodes[0].x - x0).abs() < 1e-6);
		assert!((sim.data.nodes[0].y - y0).abs() < 1e-6);
	}

	#[test]
	fn pointer_gravity_strictly_approaches_pointer() {
		let data = GraphData::new(
			vec![
				GraphNode::new("a", 0.0, 0.0),
				GraphNode::new("b", 300.0, 120.0),
			],
			Vec::new(),
		);
		let config = PhysicsConfig {
			gravity_strength: 0.05,
			..inert_config()
		};
		let mut sim = Simulation::new(data, config, 6).unwrap();
		let (px, py) = (150.0, 80.0);
		sim.set_pointer(px, py);
		let mut last: Vec<f64> = sim
			.data
			.nodes
			.iter()
			.map(|n| ((n.x - px).powi(2) + (n.y - py).powi(2)).sqrt())
			.collect();
		for _ in 0..20 {
			sim.tick();
			for (i, node) in sim.data.nodes.iter().enumerate() {
				let d = ((node.x - px).powi(2) + (node.y - py).powi(2)).sqrt();
				assert!(d < last[i], "node {i} did not approach pointer");
				last[i] = d;
			}
		}
	}

	#[test]
	fn collision_pass_separates_overlapping_cluster() {
		let mut nodes: Vec<GraphNode> = (0..5)
			.map(|i| GraphNode::new(i.to_string(), 50.0 + i as f64 * 0.5, 50.0))
			.collect();
		for node in &mut nodes {
			node.radius = 5.0;
		}
		let config = PhysicsConfig {
			collision_padding: 0.0,
			collision_iterations: 50,
			..inert_config()
		};
		let mut sim = Simulation::new(GraphData::new(nodes, Vec::new()), config, 7).unwrap();
		sim.tick();
		let n = sim.data.nodes.len();
		for i in 0..n {
			for j in (i + 1)..n {
				let dx = sim.data.nodes[i].home_x - sim.data.nodes[j].home_x;
				let dy = sim.data.nodes[i].home_y - sim.data.nodes[j].home_y;
				let dist = (dx * dx + dy * dy).sqrt();
				assert!(
					dist >= 10.0 - 1e-6,
					"pair ({i},{j}) still overlapping at {dist}"
				);
			}
		}
	}

	#[test]
	fn decay_drains_energy() {
		let config = PhysicsConfig {
			decay: 0.1,
			..PhysicsConfig::default()
		};
		let mut sim = Simulation::new(two_nodes(), config, 8).unwrap();
		for _ in 0..5 {
			sim.tick();
		}
		assert!(sim.energy < 1.0);
	}
}
