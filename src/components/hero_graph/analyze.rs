//! Degree counting, hub selection and palette propagation.

use log::debug;

use super::error::GraphError;
use super::types::{DEFAULT_HUB_COUNT, DEFAULT_PALETTE, GraphData, radius_for_degree};

/// Palette assignment settings.
#[derive(Clone, Debug)]
pub struct PaletteConfig {
	/// Ordered colors, cycled over the ranked hubs.
	pub colors: Vec<String>,
	/// How many top-degree nodes become hubs.
	pub hub_count: usize,
}

impl Default for PaletteConfig {
	fn default() -> Self {
		Self {
			colors: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
			hub_count: DEFAULT_HUB_COUNT,
		}
	}
}

impl PaletteConfig {
	fn validate(&self) -> Result<(), GraphError> {
		if self.colors.is_empty() {
			return Err(GraphError::InvalidConfig("palette must not be empty".into()));
		}
		if self.hub_count == 0 {
			return Err(GraphError::InvalidConfig("hub count must be at least 1".into()));
		}
		Ok(())
	}
}

/// Annotate the graph in place: recompute degrees, color the top
/// `hub_count` nodes from the palette, then spread each hub's color one
/// hop to uncolored neighbors. First assignment wins everywhere.
pub fn analyze_connectivity(data: &mut GraphData, palette: &PaletteConfig) -> Result<(), GraphError> {
	palette.validate()?;

	for node in &mut data.nodes {
		node.degree = 0;
	}
	for i in 0..data.edges.len() {
		let (source, target) = (data.edges[i].source.clone(), data.edges[i].target.clone());
		if let Some(s) = data.node_index(&source) {
			data.nodes[s].degree += 1;
		}
		if let Some(t) = data.node_index(&target) {
			data.nodes[t].degree += 1;
		}
	}

	// Stable sort keeps insertion order among equal degrees.
	let mut ranked: Vec<usize> = (0..data.nodes.len()).collect();
	ranked.sort_by(|&a, &b| data.nodes[b].degree.cmp(&data.nodes[a].degree));
	let hubs: Vec<usize> = ranked.into_iter().take(palette.hub_count).collect();

	for (rank, &idx) in hubs.iter().enumerate() {
		data.nodes[idx].color = Some(palette.colors[rank % palette.colors.len()].clone());
	}
	debug!("colored {} hub nodes", hubs.len());

	// One-hop propagation in edge iteration order; hubs keep their own
	// color, already-colored neighbors keep theirs.
	for i in 0..data.edges.len() {
		let (source, target) = (data.edges[i].source.clone(), data.edges[i].target.clone());
		let (Some(s), Some(t)) = (data.node_index(&source), data.node_index(&target)) else {
			continue;
		};
		if hubs.contains(&s) && data.nodes[t].color.is_none() {
			data.nodes[t].color = data.nodes[s].color.clone();
		}
		if hubs.contains(&t) && data.nodes[s].color.is_none() {
			data.nodes[s].color = data.nodes[t].color.clone();
		}
	}

	for node in &mut data.nodes {
		node.radius = radius_for_degree(node.degree);
	}
	Ok(())
}
