//! Error types for graph construction and simulation setup.

use thiserror::Error;

/// Errors surfaced by the graph pipeline. Anything that can go wrong
/// per tick is epsilon-guarded instead of reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
	/// A configuration value rejected at construction time.
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),

	/// An edge references a node id missing from the node set.
	/// Detected at simulation setup, never mid-tick.
	#[error("edge references unknown node: {source_id} -> {target_id}")]
	DanglingEdge { source_id: String, target_id: String },
}
