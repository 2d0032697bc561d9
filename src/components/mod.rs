//! UI components.

pub mod hero_graph;
