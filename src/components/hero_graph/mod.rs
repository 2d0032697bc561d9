mod analyze;
mod component;
mod error;
mod frame;
mod generate;
mod render;
mod sim;
mod types;

pub use analyze::{PaletteConfig, analyze_connectivity};
pub use component::HeroGraphCanvas;
pub use error::GraphError;
pub use frame::{EdgeFrame, FrameSnapshot, NodeFrame};
pub use generate::{Circle, GenerateConfig, Rect, Strategy, augment_min_degree, generate_graph};
pub use sim::{PhysicsConfig, Simulation};
pub use types::{GraphData, GraphEdge, GraphNode};
