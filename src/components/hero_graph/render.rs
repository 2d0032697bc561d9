//! Canvas drawing of frame snapshots.

use web_sys::CanvasRenderingContext2d;

use super::frame::FrameSnapshot;

const BACKGROUND: &str = "#ffffff";
const EDGE_STROKE: &str = "#e7e7e7";
const DEFAULT_NODE_FILL: &str = "#000";
const NODE_OUTLINE: &str = "#ffffff";

pub fn render(frame: &FrameSnapshot, ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, width, height);
	draw_edges(frame, ctx);
	draw_nodes(frame, ctx);
}

fn draw_edges(frame: &FrameSnapshot, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(EDGE_STROKE);
	ctx.set_line_width(1.0);
	for edge in frame.edges() {
		ctx.begin_path();
		ctx.move_to(edge.x1, edge.y1);
		ctx.line_to(edge.x2, edge.y2);
		ctx.stroke();
	}
}

fn draw_nodes(frame: &FrameSnapshot, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(NODE_OUTLINE);
	ctx.set_line_width(1.0);
	for node in frame.nodes() {
		let side = node.radius * 2.0;
		let (left, top) = (node.x - node.radius, node.y - node.radius);
		ctx.set_fill_style_str(node.color.as_deref().unwrap_or(DEFAULT_NODE_FILL));
		ctx.fill_rect(left, top, side, side);
		ctx.stroke_rect(left, top, side, side);
	}
}
