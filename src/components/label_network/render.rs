use web_sys::CanvasRenderingContext2d;

use super::state::NetworkState;
use super::types::Node;
use crate::components::FONT_STACK;

pub fn render(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	let (w, h) = (state.viewport.width, state.viewport.height);
	ctx.clear_rect(0.0, 0.0, w, h);

	let gradient = ctx.create_linear_gradient(0.0, 0.0, w, h);
	let _ = gradient.add_color_stop(0.0, "rgba(255,255,255,0.018)");
	let _ = gradient.add_color_stop(1.0, "rgba(255,255,255,0.00)");
	ctx.set_fill_style_canvas_gradient(&gradient);
	ctx.fill_rect(0.0, 0.0, w, h);

	// Edges first so labels sit on top of their lines.
	draw_edges(state, ctx);
	for node in &state.nodes {
		draw_node(node, ctx);
	}
}

fn draw_edges(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	for edge in &state.edges {
		let (a, b) = (&state.nodes[edge.a], &state.nodes[edge.b]);
		ctx.save();
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.set_stroke_style_str(&format!("rgba(255,255,255,{})", edge.stroke.alpha()));
		ctx.set_line_width(edge.stroke.width());
		ctx.stroke();
		ctx.restore();
	}
}

fn draw_node(node: &Node, ctx: &CanvasRenderingContext2d) {
	ctx.save();
	ctx.set_fill_style_str("#fff");
	ctx.set_text_baseline("middle");
	ctx.set_text_align("center");
	ctx.set_font(&format!("{}px {FONT_STACK}", node.size));
	if node.glow {
		ctx.set_shadow_color("rgba(255,255,255,0.9)");
		ctx.set_shadow_blur(24.0);
	} else {
		ctx.set_shadow_color("transparent");
		ctx.set_shadow_blur(0.0);
	}
	let _ = ctx.fill_text(node.label, node.x, node.y);
	ctx.restore();
}
