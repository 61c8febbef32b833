use web_sys::CanvasRenderingContext2d;

use super::state::DepthScene;
use super::types::{Letter, Projection};
use crate::components::FONT_STACK;

pub fn render(scene: &DepthScene, ctx: &CanvasRenderingContext2d) {
	let (w, h) = (scene.viewport.width, scene.viewport.height);
	ctx.clear_rect(0.0, 0.0, w, h);

	if let Ok(gradient) =
		ctx.create_radial_gradient(w / 2.0, h / 2.0, w.min(h) * 0.15, w / 2.0, h / 2.0, w.max(h) * 0.7)
	{
		let _ = gradient.add_color_stop(0.0, "rgba(0,0,0,0.02)");
		let _ = gradient.add_color_stop(1.0, "rgba(0,0,0,0.00)");
		ctx.set_fill_style_canvas_gradient(&gradient);
		ctx.fill_rect(0.0, 0.0, w, h);
	}

	// Letters are kept far-to-near, so draw order alone handles occlusion.
	for (letter, projection) in scene.projections() {
		draw_letter(letter, &projection, ctx);
	}
}

fn draw_letter(letter: &Letter, p: &Projection, ctx: &CanvasRenderingContext2d) {
	let mut buf = [0u8; 4];
	let glyph = letter.glyph.encode_utf8(&mut buf);

	ctx.save();
	let _ = ctx.translate(p.screen_x, p.screen_y);
	ctx.set_filter(&format!("blur({:.2}px)", p.blur));
	ctx.set_global_alpha(p.alpha);
	ctx.set_fill_style_str(letter.fill);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_font(&format!("700 {:.1}px {FONT_STACK}", p.size));
	let _ = ctx.fill_text(glyph, 0.0, 0.0);
	ctx.restore();
}
