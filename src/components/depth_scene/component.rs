use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::debug;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::render;
use super::state::DepthScene;
use crate::components::frame_loop::{Animation, FrameLoop, Mounted, WindowListeners, browser_seed};
use crate::components::use_engine;
use crate::components::viewport::{self, Viewport};
use crate::error::SurfaceError;

impl Animation for DepthScene {
	fn advance(&mut self) {
		DepthScene::advance(self);
	}

	fn render(&self, ctx: &CanvasRenderingContext2d) {
		render::render(self, ctx);
	}
}

fn mount(canvas: HtmlCanvasElement) -> Result<Mounted, SurfaceError> {
	let window = viewport::window()?;
	let ctx = viewport::acquire_context(&canvas)?;
	let vp = Viewport::read(&window);
	viewport::fit_canvas(&canvas, &ctx, &vp);

	let scene = Rc::new(RefCell::new(DepthScene::new(vp, fastrand::Rng::with_seed(browser_seed()))));
	debug!("depth scene: mounted {}x{} @{}x", vp.width, vp.height, vp.dpr);

	let mut listeners = WindowListeners::default();
	let (scene_resize, ctx_resize) = (scene.clone(), ctx.clone());
	listeners.listen(&window, "resize", move |_| {
		let Some(win) = web_sys::window() else {
			return;
		};
		let vp = Viewport::read(&win);
		viewport::fit_canvas(&canvas, &ctx_resize, &vp);
		scene_resize.borrow_mut().resize(vp);
		debug!("depth scene: rebuilt for {}x{}", vp.width, vp.height);
	});

	let scene_click = scene.clone();
	listeners.listen(&window, "click", move |_| {
		scene_click.borrow_mut().reset();
		debug!("depth scene: reset");
	});

	let frame_loop = FrameLoop::start(scene, ctx)?;
	Ok(Mounted::new("depth scene", frame_loop, listeners))
}

/// Oversized letters gliding toward the viewer with depth-of-field blur.
/// Clicking anywhere re-seeds the letters.
#[component]
pub fn DepthSceneCanvas() -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	use_engine(canvas_ref, mount);

	view! {
		<canvas
			node_ref=canvas_ref
			class="depth-scene-canvas"
			style="display: block; position: absolute; top: 0; left: 0; background: #fff;"
		/>
	}
}
