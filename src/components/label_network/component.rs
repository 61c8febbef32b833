use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, PointerEvent};

use super::render;
use super::state::NetworkState;
use crate::components::frame_loop::{Animation, FrameLoop, Mounted, WindowListeners, browser_seed};
use crate::components::use_engine;
use crate::components::viewport::{self, Viewport};
use crate::error::SurfaceError;

impl Animation for NetworkState {
	fn advance(&mut self) {
		NetworkState::advance(self);
	}

	fn render(&self, ctx: &CanvasRenderingContext2d) {
		render::render(self, ctx);
	}
}

/// Feed pointer moves into the network; other event types are ignored.
fn track_pointer(state: Rc<RefCell<NetworkState>>) -> impl FnMut(Event) + 'static {
	move |ev| {
		if let Some(ev) = ev.dyn_ref::<PointerEvent>() {
			state
				.borrow_mut()
				.set_pointer(ev.client_x() as f64, ev.client_y() as f64);
		}
	}
}

fn mount(canvas: HtmlCanvasElement) -> Result<Mounted, SurfaceError> {
	let window = viewport::window()?;
	let ctx = viewport::acquire_context(&canvas)?;
	let vp = Viewport::read(&window);
	viewport::fit_canvas(&canvas, &ctx, &vp);

	let mut rng = fastrand::Rng::with_seed(browser_seed());
	let state = Rc::new(RefCell::new(NetworkState::new(vp, &mut rng)));
	debug!(
		"label network: mounted {}x{} @{}x with {} nodes",
		vp.width,
		vp.height,
		vp.dpr,
		state.borrow().nodes.len()
	);

	let mut listeners = WindowListeners::default();
	let (state_resize, ctx_resize) = (state.clone(), ctx.clone());
	listeners.listen(&window, "resize", move |_| {
		let Some(win) = web_sys::window() else {
			return;
		};
		let vp = Viewport::read(&win);
		viewport::fit_canvas(&canvas, &ctx_resize, &vp);
		state_resize.borrow_mut().resize(vp);
		debug!("label network: resized to {}x{}", vp.width, vp.height);
	});

	listeners.listen(&window, "pointermove", track_pointer(state.clone()));

	let state_leave = state.clone();
	listeners.listen(&window, "pointerleave", move |_| {
		state_leave.borrow_mut().clear_pointer();
	});

	let frame_loop = FrameLoop::start(state, ctx)?;
	Ok(Mounted::new("label network", frame_loop, listeners))
}

/// Hub-and-satellite label graph that drifts on springs and shies away from
/// the pointer. Fills the viewport while mounted.
#[component]
pub fn LabelNetworkCanvas() -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	use_engine(canvas_ref, mount);

	view! {
		<canvas
			node_ref=canvas_ref
			class="label-network-canvas"
			style="display: block; position: absolute; top: 0; left: 0; background: #000;"
		/>
	}
}
