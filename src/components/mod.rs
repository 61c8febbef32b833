//! Canvas animation engines and the scaffolding they share.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::error;
use send_wrapper::SendWrapper;
use web_sys::HtmlCanvasElement;

use crate::error::SurfaceError;

pub mod depth_scene;
pub mod frame_loop;
pub mod label_network;
pub mod viewport;

use frame_loop::Mounted;

/// Font stack for every label and glyph drawn on the canvases.
pub const FONT_STACK: &str = "system-ui, -apple-system, Segoe UI, Roboto, Helvetica, Arial";

/// Attach an engine to `canvas_ref` once the element exists and tear it down
/// when the owning component is disposed.
///
/// A mount failure is fatal: it is logged and thrown into JS rather than
/// leaving a half-initialized engine behind.
pub(crate) fn use_engine(
	canvas_ref: NodeRef<leptos::html::Canvas>,
	mount: fn(HtmlCanvasElement) -> Result<Mounted, SurfaceError>,
) {
	let slot: Rc<RefCell<Option<Mounted>>> = Rc::new(RefCell::new(None));
	let slot_init = slot.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if slot_init.borrow().is_some() {
			return;
		}
		match mount(canvas.into()) {
			Ok(mounted) => *slot_init.borrow_mut() = Some(mounted),
			Err(err) => {
				error!("engine mount failed: {err}");
				wasm_bindgen::throw_str(&err.to_string());
			}
		}
	});

	let slot = SendWrapper::new(slot);
	on_cleanup(move || {
		if let Some(mut mounted) = slot.borrow_mut().take() {
			mounted.teardown();
		}
	});
}
