//! Frame driver, window listener bookkeeping and engine teardown.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, CanvasRenderingContext2d, Event, Window};

use crate::error::SurfaceError;

/// A simulation that is stepped once per display frame and then drawn.
///
/// Frames are nominal ticks: there is no delta-time normalization, so tests can
/// call [`Animation::advance`] a fixed number of times to reproduce a run.
pub trait Animation {
	/// Advance the simulation by one frame.
	fn advance(&mut self);
	/// Draw the current state.
	fn render(&self, ctx: &CanvasRenderingContext2d);
}

/// Seed for per-mount randomness.
pub fn browser_seed() -> u64 {
	(js_sys::Math::random() * u64::MAX as f64) as u64
}

#[derive(Default)]
struct LoopInner {
	callback: RefCell<Option<Closure<dyn FnMut()>>>,
	handle: Cell<Option<i32>>,
	running: Cell<bool>,
}

impl LoopInner {
	fn schedule(&self) -> Result<(), SurfaceError> {
		let window = web_sys::window().ok_or(SurfaceError::NoWindow)?;
		let callback = self.callback.borrow();
		let Some(cb) = callback.as_ref() else {
			return Ok(());
		};
		let id = window
			.request_animation_frame(cb.as_ref().unchecked_ref())
			.map_err(|e| SurfaceError::Scheduler(format!("{e:?}")))?;
		self.handle.set(Some(id));
		Ok(())
	}
}

/// A self-rescheduling `requestAnimationFrame` loop driving one [`Animation`].
pub struct FrameLoop {
	inner: Rc<LoopInner>,
}

impl FrameLoop {
	/// Start animating immediately; the first frame fires on the next vsync.
	pub fn start<A: Animation + 'static>(
		animation: Rc<RefCell<A>>,
		ctx: CanvasRenderingContext2d,
	) -> Result<Self, SurfaceError> {
		let inner = Rc::new(LoopInner::default());
		let weak: Weak<LoopInner> = Rc::downgrade(&inner);
		*inner.callback.borrow_mut() = Some(Closure::new(move || {
			let Some(inner) = weak.upgrade() else {
				return;
			};
			if !inner.running.get() {
				return;
			}
			inner.handle.set(None);
			{
				let mut anim = animation.borrow_mut();
				anim.advance();
				anim.render(&ctx);
			}
			if let Err(err) = inner.schedule() {
				warn!("frame loop halted: {err}");
				inner.running.set(false);
			}
		}));
		inner.running.set(true);
		inner.schedule()?;
		Ok(Self { inner })
	}

	pub fn is_running(&self) -> bool {
		self.inner.running.get()
	}

	/// Cancel the pending frame and release the callback. Idempotent.
	pub fn stop(&self) {
		self.inner.running.set(false);
		if let Some(id) = self.inner.handle.take() {
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(id);
			}
		}
		self.inner.callback.borrow_mut().take();
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		self.stop();
	}
}

/// Window event listeners registered by one owner, removed together.
#[derive(Default)]
pub struct WindowListeners {
	entries: Vec<(&'static str, Closure<dyn FnMut(Event)>)>,
}

impl WindowListeners {
	pub fn listen(&mut self, window: &Window, event: &'static str, handler: impl FnMut(Event) + 'static) {
		self.register(window, event, None, handler);
	}

	/// Like [`WindowListeners::listen`], but promises the browser the handler
	/// never calls `preventDefault`, so scrolling is not held up by it.
	pub fn listen_passive(&mut self, window: &Window, event: &'static str, handler: impl FnMut(Event) + 'static) {
		let options = AddEventListenerOptions::new();
		options.set_passive(true);
		self.register(window, event, Some(options), handler);
	}

	fn register(
		&mut self,
		window: &Window,
		event: &'static str,
		options: Option<AddEventListenerOptions>,
		handler: impl FnMut(Event) + 'static,
	) {
		let closure: Closure<dyn FnMut(Event)> = Closure::new(handler);
		let callback: &js_sys::Function = closure.as_ref().unchecked_ref();
		let added = match &options {
			Some(options) => {
				window.add_event_listener_with_callback_and_add_event_listener_options(event, callback, options)
			}
			None => window.add_event_listener_with_callback(event, callback),
		};
		if let Err(err) = added {
			warn!("failed to listen for {event}: {err:?}");
			return;
		}
		self.entries.push((event, closure));
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Detach every listener. Safe after the window or surface is gone and
	/// safe to call more than once.
	pub fn remove_all(&mut self) {
		let window = web_sys::window();
		for (event, closure) in self.entries.drain(..) {
			if let Some(window) = &window {
				let _ = window.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
			}
		}
	}
}

impl Drop for WindowListeners {
	fn drop(&mut self) {
		self.remove_all();
	}
}

/// A running engine: its frame loop plus the input listeners feeding it.
pub struct Mounted {
	frame_loop: FrameLoop,
	listeners: WindowListeners,
	name: &'static str,
}

impl Mounted {
	pub fn new(name: &'static str, frame_loop: FrameLoop, listeners: WindowListeners) -> Self {
		Self {
			frame_loop,
			listeners,
			name,
		}
	}

	/// Stop drawing and detach all listeners. Idempotent.
	pub fn teardown(&mut self) {
		if self.frame_loop.is_running() || !self.listeners.is_empty() {
			log::debug!("{}: unmounting", self.name);
		}
		self.frame_loop.stop();
		self.listeners.remove_all();
	}
}

impl Drop for Mounted {
	fn drop(&mut self) {
		self.teardown();
	}
}
