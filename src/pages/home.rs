use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::debug;
use send_wrapper::SendWrapper;
use wasm_bindgen::JsCast;
use web_sys::{TouchEvent, WheelEvent};

use crate::components::depth_scene::DepthSceneCanvas;
use crate::components::frame_loop::WindowListeners;
use crate::components::label_network::LabelNetworkCanvas;

/// Minimum time between two page changes.
pub const PAGE_COOLDOWN_MS: f64 = 800.0;
/// Minimum vertical travel for a touch swipe to count.
pub const SWIPE_THRESHOLD: f64 = 50.0;

const PAGE_COUNT: usize = 5;
const NETWORK_PAGE: usize = 3;
const DEPTH_PAGE: usize = 4;

/// Current page plus the cooldown gate shared by wheel and touch input.
#[derive(Clone, Debug, PartialEq)]
pub struct PageCursor {
	pub page: usize,
	count: usize,
	locked_until: f64,
	touch_start: f64,
	touch_end: f64,
}

impl PageCursor {
	pub fn new(count: usize) -> Self {
		Self {
			page: 0,
			count: count.max(1),
			locked_until: f64::NEG_INFINITY,
			touch_start: 0.0,
			touch_end: 0.0,
		}
	}

	fn shift(&mut self, forward: bool) {
		self.page = if forward {
			(self.page + 1).min(self.count - 1)
		} else {
			self.page.saturating_sub(1)
		};
	}

	/// Any wheel event inside the cooldown is swallowed; outside it, the sign
	/// of `delta_y` picks the direction. Returns whether the gate was taken.
	pub fn wheel(&mut self, delta_y: f64, now_ms: f64) -> bool {
		if now_ms < self.locked_until {
			return false;
		}
		self.locked_until = now_ms + PAGE_COOLDOWN_MS;
		if delta_y > 0.0 {
			self.shift(true);
		} else if delta_y < 0.0 {
			self.shift(false);
		}
		true
	}

	pub fn touch_start(&mut self, y: f64) {
		self.touch_start = y;
		self.touch_end = y;
	}

	pub fn touch_move(&mut self, y: f64) {
		self.touch_end = y;
	}

	/// An upward swipe moves forward, a downward one back.
	pub fn touch_end(&mut self, now_ms: f64) -> bool {
		if now_ms < self.locked_until {
			return false;
		}
		let diff = self.touch_start - self.touch_end;
		if diff.abs() < SWIPE_THRESHOLD {
			return false;
		}
		self.locked_until = now_ms + PAGE_COOLDOWN_MS;
		self.shift(diff > 0.0);
		true
	}
}

fn section_style(background: &str) -> String {
	format!(
		"height: 100vh; width: 100vw; position: relative; overflow: hidden; display: flex; \
		 align-items: center; justify-content: center; color: #fff; font-size: 2.25rem; background: {background};"
	)
}

fn first_touch_y(ev: &web_sys::Event) -> Option<f64> {
	let touches = ev.dyn_ref::<TouchEvent>()?.touches();
	touches.get(0).map(|t| t.client_y() as f64)
}

/// Full-page vertical pager: plain pages followed by the two canvas engines.
/// Each engine only runs while its page is the current one.
#[component]
pub fn Home() -> impl IntoView {
	let (page, set_page) = signal(0usize);
	let cursor = Rc::new(RefCell::new(PageCursor::new(PAGE_COUNT)));
	let mut listeners = WindowListeners::default();

	if let Some(window) = web_sys::window() {
		let cur = cursor.clone();
		listeners.listen_passive(&window, "wheel", move |ev| {
			let Some(ev) = ev.dyn_ref::<WheelEvent>() else {
				return;
			};
			let mut cur = cur.borrow_mut();
			if cur.wheel(ev.delta_y(), js_sys::Date::now()) {
				set_page.set(cur.page);
			}
		});
		let cur = cursor.clone();
		listeners.listen(&window, "touchstart", move |ev| {
			if let Some(y) = first_touch_y(&ev) {
				cur.borrow_mut().touch_start(y);
			}
		});
		let cur = cursor.clone();
		listeners.listen_passive(&window, "touchmove", move |ev| {
			if let Some(y) = first_touch_y(&ev) {
				cur.borrow_mut().touch_move(y);
			}
		});
		let cur = cursor.clone();
		listeners.listen(&window, "touchend", move |_| {
			let mut cur = cur.borrow_mut();
			if cur.touch_end(js_sys::Date::now()) {
				set_page.set(cur.page);
			}
		});
	}

	let listeners = SendWrapper::new(RefCell::new(listeners));
	on_cleanup(move || listeners.borrow_mut().remove_all());

	Effect::new(move |_| debug!("page {}", page.get()));

	view! {
		<div
			class="page-stack"
			style=move || {
				format!(
					"transform: translateY(-{}vh); height: {}vh; transition: transform 700ms ease-in-out;",
					page.get() * 100,
					PAGE_COUNT * 100,
				)
			}
		>
			<section style=section_style("#3b82f6")>"Page 1"</section>
			<section style=section_style("#22c55e")>"Page 2"</section>
			<section style=section_style("#a855f7")>"Page 3"</section>
			<section style=section_style("#000")>
				<Show when=move || page.get() == NETWORK_PAGE>
					<LabelNetworkCanvas />
				</Show>
			</section>
			<section style=section_style("#fff")>
				<Show when=move || page.get() == DEPTH_PAGE>
					<DepthSceneCanvas />
				</Show>
			</section>
		</div>
	}
}
