//! Canvas sizing against the browser viewport and device pixel ratio.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use crate::error::SurfaceError;

/// Upper bound on the backing-buffer scale, to bound fill-rate on dense displays.
pub const MAX_DPR: f64 = 2.0;

/// Viewport dimensions in CSS pixels plus the (capped) device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	pub width: f64,
	pub height: f64,
	pub dpr: f64,
}

impl Viewport {
	/// Build a viewport from raw readings. Non-finite or negative sizes read as
	/// zero; a missing or invalid pixel ratio reads as 1.
	pub fn new(width: f64, height: f64, raw_dpr: f64) -> Self {
		let sanitize = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
		let dpr = if raw_dpr.is_finite() && raw_dpr > 0.0 {
			raw_dpr.min(MAX_DPR)
		} else {
			1.0
		};
		Self {
			width: sanitize(width),
			height: sanitize(height),
			dpr,
		}
	}

	/// Read the current window size and pixel ratio.
	pub fn read(window: &Window) -> Self {
		let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
			v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
		};
		Self::new(
			dim(window.inner_width()),
			dim(window.inner_height()),
			window.device_pixel_ratio(),
		)
	}

	pub fn center(&self) -> (f64, f64) {
		(self.width * 0.5, self.height * 0.5)
	}

	/// Backing buffer size in device pixels.
	pub fn buffer_size(&self) -> (u32, u32) {
		(
			(self.width * self.dpr) as u32,
			(self.height * self.dpr) as u32,
		)
	}

	pub fn contains(&self, x: f64, y: f64) -> bool {
		x.is_finite() && y.is_finite() && (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
	}
}

/// The global window, or a fatal error outside a browser document.
pub fn window() -> Result<Window, SurfaceError> {
	web_sys::window().ok_or(SurfaceError::NoWindow)
}

/// Acquire the 2d context of `canvas`.
pub fn acquire_context(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, SurfaceError> {
	canvas
		.get_context("2d")
		.map_err(|_| SurfaceError::ContextUnavailable)?
		.ok_or(SurfaceError::ContextUnavailable)?
		.dyn_into::<CanvasRenderingContext2d>()
		.map_err(|_| SurfaceError::ContextType)
}

/// Resize the backing buffer and CSS box to `viewport`, and scale the drawing
/// transform so callers keep drawing in CSS pixels. Safe to call repeatedly.
pub fn fit_canvas(canvas: &HtmlCanvasElement, ctx: &CanvasRenderingContext2d, viewport: &Viewport) {
	let (bw, bh) = viewport.buffer_size();
	canvas.set_width(bw);
	canvas.set_height(bh);
	let style = canvas.style();
	let _ = style.set_property("width", &format!("{}px", viewport.width));
	let _ = style.set_property("height", &format!("{}px", viewport.height));
	let _ = ctx.set_transform(viewport.dpr, 0.0, 0.0, viewport.dpr, 0.0, 0.0);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pixel_ratio_is_capped() {
		let vp = Viewport::new(1000.0, 800.0, 3.0);
		assert_eq!(vp.dpr, MAX_DPR);
		assert_eq!(vp.buffer_size(), (2000, 1600));
	}

	#[test]
	fn missing_pixel_ratio_reads_as_one() {
		for raw in [0.0, -1.0, f64::NAN, f64::INFINITY] {
			assert_eq!(Viewport::new(10.0, 10.0, raw).dpr, 1.0);
		}
	}

	#[test]
	fn fractional_ratio_truncates_buffer() {
		let vp = Viewport::new(333.0, 101.0, 1.5);
		assert_eq!(vp.buffer_size(), (499, 151));
	}

	#[test]
	fn invalid_sizes_collapse_to_zero() {
		let vp = Viewport::new(f64::NAN, -5.0, 1.0);
		assert_eq!((vp.width, vp.height), (0.0, 0.0));
		assert_eq!(vp.buffer_size(), (0, 0));
	}

	#[test]
	fn contains_rejects_outside_and_nan() {
		let vp = Viewport::new(100.0, 50.0, 1.0);
		assert!(vp.contains(0.0, 0.0));
		assert!(vp.contains(100.0, 50.0));
		assert!(!vp.contains(-0.5, 10.0));
		assert!(!vp.contains(10.0, 50.5));
		assert!(!vp.contains(f64::NAN, 10.0));
	}
}
