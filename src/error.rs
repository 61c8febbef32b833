//! Failures that prevent an engine from acquiring its drawing surface.

use thiserror::Error;

/// A fatal precondition violation while attaching an engine to its canvas.
///
/// None of these are recoverable: the engine refuses to start rather than
/// animating against a missing or foreign surface.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SurfaceError {
	/// No global `window` (not running inside a browser document).
	#[error("no browser window available")]
	NoWindow,
	/// `getContext("2d")` returned null or threw.
	#[error("canvas 2d context unavailable")]
	ContextUnavailable,
	/// The returned context was not a `CanvasRenderingContext2D`.
	#[error("canvas context is not a 2d rendering context")]
	ContextType,
	/// `requestAnimationFrame` rejected the frame callback.
	#[error("frame scheduling failed: {0}")]
	Scheduler(String),
}
