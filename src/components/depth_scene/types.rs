use std::f64::consts::PI;

use crate::components::viewport::Viewport;

/// Fixed creation parameters for one glyph; the scene is rebuilt from these.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LetterSpec {
	pub glyph: char,
	/// Offset from the viewport center as fractions of width and height.
	pub offset: (f64, f64),
	/// Starting depth relative to the focal plane.
	pub depth: f64,
	pub size: f64,
	pub fill: &'static str,
	pub alpha: f64,
	pub drift: f64,
	pub z_jitter: f64,
	pub lock_blur: Option<f64>,
}

pub const DEFAULT_Z_JITTER: f64 = 40.0;

pub const LETTERS: [LetterSpec; 4] = [
	LetterSpec {
		glyph: 'K',
		offset: (-0.32, -0.28),
		depth: 60.0,
		size: 320.0,
		fill: "rgb(90,90,90)",
		alpha: 0.95,
		drift: 0.12,
		z_jitter: DEFAULT_Z_JITTER,
		lock_blur: None,
	},
	LetterSpec {
		glyph: 'O',
		offset: (0.33, -0.2),
		depth: 800.0,
		size: 260.0,
		fill: "rgb(190,190,190)",
		alpha: 0.75,
		drift: 0.1,
		z_jitter: DEFAULT_Z_JITTER,
		lock_blur: None,
	},
	LetterSpec {
		glyph: 'D',
		offset: (-0.03, 0.22),
		depth: -450.0,
		size: 820.0,
		fill: "rgb(160,160,160)",
		alpha: 0.85,
		drift: 0.18,
		z_jitter: DEFAULT_Z_JITTER,
		lock_blur: None,
	},
	LetterSpec {
		glyph: 'A',
		offset: (0.4, 0.22),
		depth: 40.0,
		size: 380.0,
		fill: "rgb(0,0,0)",
		alpha: 1.0,
		drift: 0.14,
		z_jitter: DEFAULT_Z_JITTER,
		lock_blur: None,
	},
];

/// A glyph drifting through depth. `x`/`y` are relative to the viewport
/// center before projection; `z` grows away from the viewer.
#[derive(Clone, Debug, PartialEq)]
pub struct Letter {
	pub glyph: char,
	pub x: f64,
	pub y: f64,
	pub z: f64,
	pub base_size: f64,
	pub base_alpha: f64,
	pub fill: &'static str,
	pub drift: f64,
	pub z_jitter: f64,
	pub lock_blur: Option<f64>,
	/// Sway oscillator phases.
	pub rx: f64,
	pub ry: f64,
	pub r_speed: f64,
}

impl Letter {
	pub fn from_spec(spec: &LetterSpec, viewport: &Viewport, focus_z: f64, rng: &mut fastrand::Rng) -> Self {
		Self {
			glyph: spec.glyph,
			x: viewport.width * spec.offset.0,
			y: viewport.height * spec.offset.1,
			z: focus_z + spec.depth,
			base_size: spec.size,
			base_alpha: spec.alpha,
			fill: spec.fill,
			drift: spec.drift,
			z_jitter: spec.z_jitter,
			lock_blur: spec.lock_blur,
			rx: (rng.f64() * 2.0 - 1.0) * PI,
			ry: (rng.f64() * 2.0 - 1.0) * PI,
			r_speed: rng.f64() * 0.002 - 0.001,
		}
	}
}

/// Where and how a letter lands on screen this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
	pub screen_x: f64,
	pub screen_y: f64,
	pub scale: f64,
	pub size: f64,
	pub blur: f64,
	pub alpha: f64,
}
