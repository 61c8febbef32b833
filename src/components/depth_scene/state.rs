use super::types::{LETTERS, Letter, LetterSpec, Projection};
use crate::components::viewport::Viewport;

/// Camera and motion constants for the depth scene.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneParams {
	/// Focal length of the single-point perspective.
	pub fov: f64,
	/// Depth rendered without blur.
	pub focus_z: f64,
	pub max_blur: f64,
	/// Depth units travelled toward the viewer per frame.
	pub speed: f64,
	/// Letters closer than this are sent back behind the focal plane.
	pub recycle_z: f64,
	pub respawn_near: f64,
	pub respawn_span: f64,
	pub sway_x_rate: f64,
	pub sway_y_rate: f64,
	pub sway_y_ratio: f64,
}

impl Default for SceneParams {
	fn default() -> Self {
		Self {
			fov: 600.0,
			focus_z: 900.0,
			max_blur: 18.0,
			speed: 0.7,
			recycle_z: -80.0,
			respawn_near: 500.0,
			respawn_span: 600.0,
			sway_x_rate: 0.005,
			sway_y_rate: 0.006,
			sway_y_ratio: 0.6,
		}
	}
}

/// `fov / (fov + z)`; grows as the letter approaches.
pub fn perspective_scale(z: f64, params: &SceneParams) -> f64 {
	params.fov / (params.fov + z).max(f64::EPSILON)
}

/// Blur radius from distance to the focal plane, capped at `max_blur`.
/// A `lock` replaces the depth blur outright; it is only kept non-negative.
pub fn depth_blur(z: f64, lock: Option<f64>, params: &SceneParams) -> f64 {
	let blur = match lock {
		Some(blur) => blur,
		None => ((z - params.focus_z).abs() / params.focus_z * params.max_blur).min(params.max_blur),
	};
	if blur.is_finite() { blur.max(0.0) } else { 0.0 }
}

/// Far letters fade toward 55% of their base opacity, never out entirely.
pub fn depth_alpha(base_alpha: f64, scale: f64) -> f64 {
	let alpha = base_alpha * (0.55 + 0.45 * scale);
	if alpha.is_finite() { alpha.clamp(0.0, 1.0) } else { 0.0 }
}

pub fn project(letter: &Letter, viewport: &Viewport, params: &SceneParams) -> Projection {
	let scale = perspective_scale(letter.z, params);
	let (cx, cy) = viewport.center();
	Projection {
		screen_x: cx + letter.x * scale,
		screen_y: cy + letter.y * scale,
		scale,
		size: letter.base_size * scale,
		blur: depth_blur(letter.z, letter.lock_blur, params),
		alpha: depth_alpha(letter.base_alpha, scale),
	}
}

/// A fresh far depth in `[focus + near + jitter, focus + near + span + jitter)`.
pub fn respawn_depth(z_jitter: f64, params: &SceneParams, rng: &mut fastrand::Rng) -> f64 {
	params.focus_z + params.respawn_near + rng.f64() * params.respawn_span + z_jitter
}

/// Dolly forward, sway, and recycle once past the near floor.
pub fn step_letter(letter: &mut Letter, params: &SceneParams, rng: &mut fastrand::Rng) {
	letter.z -= params.speed;
	letter.rx += params.sway_x_rate;
	letter.ry += params.sway_y_rate;
	letter.x += letter.rx.sin() * letter.drift;
	letter.y += letter.ry.cos() * letter.drift * params.sway_y_ratio;
	if letter.z < params.recycle_z {
		letter.z = respawn_depth(letter.z_jitter, params, rng);
	}
}

pub fn build_letters(
	specs: &[LetterSpec],
	viewport: &Viewport,
	params: &SceneParams,
	rng: &mut fastrand::Rng,
) -> Vec<Letter> {
	specs
		.iter()
		.map(|spec| Letter::from_spec(spec, viewport, params.focus_z, rng))
		.collect()
}

/// Oversized glyphs approaching the viewer through a shallow depth of field.
#[derive(Clone, Debug)]
pub struct DepthScene {
	pub letters: Vec<Letter>,
	pub viewport: Viewport,
	pub params: SceneParams,
	rng: fastrand::Rng,
}

impl DepthScene {
	pub fn new(viewport: Viewport, rng: fastrand::Rng) -> Self {
		Self::with_params(viewport, SceneParams::default(), rng)
	}

	pub fn with_params(viewport: Viewport, params: SceneParams, mut rng: fastrand::Rng) -> Self {
		let letters = build_letters(&LETTERS, &viewport, &params, &mut rng);
		Self {
			letters,
			viewport,
			params,
			rng,
		}
	}

	/// Discard every letter and re-seed from [`LETTERS`] at the current size.
	pub fn reset(&mut self) {
		self.letters = build_letters(&LETTERS, &self.viewport, &self.params, &mut self.rng);
	}

	pub fn resize(&mut self, viewport: Viewport) {
		self.viewport = viewport;
		self.reset();
	}

	/// Order back-to-front, then step each letter in that order.
	pub fn advance(&mut self) {
		self.letters.sort_by(|a, b| b.z.total_cmp(&a.z));
		for letter in &mut self.letters {
			step_letter(letter, &self.params, &mut self.rng);
		}
	}

	pub fn projections(&self) -> impl Iterator<Item = (&Letter, Projection)> + '_ {
		self.letters
			.iter()
			.map(|letter| (letter, project(letter, &self.viewport, &self.params)))
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use proptest::prelude::*;

	use super::*;

	fn params() -> SceneParams {
		SceneParams::default()
	}

	fn letter_at(z: f64) -> Letter {
		let mut letter = Letter::from_spec(
			&LETTERS[0],
			&Viewport::new(800.0, 600.0, 1.0),
			params().focus_z,
			&mut fastrand::Rng::with_seed(1),
		);
		letter.z = z;
		letter
	}

	#[test]
	fn blur_zero_at_focus_and_capped_far_away() {
		let p = params();
		let focused = project(&letter_at(p.focus_z), &Viewport::new(800.0, 600.0, 1.0), &p);
		assert!(focused.blur.abs() < 1e-12);
		let far = depth_blur(p.focus_z + 2.0 * p.focus_z, None, &p);
		assert!((far - p.max_blur).abs() < 1e-12);
		assert_eq!(depth_blur(p.focus_z / 2.0, None, &p), 9.0);
	}

	#[test]
	fn blur_lock_overrides_depth() {
		let p = params();
		assert_eq!(depth_blur(p.focus_z, Some(4.5), &p), 4.5);
		assert_eq!(depth_blur(p.focus_z, Some(25.0), &p), 25.0);
		assert_eq!(depth_blur(p.focus_z * 3.0, Some(p.max_blur + 12.0), &p), p.max_blur + 12.0);
		assert_eq!(depth_blur(0.0, Some(f64::INFINITY), &p), 0.0);
		assert_eq!(depth_blur(5000.0, Some(0.0), &p), 0.0);
		assert_eq!(depth_blur(0.0, Some(-3.0), &p), 0.0);
		assert_eq!(depth_blur(0.0, Some(f64::NAN), &p), 0.0);
	}

	#[test]
	fn alpha_fades_toward_floor() {
		assert!((depth_alpha(1.0, 0.0) - 0.55).abs() < 1e-12);
		assert_eq!(depth_alpha(1.0, 1.0), 1.0);
		assert_eq!(depth_alpha(1.0, 8.0), 1.0);
		assert_eq!(depth_alpha(-1.0, 1.0), 0.0);
		assert_eq!(depth_alpha(1.0, f64::NAN), 0.0);
	}

	#[test]
	fn projection_centers_on_viewport() {
		let p = params();
		let mut letter = letter_at(0.0);
		letter.x = 100.0;
		letter.y = -50.0;
		let proj = project(&letter, &Viewport::new(800.0, 600.0, 1.0), &p);
		assert_eq!(proj.scale, 1.0);
		assert_eq!((proj.screen_x, proj.screen_y), (500.0, 250.0));
		assert_eq!(proj.size, letter.base_size);
	}

	#[test]
	fn advance_sorts_far_to_near() {
		let mut scene = DepthScene::new(Viewport::new(800.0, 600.0, 1.0), fastrand::Rng::with_seed(3));
		scene.advance();
		assert!(scene.letters.windows(2).all(|w| w[0].z >= w[1].z));
		let order: String = scene.letters.iter().map(|l| l.glyph).collect();
		assert_eq!(order, "OKAD");
	}

	#[test]
	fn letters_recycle_behind_focal_plane() {
		let p = params();
		let mut letter = letter_at(p.recycle_z + 0.5);
		let mut rng = fastrand::Rng::with_seed(9);
		step_letter(&mut letter, &p, &mut rng);
		assert!(letter.z >= p.focus_z + p.respawn_near);
		assert!(letter.z < p.focus_z + p.respawn_near + p.respawn_span + letter.z_jitter);
	}

	#[test]
	fn long_run_keeps_depth_above_floor() {
		let mut scene = DepthScene::new(Viewport::new(800.0, 600.0, 1.0), fastrand::Rng::with_seed(11));
		// Long enough for every letter to pass the viewer at least once.
		for _ in 0..4000 {
			scene.advance();
			assert!(scene.letters.iter().all(|l| l.z >= scene.params.recycle_z));
		}
		for (_, proj) in scene.projections() {
			assert!(proj.screen_x.is_finite() && proj.screen_y.is_finite());
			assert!((0.0..=scene.params.max_blur).contains(&proj.blur));
			assert!((0.0..=1.0).contains(&proj.alpha));
		}
	}

	#[test]
	fn resize_regenerates_from_specs() {
		let mut scene = DepthScene::new(Viewport::new(800.0, 600.0, 1.0), fastrand::Rng::with_seed(5));
		for _ in 0..50 {
			scene.advance();
		}
		scene.resize(Viewport::new(1600.0, 1200.0, 1.0));

		let fresh = |l: &Letter| (l.glyph, l.x, l.y, l.z, l.base_size, l.fill);
		let got: Vec<_> = scene.letters.iter().map(fresh).collect();
		let expected: Vec<_> = LETTERS
			.iter()
			.map(|s| (s.glyph, 1600.0 * s.offset.0, 1200.0 * s.offset.1, 900.0 + s.depth, s.size, s.fill))
			.collect();
		assert_eq!(got, expected);
	}

	#[test]
	fn reset_discards_progress() {
		let vp = Viewport::new(800.0, 600.0, 1.0);
		let mut scene = DepthScene::new(vp, fastrand::Rng::with_seed(5));
		for _ in 0..10 {
			scene.advance();
		}
		scene.reset();
		let depths: Vec<f64> = scene.letters.iter().map(|l| l.z).collect();
		assert_eq!(depths, vec![960.0, 1700.0, 450.0, 940.0]);
		assert_eq!(scene.viewport, vp);
	}

	proptest! {
		#[test]
		fn scale_strictly_decreasing_in_depth(z in -590.0f64..5000.0, dz in 0.01f64..1000.0) {
			let p = params();
			prop_assert!(perspective_scale(z + dz, &p) < perspective_scale(z, &p));
		}

		#[test]
		fn step_never_leaves_letter_below_floor(
			z in -81.0f64..3000.0,
			seed in any::<u64>(),
		) {
			let p = params();
			let mut letter = letter_at(z);
			let mut rng = fastrand::Rng::with_seed(seed);
			step_letter(&mut letter, &p, &mut rng);
			prop_assert!(letter.z >= p.recycle_z);
			if z - p.speed < p.recycle_z {
				prop_assert!(letter.z >= p.focus_z + p.respawn_near);
				prop_assert!(letter.z < p.focus_z + 1100.0 + letter.z_jitter);
			}
		}
	}
}
