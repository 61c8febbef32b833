use std::f64::consts::TAU;

use super::types::{CENTER, Edge, EdgeStroke, HUBS, HubSpec, Node, RINGS, RingSpec};
use crate::components::viewport::Viewport;

/// Simulated seconds per frame on the jitter clock.
pub const TICK_SECONDS: f64 = 0.016;

/// Half-width of the angular scatter applied to each ring slot, in radians.
pub const RING_ANGLE_JITTER: f64 = 0.4;

/// Force constants for the per-frame node step.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkParams {
	pub spring_k: f64,
	pub jitter_scale: f64,
	pub jitter_freqs: (f64, f64),
	pub jitter_amplitudes: (f64, f64),
	pub secondary_phase_ratio: f64,
	pub repel_radius: f64,
	pub repel_strength: f64,
	pub repel_scale: f64,
	pub damping: f64,
}

impl Default for NetworkParams {
	fn default() -> Self {
		Self {
			spring_k: 0.02,
			jitter_scale: 0.15,
			jitter_freqs: (0.6, 0.27),
			jitter_amplitudes: (0.8, 0.6),
			secondary_phase_ratio: 0.7,
			repel_radius: 180.0,
			repel_strength: 16000.0,
			repel_scale: 0.0015,
			damping: 0.92,
		}
	}
}

/// Pull toward the anchor.
pub fn spring_impulse(node: &Node, params: &NetworkParams) -> (f64, f64) {
	(
		(node.anchor_x - node.x) * params.spring_k,
		(node.anchor_y - node.y) * params.spring_k,
	)
}

/// Two superposed waves offset by the node's phase; deterministic in `t`.
pub fn jitter_impulse(t: f64, phase: f64, params: &NetworkParams) -> (f64, f64) {
	let (w1, w2) = params.jitter_freqs;
	let (a1, a2) = params.jitter_amplitudes;
	let p2 = phase * params.secondary_phase_ratio;
	let jx = (t * w1 + phase).sin() * a1 + (t * w2 + p2).sin() * a2;
	let jy = (t * w1 + phase).cos() * a1 + (t * w2 + p2).cos() * a2;
	(jx * params.jitter_scale, jy * params.jitter_scale)
}

/// Push away from the pointer, only for squared distances in `(1, radius²)`.
pub fn repulsion_impulse(x: f64, y: f64, pointer: Option<(f64, f64)>, params: &NetworkParams) -> (f64, f64) {
	let Some((mx, my)) = pointer else {
		return (0.0, 0.0);
	};
	let (dx, dy) = (x - mx, y - my);
	let d2 = dx * dx + dy * dy;
	if d2 >= params.repel_radius * params.repel_radius || d2 <= 1.0 {
		return (0.0, 0.0);
	}
	let f = params.repel_strength / d2;
	(dx * f * params.repel_scale, dy * f * params.repel_scale)
}

/// One explicit-Euler frame: spring, jitter, repulsion, damping, integrate.
pub fn step_node(node: &mut Node, t: f64, pointer: Option<(f64, f64)>, params: &NetworkParams) {
	let (sx, sy) = spring_impulse(node, params);
	let (jx, jy) = jitter_impulse(t, node.phase, params);
	let (rx, ry) = repulsion_impulse(node.x, node.y, pointer, params);
	node.vx = (node.vx + sx + jx + rx) * params.damping;
	node.vy = (node.vy + sy + jy + ry) * params.damping;
	node.x += node.vx;
	node.y += node.vy;
}

pub fn hub_anchor(spec: &HubSpec, viewport: &Viewport) -> (f64, f64) {
	let (cx, cy) = viewport.center();
	(cx + viewport.width * spec.offset.0, cy + viewport.height * spec.offset.1)
}

/// Satellites on a jittered ring around `center`. Angles are evenly spaced
/// with ±[`RING_ANGLE_JITTER`] scatter; radii spread ±`jitter/2`.
pub fn ring_around(center: (f64, f64), spec: &RingSpec, rng: &mut fastrand::Rng) -> Vec<Node> {
	(0..spec.count)
		.map(|i| {
			let angle = (i as f64 / spec.count as f64) * TAU + (rng.f64() * 2.0 - 1.0) * RING_ANGLE_JITTER;
			let radius = spec.radius + (rng.f64() - 0.5) * spec.jitter;
			Node::new(
				spec.label,
				center.0 + angle.cos() * radius,
				center.1 + angle.sin() * radius,
				spec.size,
				false,
				rng.f64() * 1000.0,
			)
		})
		.collect()
}

/// The whole label network: nodes, edges and the inputs feeding each frame.
#[derive(Clone, Debug)]
pub struct NetworkState {
	pub nodes: Vec<Node>,
	pub edges: Vec<Edge>,
	pub viewport: Viewport,
	pub pointer: Option<(f64, f64)>,
	pub params: NetworkParams,
	pub clock: f64,
}

impl NetworkState {
	pub fn new(viewport: Viewport, rng: &mut fastrand::Rng) -> Self {
		Self::with_params(viewport, NetworkParams::default(), rng)
	}

	/// Lay out hubs first (in [`HUBS`] order), then each ring's satellites.
	pub fn with_params(viewport: Viewport, params: NetworkParams, rng: &mut fastrand::Rng) -> Self {
		let mut nodes: Vec<Node> = HUBS
			.iter()
			.map(|spec| {
				let (x, y) = hub_anchor(spec, &viewport);
				Node::new(spec.label, x, y, spec.size, spec.glow, rng.f64() * 1000.0)
			})
			.collect();
		let mut edges: Vec<Edge> = (0..HUBS.len())
			.filter(|&hub| hub != CENTER)
			.map(|hub| Edge {
				a: CENTER,
				b: hub,
				stroke: EdgeStroke::Thick,
			})
			.collect();

		for ring in &RINGS {
			let hub = &nodes[ring.hub];
			let satellites = ring_around((hub.anchor_x, hub.anchor_y), ring, rng);
			let first = nodes.len();
			edges.extend((first..first + satellites.len()).map(|b| Edge {
				a: ring.hub,
				b,
				stroke: EdgeStroke::Thin,
			}));
			nodes.extend(satellites);
		}

		let categories: Vec<usize> = RINGS.iter().map(|r| r.hub).collect();
		for (i, &a) in categories.iter().enumerate() {
			edges.push(Edge {
				a,
				b: categories[(i + 1) % categories.len()],
				stroke: EdgeStroke::Thin,
			});
		}

		Self {
			nodes,
			edges,
			viewport,
			pointer: None,
			params,
			clock: 0.0,
		}
	}

	/// Re-derive hub anchors from the current viewport. Satellite anchors
	/// stay where they were placed at creation.
	pub fn sync_hub_anchors(&mut self) {
		for (node, spec) in self.nodes.iter_mut().zip(HUBS.iter()) {
			(node.anchor_x, node.anchor_y) = hub_anchor(spec, &self.viewport);
		}
	}

	/// Record the pointer. Readings outside the viewport count as absent.
	pub fn set_pointer(&mut self, x: f64, y: f64) {
		self.pointer = self.viewport.contains(x, y).then_some((x, y));
	}

	pub fn clear_pointer(&mut self) {
		self.pointer = None;
	}

	pub fn resize(&mut self, viewport: Viewport) {
		self.viewport = viewport;
		if let Some((x, y)) = self.pointer {
			self.set_pointer(x, y);
		}
	}

	pub fn advance(&mut self) {
		self.clock += TICK_SECONDS;
		self.sync_hub_anchors();
		let (t, pointer) = (self.clock, self.pointer);
		for node in &mut self.nodes {
			step_node(node, t, pointer, &self.params);
		}
	}

	pub fn hubs(&self) -> &[Node] {
		&self.nodes[..HUBS.len()]
	}

	pub fn satellites(&self) -> &[Node] {
		&self.nodes[HUBS.len()..]
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	fn viewport() -> Viewport {
		Viewport::new(1000.0, 800.0, 1.0)
	}

	fn network() -> NetworkState {
		NetworkState::new(viewport(), &mut fastrand::Rng::with_seed(7))
	}

	#[test]
	fn layout_has_hubs_rings_and_edges() {
		let state = network();
		assert_eq!(state.hubs().len(), 4);
		assert_eq!(state.satellites().len(), 7 + 8 + 6);
		// 3 thick spokes, 21 satellite edges, 3 triangle edges
		assert_eq!(state.edges.len(), 3 + 21 + 3);
		let thick = state.edges.iter().filter(|e| e.stroke == EdgeStroke::Thick).count();
		assert_eq!(thick, 3);
		assert!(state.edges.iter().all(|e| e.a < state.nodes.len() && e.b < state.nodes.len()));

		let center = &state.nodes[CENTER];
		assert!(center.glow);
		assert_eq!((center.anchor_x, center.anchor_y), (500.0, 400.0));
		assert_eq!((state.nodes[1].anchor_x, state.nodes[1].anchor_y), (500.0 - 220.0, 400.0 - 144.0));
		assert!(state.nodes[1..].iter().all(|n| !n.glow));
	}

	#[test]
	fn triangle_links_category_hubs() {
		let state = network();
		let tri: Vec<(usize, usize)> = state.edges[state.edges.len() - 3..].iter().map(|e| (e.a, e.b)).collect();
		assert_eq!(tri, vec![(1, 2), (2, 3), (3, 1)]);
	}

	#[test]
	fn hub_anchors_follow_resize_but_satellites_do_not() {
		let mut state = network();
		let satellites_before: Vec<(f64, f64)> =
			state.satellites().iter().map(|n| (n.anchor_x, n.anchor_y)).collect();
		state.resize(Viewport::new(2000.0, 1000.0, 1.0));
		state.advance();
		assert_eq!((state.nodes[CENTER].anchor_x, state.nodes[CENTER].anchor_y), (1000.0, 500.0));
		assert_eq!((state.nodes[3].anchor_x, state.nodes[3].anchor_y), (1000.0 + 120.0, 500.0 + 220.0));
		let satellites_after: Vec<(f64, f64)> =
			state.satellites().iter().map(|n| (n.anchor_x, n.anchor_y)).collect();
		assert_eq!(satellites_before, satellites_after);
	}

	#[test]
	fn pointer_outside_viewport_is_absent() {
		let mut state = network();
		state.set_pointer(10.0, 10.0);
		assert_eq!(state.pointer, Some((10.0, 10.0)));
		state.set_pointer(-3.0, 10.0);
		assert_eq!(state.pointer, None);
		state.set_pointer(f64::NAN, 1.0);
		assert_eq!(state.pointer, None);
		state.set_pointer(900.0, 700.0);
		state.resize(Viewport::new(500.0, 500.0, 1.0));
		assert_eq!(state.pointer, None);
		state.clear_pointer();
		state.clear_pointer();
		assert_eq!(state.pointer, None);
	}

	#[test]
	fn spring_and_damping_settle_without_jitter() {
		let params = NetworkParams {
			jitter_scale: 0.0,
			..NetworkParams::default()
		};
		let mut node = Node::new("n", 0.0, 0.0, 10.0, false, 0.0);
		node.x = 60.0;
		node.y = -45.0;
		let initial = node.distance_to_anchor();

		// One oscillation is ~48 frames; the peak of each window must not grow.
		let mut peaks = Vec::new();
		for _ in 0..8 {
			let mut peak: f64 = 0.0;
			for _ in 0..48 {
				step_node(&mut node, 0.0, None, &params);
				peak = peak.max(node.distance_to_anchor());
			}
			peaks.push(peak);
		}
		assert!(peaks.windows(2).all(|w| w[1] <= w[0] + 1e-9), "{peaks:?}");
		assert!(node.distance_to_anchor() < initial * 1e-4);
	}

	#[test]
	fn scenario_steady_orbit_stays_near_anchor() {
		let mut state = network();
		for _ in 0..300 {
			state.advance();
		}
		for node in state.satellites() {
			assert!(node.distance_to_anchor() < 40.0, "{node:?}");
			assert!(node.x.is_finite() && node.y.is_finite());
		}
	}

	#[test]
	fn scenario_pointer_on_center_repels() {
		let mut state = network();
		for _ in 0..120 {
			state.advance();
		}
		let mut control = state.clone();
		let center = &state.nodes[CENTER];
		let pointer = (center.anchor_x, center.anchor_y);
		let (dx, dy) = (center.x - pointer.0, center.y - pointer.1);
		assert!(dx * dx + dy * dy > 1.0);

		state.set_pointer(pointer.0, pointer.1);
		state.advance();
		control.advance();

		let pushed = &state.nodes[CENTER];
		let free = &control.nodes[CENTER];
		let (dvx, dvy) = (pushed.vx - free.vx, pushed.vy - free.vy);
		assert!(dvx * dx + dvy * dy > 0.0);
	}

	#[test]
	fn jitter_is_deterministic_in_time() {
		let params = NetworkParams::default();
		assert_eq!(jitter_impulse(1.25, 42.0, &params), jitter_impulse(1.25, 42.0, &params));
		let (jx, jy) = jitter_impulse(0.0, 0.0, &params);
		assert!((jx - 0.0).abs() < 1e-12);
		assert!((jy - (0.8 + 0.6) * 0.15).abs() < 1e-12);
	}

	#[test]
	fn repulsion_band_edges_are_excluded() {
		let params = NetworkParams::default();
		let pointer = Some((100.0, 100.0));
		// Exactly one unit away: d² = 1.
		assert_eq!(repulsion_impulse(101.0, 100.0, pointer, &params), (0.0, 0.0));
		assert_eq!(repulsion_impulse(100.0, 99.0, pointer, &params), (0.0, 0.0));
		// Exactly on the radius: d² = 180².
		assert_eq!(repulsion_impulse(280.0, 100.0, pointer, &params), (0.0, 0.0));
		assert_eq!(repulsion_impulse(100.0, -80.0, pointer, &params), (0.0, 0.0));
		assert_eq!(repulsion_impulse(100.0, 100.0, pointer, &params), (0.0, 0.0));
		// Just inside either edge still pushes.
		assert!(repulsion_impulse(101.5, 100.0, pointer, &params).0 > 0.0);
		assert!(repulsion_impulse(279.5, 100.0, pointer, &params).0 > 0.0);
	}

	proptest! {
		#[test]
		fn damping_never_increases_speed(
			x in -300.0f64..300.0,
			y in -300.0f64..300.0,
			vx in -50.0f64..50.0,
			vy in -50.0f64..50.0,
			t in 0.0f64..100.0,
			pointer in proptest::option::of((-200.0f64..200.0, -200.0f64..200.0)),
		) {
			let params = NetworkParams::default();
			let mut node = Node::new("n", 0.0, 0.0, 10.0, false, 3.0);
			(node.x, node.y, node.vx, node.vy) = (x, y, vx, vy);
			let (sx, sy) = spring_impulse(&node, &params);
			let (jx, jy) = jitter_impulse(t, node.phase, &params);
			let (rx, ry) = repulsion_impulse(x, y, pointer, &params);
			let undamped = (vx + sx + jx + rx).hypot(vy + sy + jy + ry);
			step_node(&mut node, t, pointer, &params);
			prop_assert!(node.speed() <= undamped);
		}

		#[test]
		fn ring_radii_stay_in_band(seed in any::<u64>(), ring in 0usize..3) {
			let spec = &RINGS[ring];
			let center = (321.0, -17.5);
			let nodes = ring_around(center, spec, &mut fastrand::Rng::with_seed(seed));
			prop_assert_eq!(nodes.len(), spec.count);
			for node in &nodes {
				let r = (node.anchor_x - center.0).hypot(node.anchor_y - center.1);
				prop_assert!(r >= spec.radius - spec.jitter / 2.0 - 1e-9);
				prop_assert!(r <= spec.radius + spec.jitter / 2.0 + 1e-9);
				prop_assert_eq!((node.x, node.y), (node.anchor_x, node.anchor_y));
			}
		}

		#[test]
		fn repulsion_only_inside_band(
			x in -400.0f64..400.0,
			y in -400.0f64..400.0,
		) {
			let params = NetworkParams::default();
			let d2 = x * x + y * y;
			let (fx, fy) = repulsion_impulse(x, y, Some((0.0, 0.0)), &params);
			if d2 > 1.0 && d2 < 180.0 * 180.0 {
				// Points away from the pointer.
				prop_assert!(fx * x + fy * y > 0.0);
			} else {
				prop_assert_eq!((fx, fy), (0.0, 0.0));
			}
			prop_assert_eq!(repulsion_impulse(x, y, None, &params), (0.0, 0.0));
		}
	}
}
