/// A text label attached to its anchor by a soft spring.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub label: &'static str,
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub anchor_x: f64,
	pub anchor_y: f64,
	/// Font size in CSS pixels.
	pub size: f64,
	pub glow: bool,
	/// Per-node offset into the ambient jitter waves.
	pub phase: f64,
	/// Uniform for now; reserved for weighting forces.
	pub mass: f64,
}

impl Node {
	/// A node at rest on its own anchor.
	pub fn new(label: &'static str, x: f64, y: f64, size: f64, glow: bool, phase: f64) -> Self {
		Self {
			label,
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			anchor_x: x,
			anchor_y: y,
			size,
			glow,
			phase,
			mass: 1.0,
		}
	}

	pub fn distance_to_anchor(&self) -> f64 {
		(self.x - self.anchor_x).hypot(self.y - self.anchor_y)
	}

	pub fn speed(&self) -> f64 {
		self.vx.hypot(self.vy)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeStroke {
	Thick,
	Thin,
}

impl EdgeStroke {
	pub fn alpha(self) -> f64 {
		match self {
			EdgeStroke::Thick => 0.35,
			EdgeStroke::Thin => 0.18,
		}
	}

	pub fn width(self) -> f64 {
		match self {
			EdgeStroke::Thick => 1.6,
			EdgeStroke::Thin => 1.0,
		}
	}
}

/// Undirected line between two nodes, by index into the node list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
	pub a: usize,
	pub b: usize,
	pub stroke: EdgeStroke,
}

/// A hub placed at a fixed fraction of the viewport away from its center.
#[derive(Clone, Copy, Debug)]
pub struct HubSpec {
	pub label: &'static str,
	pub offset: (f64, f64),
	pub size: f64,
	pub glow: bool,
}

/// A ring of satellites around `hub` (an index into [`HUBS`]).
#[derive(Clone, Copy, Debug)]
pub struct RingSpec {
	pub hub: usize,
	pub count: usize,
	pub radius: f64,
	pub jitter: f64,
	pub label: &'static str,
	pub size: f64,
}

/// Index of the center hub in [`HUBS`].
pub const CENTER: usize = 0;

pub const HUBS: [HubSpec; 4] = [
	HubSpec {
		label: "UX/UI",
		offset: (0.0, 0.0),
		size: 80.0,
		glow: true,
	},
	HubSpec {
		label: "Design",
		offset: (-0.22, -0.18),
		size: 64.0,
		glow: false,
	},
	HubSpec {
		label: "Contents",
		offset: (0.16, -0.06),
		size: 64.0,
		glow: false,
	},
	HubSpec {
		label: "Technology",
		offset: (0.06, 0.22),
		size: 64.0,
		glow: false,
	},
];

pub const RINGS: [RingSpec; 3] = [
	RingSpec {
		hub: 1,
		count: 7,
		radius: 130.0,
		jitter: 40.0,
		label: "Interface",
		size: 18.0,
	},
	RingSpec {
		hub: 2,
		count: 8,
		radius: 160.0,
		jitter: 50.0,
		label: "Interface",
		size: 18.0,
	},
	RingSpec {
		hub: 3,
		count: 6,
		radius: 140.0,
		jitter: 40.0,
		label: "Interface",
		size: 18.0,
	},
];
