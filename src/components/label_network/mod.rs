mod component;
mod render;
pub mod state;
pub mod types;

pub use component::LabelNetworkCanvas;
pub use state::{NetworkParams, NetworkState};
pub use types::{Edge, EdgeStroke, HUBS, Node, RINGS};
