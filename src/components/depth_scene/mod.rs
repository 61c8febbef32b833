mod component;
mod render;
pub mod state;
pub mod types;

pub use component::DepthSceneCanvas;
pub use state::{DepthScene, SceneParams};
pub use types::{LETTERS, Letter, LetterSpec, Projection};
