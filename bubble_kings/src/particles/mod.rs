pub mod actions;
pub mod manager;
pub mod render;
pub mod types;

pub use actions::{animate_splat, splat};
pub use manager::ParticleSplat;
pub use render::render_splat;
pub use types::*;
