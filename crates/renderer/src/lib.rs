//! Rendering system using wgpu for the VinaSpace-1 cockpit.

pub mod camera;
pub mod mesh;
pub mod overlay;
pub mod pipeline;
pub mod renderer;
pub mod vertex;

pub use camera::*;
pub use mesh::*;
pub use overlay::*;
pub use pipeline::*;
pub use renderer::*;
pub use vertex::*;
