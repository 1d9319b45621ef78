pub mod surface;
pub mod webgl;
pub mod shaders;
pub mod pipeline;

pub use surface::{MeshId, RendererSurface};
pub use webgl::WebGLContext;
pub use pipeline::RenderPipeline;
