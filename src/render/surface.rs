use crate::error::Result;
use crate::math::Vec3;
use crate::mesh::Placement;

/// Index of a card on the surface; matches the carousel's item order
pub type MeshId = usize;

/// Drawing backend the carousel positions its cards on.
///
/// The motion core only calls through this trait, so it runs the same
/// against WebGL or a test double.
pub trait RendererSurface {
    /// Live viewpoint the cards turn to face
    fn camera_position(&self) -> Vec3;

    fn place_mesh(&mut self, mesh: MeshId, placement: &Placement);

    /// Draw the current scene state
    fn render(&mut self);

    /// Viewport changed size (CSS pixels and device pixel ratio)
    fn resize(&mut self, width: u32, height: u32, pixel_ratio: f32) -> Result<()>;
}
