use crate::math::Vec3;

/// Card size in world units (16:10 image aspect)
pub const CARD_WIDTH: f32 = 1.6;
pub const CARD_HEIGHT: f32 = 1.0;

/// A vertex with position, normal and UV
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: [f32; 2],
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, u: f32, v: f32) -> Self {
        Self {
            position,
            normal,
            uv: [u, v],
        }
    }

    /// Convert to flat array for WebGL buffer
    /// Layout: position(3) + normal(3) + uv(2) = 8 floats
    pub fn to_array(&self) -> [f32; 8] {
        [
            self.position.x, self.position.y, self.position.z,
            self.normal.x, self.normal.y, self.normal.z,
            self.uv[0], self.uv[1],
        ]
    }
}

/// Indexed triangle mesh
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Flat planar card in the XY plane facing +Z, centred on the origin
    pub fn card(width: f32, height: f32) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        let n = Vec3::FORWARD;

        Self {
            vertices: vec![
                Vertex::new(Vec3::new(-hw, -hh, 0.0), n, 0.0, 0.0),
                Vertex::new(Vec3::new(hw, -hh, 0.0), n, 1.0, 0.0),
                Vertex::new(Vec3::new(hw, hh, 0.0), n, 1.0, 1.0),
                Vertex::new(Vec3::new(-hw, hh, 0.0), n, 0.0, 1.0),
            ],
            // CCW seen from +Z
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }

    /// Get interleaved vertex data for WebGL
    pub fn vertex_data(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.to_array()).collect()
    }

    pub fn index_data(&self) -> &[u32] {
        &self.indices
    }
}
