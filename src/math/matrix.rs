use super::Vec3;

/// 4x4 matrix for transformations (column-major for WebGL)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub data: [f32; 16],
}

impl Mat4 {
    pub fn identity() -> Self {
        Self {
            data: [
                1.0, 0.0, 0.0, 0.0,
                0.0, 1.0, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Model matrix for a flat card at `position` whose local +Z axis points at `target`.
    ///
    /// Falls back to the world axes when the card sits on the target or when
    /// the facing direction is parallel to `up`.
    pub fn billboard(position: Vec3, target: Vec3, up: Vec3) -> Self {
        let mut f = (target - position).normalize();
        if f.length_squared() == 0.0 {
            f = Vec3::FORWARD;
        }
        let mut r = up.cross(&f).normalize();
        if r.length_squared() == 0.0 {
            r = Vec3::RIGHT;
        }
        let u = f.cross(&r);

        Self {
            data: [
                r.x, r.y, r.z, 0.0,
                u.x, u.y, u.z, 0.0,
                f.x, f.y, f.z, 0.0,
                position.x, position.y, position.z, 1.0,
            ],
        }
    }

    /// Perspective projection matrix
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y / 2.0).tan();
        let nf = 1.0 / (near - far);

        Self {
            data: [
                f / aspect, 0.0, 0.0, 0.0,
                0.0, f, 0.0, 0.0,
                0.0, 0.0, (far + near) * nf, -1.0,
                0.0, 0.0, 2.0 * far * near * nf, 0.0,
            ],
        }
    }

    /// Look-at view matrix
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let f = (target - eye).normalize();
        let r = f.cross(&up).normalize();
        let u = r.cross(&f);

        Self {
            data: [
                r.x, u.x, -f.x, 0.0,
                r.y, u.y, -f.y, 0.0,
                r.z, u.z, -f.z, 0.0,
                -r.dot(&eye), -u.dot(&eye), f.dot(&eye), 1.0,
            ],
        }
    }

    /// Local +Z axis after transformation
    pub fn forward_axis(&self) -> Vec3 {
        Vec3::new(self.data[8], self.data[9], self.data[10])
    }

    /// Get as slice for WebGL
    pub fn as_slice(&self) -> &[f32; 16] {
        &self.data
    }
}
