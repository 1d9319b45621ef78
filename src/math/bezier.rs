use serde::{Serialize, Deserialize};
use super::Vec3;

/// Cubic Bezier rail defined by four control points.
///
/// Control points are fixed at construction; the rail is only ever sampled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    points: [Vec3; 4],
}

impl CubicBezier {
    pub const fn new(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        Self { points: [p0, p1, p2, p3] }
    }

    /// Point on the curve at parameter t.
    ///
    /// `t` is expected in [0, 1]; wrapping is the caller's job.
    pub fn point_at(&self, t: f32) -> Vec3 {
        let [p0, p1, p2, p3] = self.points;
        evaluate_cubic_bezier(p0, p1, p2, p3, t)
    }

    /// Same curve reflected across the YZ plane
    pub fn mirrored_x(&self) -> Self {
        let [p0, p1, p2, p3] = self.points;
        Self::new(p0.mirror_x(), p1.mirror_x(), p2.mirror_x(), p3.mirror_x())
    }
}

/// B(t) = (1-t)^3 P0 + 3(1-t)^2 t P1 + 3(1-t) t^2 P2 + t^3 P3
pub fn evaluate_cubic_bezier(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let u = 1.0 - t;
    let b0 = u * u * u;
    let b1 = 3.0 * u * u * t;
    let b2 = 3.0 * u * t * t;
    let b3 = t * t * t;

    p0.scale(b0) + p1.scale(b1) + p2.scale(b2) + p3.scale(b3)
}
