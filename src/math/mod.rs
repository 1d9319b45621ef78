pub mod vec3;
pub mod matrix;
pub mod bezier;
pub mod circular;

pub use vec3::Vec3;
pub use matrix::Mat4;
pub use bezier::{CubicBezier, evaluate_cubic_bezier};
pub use circular::{wrap_unit, circular_diff};
