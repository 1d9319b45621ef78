use crate::math::{CubicBezier, Vec3};
use super::config::CarouselConfig;
use super::track::Rail;

/// Device class the rails are laid out for.
///
/// Resolved once at startup and never re-evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceProfile {
    Desktop,
    /// Narrow or touch-first viewport
    Compact,
}

/// What the host knows about the viewport when the session starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportInfo {
    pub width: u32,
    pub height: u32,
    /// Primary pointer is coarse (finger rather than mouse)
    pub coarse_pointer: bool,
}

impl DeviceProfile {
    /// Pick the profile: an explicit override wins, then the viewport check
    pub fn resolve(config: &CarouselConfig, viewport: &ViewportInfo) -> Self {
        let compact = config.is_compact_profile.unwrap_or_else(|| {
            viewport.width <= config.compact_breakpoint_px || viewport.coarse_pointer
        });
        if compact {
            DeviceProfile::Compact
        } else {
            DeviceProfile::Desktop
        }
    }
}

/// The two rails the cards travel along
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RailSet {
    left: CubicBezier,
    right: CubicBezier,
}

impl RailSet {
    pub fn new(left: CubicBezier, right: CubicBezier) -> Self {
        Self { left, right }
    }

    pub fn for_profile(profile: DeviceProfile) -> Self {
        let left = match profile {
            DeviceProfile::Desktop => CubicBezier::new(
                Vec3::new(-1.5, 0.0, -3.0),
                Vec3::new(-0.5, 0.0, -1.0),
                Vec3::new(-0.5, 0.0, 1.0),
                Vec3::new(-3.5, 0.0, 2.0),
            ),
            // Pulled toward the centre line to fit a portrait viewport
            DeviceProfile::Compact => CubicBezier::new(
                Vec3::new(-0.9, 0.0, -3.0),
                Vec3::new(-0.3, 0.0, -1.0),
                Vec3::new(-0.3, 0.0, 1.0),
                Vec3::new(-1.9, 0.0, 2.0),
            ),
        };
        Self::new(left, left.mirrored_x())
    }

    pub fn rail(&self, rail: Rail) -> &CubicBezier {
        match rail {
            Rail::Left => &self.left,
            Rail::Right => &self.right,
        }
    }
}
