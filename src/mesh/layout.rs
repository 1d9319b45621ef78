use crate::data::{RailSet, TrackItem};
use crate::math::{wrap_unit, Mat4, Vec3};

/// Where one card sits and which way it faces
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vec3,
    /// Unit vector from the card toward the viewpoint
    pub facing: Vec3,
    pub model: Mat4,
}

/// Places cards on their rails for a given carousel position.
///
/// Borrows the rails; the camera position is passed in fresh for every pass.
#[derive(Debug, Clone, Copy)]
pub struct LayoutProjector<'a> {
    rails: &'a RailSet,
    camera: Vec3,
}

impl<'a> LayoutProjector<'a> {
    pub fn new(rails: &'a RailSet, camera: Vec3) -> Self {
        Self { rails, camera }
    }

    /// Curve parameter of an item when the carousel is at `t`
    pub fn curve_parameter(t: f64, item: &TrackItem) -> f64 {
        wrap_unit(t + item.phase_offset)
    }

    pub fn project(&self, item: &TrackItem, t: f64) -> Placement {
        // geometry stays f32
        let u = Self::curve_parameter(t, item) as f32;
        let position = self.rails.rail(item.rail).point_at(u);
        let model = Mat4::billboard(position, self.camera, Vec3::UP);
        Placement {
            position,
            facing: model.forward_axis(),
            model,
        }
    }

    /// Placements for every item, indexed like `items`
    pub fn project_all<'i>(&'i self, items: &'i [TrackItem], t: f64) -> impl Iterator<Item = Placement> + 'i {
        items.iter().map(move |item| self.project(item, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{build_track_items, DeviceProfile, Rail};

    fn camera() -> Vec3 {
        Vec3::new(0.0, 0.0, 2.0)
    }

    #[test]
    fn test_slot_two_sits_at_curve_midpoint() {
        let rails = RailSet::for_profile(DeviceProfile::Desktop);
        let items = build_track_items(4);
        let projector = LayoutProjector::new(&rails, camera());

        let item = items[2];
        assert_eq!(item.slot, 2);
        assert_eq!(LayoutProjector::curve_parameter(0.0, &item), 0.5);

        let placement = projector.project(&item, 0.0);
        assert_eq!(placement.position, rails.rail(Rail::Left).point_at(0.5));
    }

    #[test]
    fn test_parameter_wraps_past_end() {
        let items = build_track_items(4);
        let last = items[3];
        let param = LayoutProjector::curve_parameter(0.5, &last);
        assert!((param - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_cards_face_camera() {
        let rails = RailSet::for_profile(DeviceProfile::Desktop);
        let items = build_track_items(4);
        let projector = LayoutProjector::new(&rails, camera());

        for placement in projector.project_all(&items, 0.37) {
            let to_camera = (camera() - placement.position).normalize();
            assert!(placement.facing.distance(&to_camera) < 0.0001);
            assert!((placement.facing.length() - 1.0).abs() < 0.0001);
        }
    }

    #[test]
    fn test_rails_are_mirrored() {
        let rails = RailSet::for_profile(DeviceProfile::Desktop);
        let items = build_track_items(4);
        let projector = LayoutProjector::new(&rails, camera());
        let placements: Vec<Placement> = projector.project_all(&items, 0.1).collect();

        assert_eq!(placements.len(), 8);
        for slot in 0..4 {
            let left = placements[slot].position;
            let right = placements[slot + 4].position;
            assert!((left.x + right.x).abs() < 0.0001);
            assert!((left.z - right.z).abs() < 0.0001);
        }
    }

    #[test]
    fn test_orientation_follows_live_camera() {
        let rails = RailSet::for_profile(DeviceProfile::Desktop);
        let item = build_track_items(4)[0];

        let a = LayoutProjector::new(&rails, camera()).project(&item, 0.2);
        let b = LayoutProjector::new(&rails, Vec3::new(3.0, 1.0, 2.0)).project(&item, 0.2);
        assert_eq!(a.position, b.position);
        assert!(a.facing.distance(&b.facing) > 0.01);
    }
}
