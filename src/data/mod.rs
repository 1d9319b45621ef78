pub mod config;
pub mod profile;
pub mod track;

pub use config::{CarouselConfig, CameraConfig, ImageSet};
pub use profile::{DeviceProfile, RailSet, ViewportInfo};
pub use track::{Rail, TrackItem, build_track_items};
