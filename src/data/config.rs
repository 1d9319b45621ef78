use serde::{Deserialize, Serialize};
use crate::error::{CarouselError, Result};
use crate::math::Vec3;
use super::track::Rail;

/// Session configuration, read from YAML.
///
/// Every field has a default, so an empty document is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Image cards per rail
    pub num_meshes_per_rail: usize,
    /// Fraction of the remaining distance covered per reference frame
    pub damping_factor: f64,
    /// Remaining distance at which the tracking loop halts
    pub sensitivity_threshold: f64,
    /// Path units per wheel pixel
    pub desktop_scroll_speed: f64,
    /// Path units per touch-drag pixel
    pub mobile_scroll_speed: f64,
    /// Forces the compact or desktop rails; detected from the viewport when absent
    pub is_compact_profile: Option<bool>,
    /// Viewport width at or below which the compact rails are used
    pub compact_breakpoint_px: u32,
    /// Skip the render pass while the document is hidden
    pub pause_when_hidden: bool,
    pub camera: CameraConfig,
    pub images: ImageSet,
    /// `log` level name for the console logger
    pub log_level: String,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            num_meshes_per_rail: 4,
            damping_factor: 0.05,
            sensitivity_threshold: 1e-5,
            desktop_scroll_speed: 0.0002,
            mobile_scroll_speed: 0.0006,
            is_compact_profile: None,
            compact_breakpoint_px: 768,
            pause_when_hidden: true,
            camera: CameraConfig::default(),
            images: ImageSet::default(),
            log_level: "info".to_string(),
        }
    }
}

/// Perspective camera the cards face
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 2.0],
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl CameraConfig {
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn fov_radians(&self) -> f32 {
        self.fov_degrees.to_radians()
    }
}

/// Image URLs for each rail; slot i shows `urls[i % len]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSet {
    pub left: Vec<String>,
    pub right: Vec<String>,
}

impl Default for ImageSet {
    fn default() -> Self {
        Self {
            left: (1..=4).map(|i| format!("./{}.webp", i)).collect(),
            right: (5..=8).map(|i| format!("./{}.webp", i)).collect(),
        }
    }
}

impl ImageSet {
    pub fn urls(&self, rail: Rail) -> &[String] {
        match rail {
            Rail::Left => &self.left,
            Rail::Right => &self.right,
        }
    }

    /// URL shown by a slot, cycling through the rail's list
    pub fn url_for(&self, rail: Rail, slot: usize) -> Option<&str> {
        let urls = self.urls(rail);
        if urls.is_empty() {
            None
        } else {
            Some(urls[slot % urls.len()].as_str())
        }
    }
}

impl CarouselConfig {
    /// Parse and validate a YAML config
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: CarouselConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_meshes_per_rail == 0 {
            return Err(invalid("num_meshes_per_rail must be at least 1"));
        }
        if !(self.damping_factor > 0.0 && self.damping_factor <= 1.0) {
            return Err(invalid(format!(
                "damping_factor must be in (0, 1], got {}",
                self.damping_factor
            )));
        }
        if !(self.sensitivity_threshold > 0.0 && self.sensitivity_threshold.is_finite()) {
            return Err(invalid(format!(
                "sensitivity_threshold must be positive, got {}",
                self.sensitivity_threshold
            )));
        }
        if !self.desktop_scroll_speed.is_finite() || !self.mobile_scroll_speed.is_finite() {
            return Err(invalid("scroll speeds must be finite"));
        }

        let camera = &self.camera;
        if !camera.position().is_finite() {
            return Err(invalid("camera position must be finite"));
        }
        if !(camera.near > 0.0 && camera.far > camera.near) {
            return Err(invalid(format!(
                "camera planes must satisfy 0 < near < far, got near={} far={}",
                camera.near, camera.far
            )));
        }
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(invalid(format!(
                "fov_degrees must be in (0, 180), got {}",
                camera.fov_degrees
            )));
        }
        Ok(())
    }

    /// Parsed log level, falling back to `Info` for unknown names
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

fn invalid(msg: impl Into<String>) -> CarouselError {
    CarouselError::InvalidConfig(msg.into())
}
