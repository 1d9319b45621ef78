//! Carousel controller
//!
//! Owns the rails, items and motion state, and forwards every placement
//! to a [`RendererSurface`].

use crate::animation::{AnimationDriver, DampingParams, MotionState, TrackingTick};
use crate::data::{build_track_items, CarouselConfig, DeviceProfile, RailSet, TrackItem};
use crate::error::Result;
use crate::interaction::{InputEvent, InputTranslator, ScrollSensitivity};
use crate::mesh::LayoutProjector;
use crate::render::RendererSurface;

/// What one frame callback did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    pub tracking: TrackingTick,
    pub rendered: bool,
}

pub struct Carousel<S: RendererSurface> {
    profile: DeviceProfile,
    rails: RailSet,
    items: Vec<TrackItem>,
    motion: MotionState,
    params: DampingParams,
    input: InputTranslator,
    driver: AnimationDriver,
    surface: S,
}

impl<S: RendererSurface> Carousel<S> {
    /// Build the carousel and place every card at `t = 0`
    pub fn new(config: &CarouselConfig, profile: DeviceProfile, surface: S) -> Self {
        let mut carousel = Self {
            profile,
            rails: RailSet::for_profile(profile),
            items: build_track_items(config.num_meshes_per_rail),
            motion: MotionState::new(),
            params: DampingParams::from(config),
            input: InputTranslator::new(ScrollSensitivity::from(config)),
            driver: AnimationDriver::new(config.pause_when_hidden),
            surface,
        };
        log::info!(
            "carousel ready: {:?} profile, {} cards",
            profile,
            carousel.items.len()
        );
        carousel.relayout();
        carousel
    }

    /// Feed one input event. Returns true when the target moved.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        if !self.input.apply(event, &mut self.motion) {
            return false;
        }
        if self.driver.wake(&mut self.motion) {
            log::debug!(
                "tracking started: t={:.5} target={:.5}",
                self.motion.t(),
                self.motion.target_t()
            );
        }
        true
    }

    /// Run the frame callback at timestamp `now_ms`
    pub fn frame(&mut self, now_ms: f64) -> FrameReport {
        let tracking = self.driver.track(now_ms, &mut self.motion, &self.params);
        if tracking.moved_position() {
            self.relayout();
        }

        let rendered = self.driver.should_render();
        if rendered {
            self.surface.render();
            self.driver.note_rendered();
        }
        FrameReport { tracking, rendered }
    }

    /// Place every card for the current position, facing the live camera
    pub fn relayout(&mut self) {
        let projector = LayoutProjector::new(&self.rails, self.surface.camera_position());
        for (mesh, placement) in projector.project_all(&self.items, self.motion.t()).enumerate() {
            self.surface.place_mesh(mesh, &placement);
        }
    }

    pub fn resize(&mut self, width: u32, height: u32, pixel_ratio: f32) -> Result<()> {
        self.surface.resize(width, height, pixel_ratio)
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.driver.set_visible(visible);
    }

    pub fn motion(&self) -> &MotionState {
        &self.motion
    }

    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }

    pub fn items(&self) -> &[TrackItem] {
        &self.items
    }

    pub fn profile(&self) -> DeviceProfile {
        self.profile
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
