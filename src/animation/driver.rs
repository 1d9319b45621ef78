//! Frame scheduling for the carousel
//!
//! Two loops share the host's frame callback:
//! - the render loop, which draws every frame for the whole session
//! - the tracking loop, which runs one damping step per frame after input
//!   and halts once the position has settled

use super::motion::{DampingParams, MotionState, StepOutcome};

/// Whether the tracking loop is active
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackingState {
    Idle,
    Running {
        /// Timestamp of the previous tracking frame, if any
        last_frame_ms: Option<f64>,
    },
}

/// What the tracking loop did during one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingTick {
    /// Loop not running
    Idle,
    /// Unusable timestep; retried next frame
    Skipped,
    /// Position moved, loop continues
    Moved,
    /// Final step applied, loop halted
    Settled,
}

impl TrackingTick {
    /// The position changed and the cards need re-placing
    pub fn moved_position(self) -> bool {
        matches!(self, TrackingTick::Moved | TrackingTick::Settled)
    }
}

#[derive(Debug, Clone)]
pub struct AnimationDriver {
    tracking: TrackingState,
    visible: bool,
    pause_when_hidden: bool,
    frames_rendered: u64,
}

impl AnimationDriver {
    pub fn new(pause_when_hidden: bool) -> Self {
        Self {
            tracking: TrackingState::Idle,
            visible: true,
            pause_when_hidden,
            frames_rendered: 0,
        }
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self.tracking, TrackingState::Running { .. })
    }

    /// Start the tracking loop after the target moved.
    ///
    /// Returns true when this call started the loop, false if it was already running.
    pub fn wake(&mut self, motion: &mut MotionState) -> bool {
        motion.set_animating(true);
        if self.is_tracking() {
            return false;
        }
        self.tracking = TrackingState::Running { last_frame_ms: None };
        true
    }

    /// Run one tracking iteration for the frame at `now_ms`
    pub fn track(&mut self, now_ms: f64, motion: &mut MotionState, params: &DampingParams) -> TrackingTick {
        let last_frame_ms = match self.tracking {
            TrackingState::Idle => return TrackingTick::Idle,
            TrackingState::Running { last_frame_ms } => last_frame_ms,
        };

        if !motion.is_animating() {
            self.tracking = TrackingState::Idle;
            return TrackingTick::Idle;
        }

        if !now_ms.is_finite() {
            return TrackingTick::Skipped;
        }

        let elapsed_ms = last_frame_ms.map(|last| now_ms - last);
        self.tracking = TrackingState::Running { last_frame_ms: Some(now_ms) };

        match motion.step(elapsed_ms, params) {
            StepOutcome::Skipped => TrackingTick::Skipped,
            StepOutcome::Moving { .. } => TrackingTick::Moved,
            StepOutcome::Converged { diff } => {
                log::debug!("tracking settled at t={:.5} (diff {:.2e})", motion.t(), diff);
                self.tracking = TrackingState::Idle;
                TrackingTick::Settled
            }
        }
    }

    /// Record document visibility.
    ///
    /// Coming back into view drops the stale timestamp so the hidden period
    /// is not counted as one long frame.
    pub fn set_visible(&mut self, visible: bool) {
        if visible && !self.visible {
            if let TrackingState::Running { .. } = self.tracking {
                self.tracking = TrackingState::Running { last_frame_ms: None };
            }
        }
        self.visible = visible;
    }

    pub fn should_render(&self) -> bool {
        self.visible || !self.pause_when_hidden
    }

    pub fn note_rendered(&mut self) {
        self.frames_rendered += 1;
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}
