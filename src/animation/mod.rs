//! Motion of the carousel along its rails
//!
//! Damped tracking of the path parameter and the per-frame
//! scheduling that drives it.

mod motion;
mod driver;

pub use motion::{MotionState, DampingParams, StepOutcome, REFERENCE_FRAME_MS};
pub use driver::{AnimationDriver, TrackingState, TrackingTick};
