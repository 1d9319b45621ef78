//! Damped tracking of the carousel position
//!
//! `t` chases `target_t` around the unit circle with frame-time-normalized
//! exponential smoothing, always taking the short way across the 0/1 seam.

use crate::data::CarouselConfig;
use crate::math::{circular_diff, wrap_unit};

/// Frame interval the damping factor is tuned for (60 Hz)
pub const REFERENCE_FRAME_MS: f64 = 1000.0 / 60.0;

/// Tuning for the damping step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DampingParams {
    /// Fraction of the remaining distance covered per reference frame
    pub damping_factor: f64,
    /// Remaining distance at or below which tracking stops
    pub sensitivity_threshold: f64,
}

impl Default for DampingParams {
    fn default() -> Self {
        Self {
            damping_factor: 0.05,
            sensitivity_threshold: 1e-5,
        }
    }
}

impl From<&CarouselConfig> for DampingParams {
    fn from(config: &CarouselConfig) -> Self {
        Self {
            damping_factor: config.damping_factor,
            sensitivity_threshold: config.sensitivity_threshold,
        }
    }
}

/// Result of one damping step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Elapsed time was missing, zero, negative or NaN; nothing changed
    Skipped,
    /// `t` moved and is still further than the threshold from the target
    Moving { diff: f64 },
    /// Remaining distance was within the threshold; tracking has stopped
    Converged { diff: f64 },
}

/// Current and target position on the rails, both in [0, 1)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionState {
    t: f64,
    target_t: f64,
    animating: bool,
}

impl MotionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State at a given position and target, both wrapped into [0, 1)
    pub fn at(t: f64, target_t: f64) -> Self {
        Self {
            t: wrap_unit(t),
            target_t: wrap_unit(target_t),
            animating: false,
        }
    }

    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn target_t(&self) -> f64 {
        self.target_t
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub(crate) fn set_animating(&mut self, animating: bool) {
        self.animating = animating;
    }

    /// Signed shortest distance still to travel
    pub fn remaining(&self) -> f64 {
        circular_diff(self.t, self.target_t)
    }

    /// Shift the target by `delta` path units.
    ///
    /// Returns false when the delta is zero or not finite and the target is untouched.
    pub fn nudge_target(&mut self, delta: f64) -> bool {
        if delta == 0.0 || !delta.is_finite() {
            return false;
        }
        self.target_t = wrap_unit(self.target_t + delta);
        true
    }

    /// Advance `t` toward the target by one frame.
    ///
    /// `elapsed_ms` is the wall-clock time since the previous step; `None`
    /// means there was no previous step to measure from.
    pub fn step(&mut self, elapsed_ms: Option<f64>, params: &DampingParams) -> StepOutcome {
        let elapsed_ms = match elapsed_ms {
            Some(ms) if ms.is_finite() && ms > 0.0 => ms,
            _ => return StepOutcome::Skipped,
        };

        let dt_scale = elapsed_ms / REFERENCE_FRAME_MS;
        // A long stall must not carry t past the target
        let gain = (params.damping_factor * dt_scale).min(1.0);

        let diff = self.remaining();
        let next = wrap_unit(self.t + diff * gain);

        if diff.abs() <= params.sensitivity_threshold {
            self.t = next;
            self.animating = false;
            return StepOutcome::Converged { diff };
        }

        if next == self.t && self.stalled(diff, params) {
            // Remaining distance is below float resolution at t
            self.t = self.target_t;
            self.animating = false;
            return StepOutcome::Converged { diff };
        }

        self.t = next;
        StepOutcome::Moving { diff }
    }

    /// A full reference frame would no longer move `t`
    fn stalled(&self, diff: f64, params: &DampingParams) -> bool {
        let gain = params.damping_factor.min(1.0);
        wrap_unit(self.t + diff * gain) == self.t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_strength() -> DampingParams {
        DampingParams {
            damping_factor: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_at_target_is_stable() {
        let mut motion = MotionState::at(0.3, 0.3);
        motion.set_animating(true);

        let outcome = motion.step(Some(REFERENCE_FRAME_MS), &DampingParams::default());

        assert!(matches!(outcome, StepOutcome::Converged { .. }));
        assert!((motion.t() - 0.3).abs() < 1e-7);
        assert!(!motion.is_animating());
    }

    #[test]
    fn test_full_strength_step_crosses_wrap_forward() {
        let mut motion = MotionState::at(0.99, 0.01);
        motion.step(Some(REFERENCE_FRAME_MS), &full_strength());
        assert!((motion.t() - 0.01).abs() < 1e-5, "t = {}", motion.t());
    }

    #[test]
    fn test_full_strength_step_crosses_wrap_backward() {
        let mut motion = MotionState::at(0.01, 0.99);
        motion.step(Some(REFERENCE_FRAME_MS), &full_strength());
        assert!((motion.t() - 0.99).abs() < 1e-5, "t = {}", motion.t());
    }

    #[test]
    fn test_partial_step_covers_damping_fraction() {
        let mut motion = MotionState::at(0.0, 0.2);
        motion.step(Some(REFERENCE_FRAME_MS), &DampingParams::default());
        assert!((motion.t() - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_step_scales_with_elapsed_time() {
        let mut at_60 = MotionState::at(0.0, 0.2);
        at_60.step(Some(REFERENCE_FRAME_MS), &DampingParams::default());
        at_60.step(Some(REFERENCE_FRAME_MS), &DampingParams::default());

        let mut at_30 = MotionState::at(0.0, 0.2);
        at_30.step(Some(REFERENCE_FRAME_MS * 2.0), &DampingParams::default());

        // one double-length frame covers roughly what two frames do
        assert!((at_60.t() - at_30.t()).abs() < 0.001);
        assert!(at_30.t() > at_60.t() - 0.001);
    }

    #[test]
    fn test_long_stall_does_not_overshoot() {
        let mut motion = MotionState::at(0.1, 0.3);
        motion.step(Some(60_000.0), &DampingParams::default());
        assert!((motion.t() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_timesteps_are_skipped() {
        let params = DampingParams::default();
        for elapsed in [None, Some(0.0), Some(-5.0), Some(f64::NAN), Some(f64::INFINITY)] {
            let mut motion = MotionState::at(0.1, 0.4);
            motion.set_animating(true);
            let outcome = motion.step(elapsed, &params);
            assert_eq!(outcome, StepOutcome::Skipped);
            assert_eq!(motion.t(), 0.1);
            assert!(motion.is_animating());
        }
    }

    #[test]
    fn test_converges_only_within_threshold() {
        let params = DampingParams::default();
        let mut motion = MotionState::at(0.0, 0.3);
        motion.set_animating(true);

        let mut steps = 0;
        loop {
            let before = motion.remaining().abs();
            let outcome = motion.step(Some(REFERENCE_FRAME_MS), &params);
            steps += 1;
            match outcome {
                StepOutcome::Moving { diff } => {
                    assert!(diff.abs() > params.sensitivity_threshold);
                    assert!(motion.is_animating());
                }
                StepOutcome::Converged { diff } => {
                    assert!(diff.abs() <= params.sensitivity_threshold);
                    assert!((diff.abs() - before).abs() < 1e-7);
                    break;
                }
                StepOutcome::Skipped => unreachable!(),
            }
            assert!(steps < 10_000, "tracking never converged");
        }
        assert!(!motion.is_animating());
        assert!(motion.remaining().abs() <= params.sensitivity_threshold);
    }

    #[test]
    fn test_moves_along_short_arc() {
        let mut motion = MotionState::at(0.9, 0.2);
        motion.step(Some(REFERENCE_FRAME_MS), &DampingParams::default());
        // short way from 0.9 to 0.2 is forward through the seam
        assert!(motion.t() > 0.9);
    }

    #[test]
    fn test_nudge_target_wraps() {
        let mut motion = MotionState::new();
        assert!(motion.nudge_target(-0.02));
        assert!((motion.target_t() - 0.98).abs() < 1e-6);
        assert!(motion.nudge_target(0.05));
        assert!((motion.target_t() - 0.03).abs() < 1e-5);
    }

    #[test]
    fn test_nudge_target_ignores_noop() {
        let mut motion = MotionState::at(0.0, 0.5);
        assert!(!motion.nudge_target(0.0));
        assert!(!motion.nudge_target(f64::NAN));
        assert_eq!(motion.target_t(), 0.5);
    }

    /// Steps at a fixed frame interval until convergence, returning the frame count
    fn frames_to_settle(mut motion: MotionState, frame_ms: f64, params: &DampingParams) -> Option<usize> {
        motion.set_animating(true);
        for frame in 1..=200_000 {
            if let StepOutcome::Converged { .. } = motion.step(Some(frame_ms), params) {
                assert!(!motion.is_animating());
                assert!(motion.remaining().abs() <= params.sensitivity_threshold);
                return Some(frame);
            }
        }
        None
    }

    #[test]
    fn test_slow_damping_at_high_refresh_rate_settles() {
        let params = DampingParams {
            damping_factor: 0.005,
            sensitivity_threshold: 1e-5,
        };
        let frames = frames_to_settle(MotionState::at(0.5, 0.98), 1000.0 / 240.0, &params);
        assert!(frames.is_some(), "tracking never settled near the seam");
    }

    #[test]
    fn test_fine_threshold_settles() {
        let params = DampingParams {
            damping_factor: 0.05,
            sensitivity_threshold: 1e-7,
        };
        assert!(frames_to_settle(MotionState::at(0.5, 0.98), REFERENCE_FRAME_MS, &params).is_some());
        assert!(frames_to_settle(MotionState::at(0.02, 0.98), REFERENCE_FRAME_MS, &params).is_some());
    }

    #[test]
    fn test_threshold_below_float_resolution_snaps_to_target() {
        let params = DampingParams {
            damping_factor: 0.05,
            sensitivity_threshold: 1e-20,
        };
        let mut motion = MotionState::at(0.5, 0.98);
        motion.set_animating(true);

        let mut settled = false;
        for _ in 0..10_000 {
            if let StepOutcome::Converged { .. } = motion.step(Some(REFERENCE_FRAME_MS), &params) {
                settled = true;
                break;
            }
        }
        assert!(settled);
        assert!(!motion.is_animating());
        assert!(motion.remaining().abs() < 1e-14);
    }

    #[test]
    fn test_short_frame_without_progress_keeps_tracking() {
        let mut motion = MotionState::at(0.5, 0.6);
        motion.set_animating(true);
        let outcome = motion.step(Some(1e-300), &DampingParams::default());
        assert!(matches!(outcome, StepOutcome::Moving { .. }));
        assert_eq!(motion.t(), 0.5);
        assert!(motion.is_animating());
    }
}
