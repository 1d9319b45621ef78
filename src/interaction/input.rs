use crate::animation::MotionState;
use crate::data::CarouselConfig;

/// Pixels per line for line-based wheel deltas
const LINE_HEIGHT_PX: f64 = 16.0;
/// Pixels per page for page-based wheel deltas
const PAGE_HEIGHT_PX: f64 = 800.0;

/// Unit of a wheel event's delta, as reported by the DOM `deltaMode`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WheelDeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

impl WheelDeltaMode {
    pub fn from_dom(mode: u32) -> Self {
        match mode {
            1 => WheelDeltaMode::Line,
            2 => WheelDeltaMode::Page,
            _ => WheelDeltaMode::Pixel,
        }
    }

    fn pixels_per_unit(self) -> f64 {
        match self {
            WheelDeltaMode::Pixel => 1.0,
            WheelDeltaMode::Line => LINE_HEIGHT_PX,
            WheelDeltaMode::Page => PAGE_HEIGHT_PX,
        }
    }
}

/// Raw pointer input relevant to the carousel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Wheel { delta_y: f64, mode: WheelDeltaMode },
    /// First touch point went down at this client Y
    TouchStart { y: f64 },
    TouchMove { y: f64 },
    TouchEnd,
}

/// Path units per pixel of input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSensitivity {
    pub wheel: f64,
    pub touch: f64,
}

impl Default for ScrollSensitivity {
    fn default() -> Self {
        Self {
            wheel: 0.0002,
            touch: 0.0006,
        }
    }
}

impl From<&CarouselConfig> for ScrollSensitivity {
    fn from(config: &CarouselConfig) -> Self {
        Self {
            wheel: config.desktop_scroll_speed,
            touch: config.mobile_scroll_speed,
        }
    }
}

/// Turns wheel and touch-drag events into target position deltas
#[derive(Debug, Clone)]
pub struct InputTranslator {
    sensitivity: ScrollSensitivity,
    /// Client Y the next drag delta is measured from; `None` outside a drag
    touch_y: Option<f64>,
}

impl InputTranslator {
    pub fn new(sensitivity: ScrollSensitivity) -> Self {
        Self {
            sensitivity,
            touch_y: None,
        }
    }

    /// Target delta for an event, or `None` when the event does not move the target
    pub fn translate(&mut self, event: InputEvent) -> Option<f64> {
        let delta = match event {
            InputEvent::Wheel { delta_y, mode } => {
                // downward scroll advances the carousel
                -delta_y * mode.pixels_per_unit() * self.sensitivity.wheel
            }
            InputEvent::TouchStart { y } => {
                if y.is_finite() {
                    self.touch_y = Some(y);
                }
                return None;
            }
            InputEvent::TouchMove { y } => {
                let last_y = self.touch_y?;
                if !y.is_finite() {
                    return None;
                }
                self.touch_y = Some(y);
                (last_y - y) * self.sensitivity.touch
            }
            InputEvent::TouchEnd => {
                self.touch_y = None;
                return None;
            }
        };

        if delta == 0.0 || !delta.is_finite() {
            None
        } else {
            Some(delta)
        }
    }

    /// Translate an event and apply it to the target.
    ///
    /// Returns true when the target moved.
    pub fn apply(&mut self, event: InputEvent, motion: &mut MotionState) -> bool {
        match self.translate(event) {
            Some(delta) => motion.nudge_target(delta),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheel(delta_y: f64) -> InputEvent {
        InputEvent::Wheel { delta_y, mode: WheelDeltaMode::Pixel }
    }

    #[test]
    fn test_wheel_down_wraps_target_backward() {
        let mut input = InputTranslator::new(ScrollSensitivity::default());
        let mut motion = MotionState::new();

        assert!(input.apply(wheel(100.0), &mut motion));
        assert!((motion.target_t() - 0.98).abs() < 1e-6, "target = {}", motion.target_t());
    }

    #[test]
    fn test_wheel_up_advances_target() {
        let mut input = InputTranslator::new(ScrollSensitivity::default());
        let mut motion = MotionState::new();
        input.apply(wheel(-50.0), &mut motion);
        assert!((motion.target_t() - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_wheel_line_mode_scales_delta() {
        let mut input = InputTranslator::new(ScrollSensitivity::default());
        let delta = input
            .translate(InputEvent::Wheel { delta_y: -3.0, mode: WheelDeltaMode::Line })
            .unwrap();
        assert!((delta - 3.0 * 16.0 * 0.0002).abs() < 1e-7);
        assert_eq!(WheelDeltaMode::from_dom(2), WheelDeltaMode::Page);
        assert_eq!(WheelDeltaMode::from_dom(7), WheelDeltaMode::Pixel);
    }

    #[test]
    fn test_touch_drag() {
        let mut input = InputTranslator::new(ScrollSensitivity::default());
        let mut motion = MotionState::new();

        assert!(!input.apply(InputEvent::TouchStart { y: 500.0 }, &mut motion));
        assert_eq!(input.touch_y, Some(500.0));

        assert!(input.apply(InputEvent::TouchMove { y: 460.0 }, &mut motion));
        assert!((motion.target_t() - 0.024).abs() < 1e-6, "target = {}", motion.target_t());

        // deltas are measured from the previous move, not the start
        assert!(input.apply(InputEvent::TouchMove { y: 450.0 }, &mut motion));
        assert!((motion.target_t() - 0.030).abs() < 1e-6);
        assert_eq!(input.touch_y, Some(450.0));
    }

    #[test]
    fn test_touch_move_without_start_is_noop() {
        let mut input = InputTranslator::new(ScrollSensitivity::default());
        let mut motion = MotionState::at(0.0, 0.4);
        assert!(!input.apply(InputEvent::TouchMove { y: 10.0 }, &mut motion));
        assert_eq!(motion.target_t(), 0.4);
    }

    #[test]
    fn test_touch_end_clears_state() {
        let mut input = InputTranslator::new(ScrollSensitivity::default());
        let mut motion = MotionState::new();
        input.apply(InputEvent::TouchStart { y: 300.0 }, &mut motion);
        input.apply(InputEvent::TouchEnd, &mut motion);
        assert_eq!(input.touch_y, None);
        assert!(!input.apply(InputEvent::TouchMove { y: 200.0 }, &mut motion));
        assert_eq!(motion.target_t(), 0.0);
    }

    #[test]
    fn test_zero_delta_is_ignored() {
        let mut input = InputTranslator::new(ScrollSensitivity::default());
        let mut motion = MotionState::new();
        assert!(!input.apply(wheel(0.0), &mut motion));
        assert!(!input.apply(wheel(f64::NAN), &mut motion));
    }

    #[test]
    fn test_sensitivities_are_independent() {
        let config = CarouselConfig {
            desktop_scroll_speed: 0.001,
            mobile_scroll_speed: 0.01,
            ..Default::default()
        };
        let mut input = InputTranslator::new(ScrollSensitivity::from(&config));
        assert!((input.translate(wheel(-10.0)).unwrap() - 0.01).abs() < 1e-7);
        input.translate(InputEvent::TouchStart { y: 100.0 });
        assert!((input.translate(InputEvent::TouchMove { y: 90.0 }).unwrap() - 0.1).abs() < 1e-6);
    }
}
