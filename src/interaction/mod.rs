pub mod input;

pub use input::{InputEvent, InputTranslator, ScrollSensitivity, WheelDeltaMode};
