//! Crate-level error types.
//!
//! Only setup paths fail: configuration, WebGL resources and browser lookups.
//! The motion core itself never returns an error.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors produced while building or driving a carousel
#[derive(Debug, Error)]
pub enum CarouselError {
    /// Configuration text could not be parsed
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
    /// Configuration parsed but holds an unusable value
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// WebGL resource creation failed
    #[error("graphics error: {0}")]
    Graphics(String),
    /// A required browser object was missing
    #[error("browser API unavailable: {0}")]
    BrowserApi(String),
}

impl From<CarouselError> for JsValue {
    fn from(e: CarouselError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CarouselError>;
