use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

pub mod animation;
pub mod carousel;
pub mod data;
pub mod error;
pub mod interaction;
pub mod math;
pub mod mesh;
pub mod render;
pub mod web;

pub use carousel::{Carousel, FrameReport};
pub use data::CarouselConfig;
pub use error::{CarouselError, Result};
pub use web::{mount, SharedCarousel};

use data::DeviceProfile;

/// Install the panic hook and console logger
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // Already set when the module is started twice
    console_log::init_with_level(log::Level::Info).ok();
}

/// Scroll-driven image carousel exposed to JavaScript
#[wasm_bindgen]
pub struct ImageCarousel {
    inner: SharedCarousel,
}

#[wasm_bindgen]
impl ImageCarousel {
    /// Mount a carousel on `canvas`, optionally configured with a YAML document
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config_yaml: Option<String>) -> std::result::Result<ImageCarousel, JsValue> {
        let config = match config_yaml.as_deref() {
            Some(yaml) => CarouselConfig::from_yaml(yaml)?,
            None => CarouselConfig::default(),
        };
        let inner = mount(canvas, &config)?;
        Ok(ImageCarousel { inner })
    }

    /// Current position along the rails, in [0, 1)
    #[wasm_bindgen(getter)]
    pub fn position(&self) -> f64 {
        self.inner.borrow().motion().t()
    }

    /// Position the carousel is easing toward
    #[wasm_bindgen(getter)]
    pub fn target(&self) -> f64 {
        self.inner.borrow().motion().target_t()
    }

    #[wasm_bindgen(getter)]
    pub fn is_tracking(&self) -> bool {
        self.inner.borrow().driver().is_tracking()
    }

    #[wasm_bindgen(getter)]
    pub fn is_compact(&self) -> bool {
        self.inner.borrow().profile() == DeviceProfile::Compact
    }

    /// Frames drawn since mounting
    #[wasm_bindgen(getter)]
    pub fn frames_rendered(&self) -> f64 {
        self.inner.borrow().driver().frames_rendered() as f64
    }
}
