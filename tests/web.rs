//! Browser smoke tests, run with `wasm-pack test --headless --chrome`

#![cfg(target_arch = "wasm32")]

use scroll_carousel::data::{CarouselConfig, DeviceProfile};
use scroll_carousel::web::detect_viewport;
use scroll_carousel::{mount, ImageCarousel};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;

wasm_bindgen_test_configure!(run_in_browser);

fn canvas() -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

#[wasm_bindgen_test]
fn test_viewport_detection_reads_window() {
    let window = web_sys::window().unwrap();
    let viewport = detect_viewport(&window);
    assert!(viewport.width > 0);
    assert!(viewport.height > 0);
}

#[wasm_bindgen_test]
fn test_mount_places_cards_at_origin() {
    let config = CarouselConfig {
        is_compact_profile: Some(false),
        ..Default::default()
    };
    let carousel = mount(canvas(), &config).unwrap();
    let carousel = carousel.borrow();

    assert_eq!(carousel.profile(), DeviceProfile::Desktop);
    assert_eq!(carousel.items().len(), 8);
    assert_eq!(carousel.surface().card_count(), 8);
    assert_eq!(carousel.motion().t(), 0.0);
}

#[wasm_bindgen_test]
fn test_frame_renders_with_placeholders() {
    let config = CarouselConfig {
        pause_when_hidden: false,
        ..Default::default()
    };
    let carousel = mount(canvas(), &config).unwrap();
    let report = carousel.borrow_mut().frame(0.0);
    assert!(report.rendered);
}

#[wasm_bindgen_test]
fn test_js_handle_accepts_yaml_config() {
    let yaml = "num_meshes_per_rail: 3\nis_compact_profile: true\n";
    let handle = ImageCarousel::new(canvas(), Some(yaml.to_string())).unwrap();
    assert!(handle.is_compact());
    assert_eq!(handle.position(), 0.0);
    assert!(!handle.is_tracking());
}

#[wasm_bindgen_test]
fn test_js_handle_rejects_invalid_config() {
    let yaml = "damping_factor: 0\n";
    assert!(ImageCarousel::new(canvas(), Some(yaml.to_string())).is_err());
}

#[wasm_bindgen_test]
fn test_mount_applies_configured_log_level() {
    let config = CarouselConfig {
        log_level: "debug".to_string(),
        ..Default::default()
    };
    mount(canvas(), &config).unwrap();
    assert_eq!(log::max_level(), log::LevelFilter::Debug);

    let quiet = CarouselConfig {
        log_level: "warn".to_string(),
        ..Default::default()
    };
    mount(canvas(), &quiet).unwrap();
    assert_eq!(log::max_level(), log::LevelFilter::Warn);
}
