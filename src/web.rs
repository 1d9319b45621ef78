//! Browser bindings
//!
//! Wires DOM events, animation frames and image loading to a shared
//! [`Carousel`] drawing through the WebGL2 [`RenderPipeline`].

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, EventTarget, HtmlCanvasElement, HtmlImageElement,
    TouchEvent, WheelEvent, Window,
};
use crate::carousel::Carousel;
use crate::data::{CarouselConfig, DeviceProfile, ViewportInfo};
use crate::error::{CarouselError, Result};
use crate::interaction::{InputEvent, WheelDeltaMode};
use crate::render::{MeshId, RenderPipeline};

/// Carousel shared between every browser callback
pub type SharedCarousel = Rc<RefCell<Carousel<RenderPipeline>>>;

fn browser(msg: impl Into<String>) -> CarouselError {
    CarouselError::BrowserApi(msg.into())
}

fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| browser("no global window"))
}

fn document(window: &Window) -> Result<Document> {
    window.document().ok_or_else(|| browser("window has no document"))
}

/// Viewport size in CSS pixels
fn viewport_size(window: &Window) -> (u32, u32) {
    let read = |value: std::result::Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32
    };
    (read(window.inner_width()), read(window.inner_height()))
}

/// What the browser reports about the viewport right now
pub fn detect_viewport(window: &Window) -> ViewportInfo {
    let (width, height) = viewport_size(window);
    let coarse_pointer = window
        .match_media("(pointer: coarse)")
        .ok()
        .flatten()
        .map(|query| query.matches())
        .unwrap_or(false);
    ViewportInfo {
        width,
        height,
        coarse_pointer,
    }
}

/// Build the carousel on `canvas` and start its listeners and frame loop.
///
/// Everything installed here lives for the rest of the page session.
pub fn mount(canvas: HtmlCanvasElement, config: &CarouselConfig) -> Result<SharedCarousel> {
    log::set_max_level(config.log_level().to_level_filter());

    let window = window()?;
    let viewport = detect_viewport(&window);
    let profile = DeviceProfile::resolve(config, &viewport);
    log::info!(
        "viewport {}x{} (coarse pointer: {}) -> {:?}",
        viewport.width,
        viewport.height,
        viewport.coarse_pointer,
        profile
    );

    let card_count = config.num_meshes_per_rail * 2;
    let pipeline = RenderPipeline::new(canvas.clone(), card_count, &config.camera).map_err(|e| {
        log::error!("renderer setup failed: {}", e);
        e
    })?;
    log::debug!("renderer ready with {} card slots", pipeline.card_count());

    let mut carousel = Carousel::new(config, profile, pipeline);
    carousel.resize(viewport.width, viewport.height, window.device_pixel_ratio() as f32)?;
    let carousel = Rc::new(RefCell::new(carousel));

    install_input_listeners(&window, &carousel)?;
    install_page_listeners(&window, &carousel)?;
    load_images(&carousel, config)?;
    start_frame_loop(&window, carousel.clone())?;

    Ok(carousel)
}

fn listen<E, F>(target: &EventTarget, event: &str, passive: bool, handler: F) -> Result<()>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(|e| browser(format!("addEventListener({}) failed: {:?}", event, e)))?;
    closure.forget();
    Ok(())
}

/// Client Y of the first active touch point
fn first_touch_y(event: &TouchEvent) -> Option<f64> {
    event.touches().get(0).map(|touch| f64::from(touch.client_y()))
}

fn install_input_listeners(window: &Window, carousel: &SharedCarousel) -> Result<()> {
    let target: &EventTarget = window.as_ref();

    let shared = carousel.clone();
    listen(target, "wheel", false, move |event: WheelEvent| {
        event.prevent_default();
        shared.borrow_mut().handle_input(InputEvent::Wheel {
            delta_y: event.delta_y(),
            mode: WheelDeltaMode::from_dom(event.delta_mode()),
        });
    })?;

    let shared = carousel.clone();
    listen(target, "touchstart", true, move |event: TouchEvent| {
        if let Some(y) = first_touch_y(&event) {
            shared.borrow_mut().handle_input(InputEvent::TouchStart { y });
        }
    })?;

    let shared = carousel.clone();
    listen(target, "touchmove", false, move |event: TouchEvent| {
        if let Some(y) = first_touch_y(&event) {
            // keep the page from scrolling under the drag
            event.prevent_default();
            shared.borrow_mut().handle_input(InputEvent::TouchMove { y });
        }
    })?;

    for name in ["touchend", "touchcancel"] {
        let shared = carousel.clone();
        listen(target, name, true, move |_: TouchEvent| {
            shared.borrow_mut().handle_input(InputEvent::TouchEnd);
        })?;
    }
    Ok(())
}

fn install_page_listeners(window: &Window, carousel: &SharedCarousel) -> Result<()> {
    let shared = carousel.clone();
    let resize_window = window.clone();
    listen(window.as_ref(), "resize", true, move |_: web_sys::Event| {
        let (width, height) = viewport_size(&resize_window);
        let ratio = resize_window.device_pixel_ratio() as f32;
        if let Err(e) = shared.borrow_mut().resize(width, height, ratio) {
            log::error!("resize failed: {}", e);
        }
    })?;

    let document = document(window)?;
    let shared = carousel.clone();
    let visibility_document = document.clone();
    listen(document.as_ref(), "visibilitychange", true, move |_: web_sys::Event| {
        let visible = !visibility_document.hidden();
        log::debug!("document visible: {}", visible);
        shared.borrow_mut().set_visible(visible);
    })?;
    carousel.borrow_mut().set_visible(!document.hidden());
    Ok(())
}

/// Start loading every card's image. A card whose image fails keeps its placeholder.
fn load_images(carousel: &SharedCarousel, config: &CarouselConfig) -> Result<()> {
    let items = carousel.borrow().items().to_vec();
    for (mesh, item) in items.iter().enumerate() {
        match config.images.url_for(item.rail, item.slot) {
            Some(url) => load_image(carousel, mesh, url)?,
            None => log::warn!("no image configured for {:?} rail", item.rail),
        }
    }
    Ok(())
}

fn load_image(carousel: &SharedCarousel, mesh: MeshId, url: &str) -> Result<()> {
    let image = HtmlImageElement::new().map_err(|e| browser(format!("new Image() failed: {:?}", e)))?;
    image.set_cross_origin(Some("anonymous"));

    let shared = carousel.clone();
    let loaded = image.clone();
    let onload = Closure::once_into_js(move || {
        if let Err(e) = shared.borrow_mut().surface_mut().set_card_image(mesh, &loaded) {
            log::error!("texture for card {} failed: {}", mesh, e);
        }
    });

    let failed_url = url.to_string();
    let onerror = Closure::once_into_js(move || {
        log::warn!("image {} unavailable, card {} keeps its placeholder", failed_url, mesh);
    });

    image.set_onload(Some(onload.unchecked_ref()));
    image.set_onerror(Some(onerror.unchecked_ref()));
    image.set_src(url);
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn request_frame(window: &Window, callback: &FrameCallback) -> Result<()> {
    let callback = callback.borrow();
    let function = callback
        .as_ref()
        .ok_or_else(|| browser("frame callback missing"))?;
    window
        .request_animation_frame(function.as_ref().unchecked_ref())
        .map_err(|e| browser(format!("requestAnimationFrame failed: {:?}", e)))?;
    Ok(())
}

/// Run `Carousel::frame` on every animation frame for the rest of the session
fn start_frame_loop(window: &Window, carousel: SharedCarousel) -> Result<()> {
    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let next = callback.clone();
    let frame_window = window.clone();

    *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |now_ms: f64| {
        carousel.borrow_mut().frame(now_ms);
        if let Err(e) = request_frame(&frame_window, &next) {
            log::error!("frame loop stopped: {}", e);
        }
    }) as Box<dyn FnMut(f64)>));

    request_frame(window, &callback)
}
