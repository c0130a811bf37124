//! Browser entry point.
//!
//! Attaches the engine to the page's `canvas.webgl` element, feeds it
//! `resize`, `scroll` and `mousemove` events from the window, and drives
//! frames with `requestAnimationFrame`. The page owns the scrolling; the
//! engine only reads `window.scrollY`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, prelude::wasm_bindgen, JsCast, JsValue};
use web_sys::{HtmlCanvasElement, MouseEvent, Window};

use crate::engine::{LoopControl, SceneEngine};
use crate::error::SceneError;
use crate::input::InputEvent;
use crate::options::Options;

/// CSS selector of the canvas the scene renders into.
pub const CANVAS_SELECTOR: &str = "canvas.webgl";

/// Module start hook: installs the panic hook and console logger, then
/// starts the scene with default options.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    wasm_bindgen_futures::spawn_local(async {
        if let Err(e) = run(Options::default()).await {
            log::error!("{e}");
        }
    });
}

/// Create the engine on the page canvas and start the frame loop.
///
/// # Errors
///
/// Returns [`SceneError::Web`] if the window, document or canvas is
/// missing, or [`SceneError::Gpu`] if no GPU context can be created.
pub async fn run(options: Options) -> Result<(), SceneError> {
    let window = web_sys::window()
        .ok_or_else(|| SceneError::Web("no global window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| SceneError::Web("no document".into()))?;
    let canvas: HtmlCanvasElement = document
        .query_selector(CANVAS_SELECTOR)
        .map_err(js_error)?
        .ok_or_else(|| {
            SceneError::Web(format!("no element matches {CANVAS_SELECTOR}"))
        })?
        .dyn_into()
        .map_err(|_| {
            SceneError::Web(format!("{CANVAS_SELECTOR} is not a canvas"))
        })?;

    let engine = SceneEngine::new(
        wgpu::SurfaceTarget::Canvas(canvas.clone()),
        window_size(&window),
        window.device_pixel_ratio() as f32,
        options,
    )
    .await?;
    let engine = Rc::new(RefCell::new(engine));

    sync_canvas(&canvas, &engine.borrow());
    engine
        .borrow_mut()
        .seed_scroll(window.scroll_y().unwrap_or(0.0) as f32);

    listen_resize(&window, &canvas, &engine)?;
    listen_scroll(&window, &engine)?;
    listen_mousemove(&window, &engine)?;
    start_animation_loop(window, engine);

    log::info!("scene attached to {CANVAS_SELECTOR}");
    Ok(())
}

// ── Event listeners ──────────────────────────────────────────────────────

fn listen_resize(
    window: &Window,
    canvas: &HtmlCanvasElement,
    engine: &Rc<RefCell<SceneEngine>>,
) -> Result<(), SceneError> {
    let closure = {
        let window = window.clone();
        let canvas = canvas.clone();
        let engine = Rc::clone(engine);
        Closure::<dyn FnMut()>::new(move || {
            let (width, height) = window_size(&window);
            let mut engine = engine.borrow_mut();
            let _ = engine.handle_input(InputEvent::Resized {
                width,
                height,
                device_pixel_ratio: window.device_pixel_ratio() as f32,
            });
            sync_canvas(&canvas, &engine);
        })
    };
    window
        .add_event_listener_with_callback(
            "resize",
            closure.as_ref().unchecked_ref(),
        )
        .map_err(js_error)?;
    closure.forget();
    Ok(())
}

fn listen_scroll(
    window: &Window,
    engine: &Rc<RefCell<SceneEngine>>,
) -> Result<(), SceneError> {
    let closure = {
        let window = window.clone();
        let engine = Rc::clone(engine);
        Closure::<dyn FnMut()>::new(move || {
            let offset = window.scroll_y().unwrap_or(0.0) as f32;
            let _ = engine
                .borrow_mut()
                .handle_input(InputEvent::Scrolled { offset });
        })
    };
    window
        .add_event_listener_with_callback(
            "scroll",
            closure.as_ref().unchecked_ref(),
        )
        .map_err(js_error)?;
    closure.forget();
    Ok(())
}

fn listen_mousemove(
    window: &Window,
    engine: &Rc<RefCell<SceneEngine>>,
) -> Result<(), SceneError> {
    let closure = {
        let engine = Rc::clone(engine);
        Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let _ = engine.borrow_mut().handle_input(InputEvent::CursorMoved {
                x: event.client_x() as f32,
                y: event.client_y() as f32,
            });
        })
    };
    window
        .add_event_listener_with_callback(
            "mousemove",
            closure.as_ref().unchecked_ref(),
        )
        .map_err(js_error)?;
    closure.forget();
    Ok(())
}

// ── Frame loop ───────────────────────────────────────────────────────────

/// Schedule `engine.frame()` on every animation frame until the engine's
/// stop handle fires.
fn start_animation_loop(window: Window, engine: Rc<RefCell<SceneEngine>>) {
    // The closure re-requests itself, so it has to be reachable from its
    // own body.
    let callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>> =
        Rc::new(RefCell::new(None));
    let scheduled = Rc::clone(&callback);
    let frame_window = window.clone();

    *callback.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
        match engine.borrow_mut().frame() {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Stop) => {
                log::info!("frame loop stopped");
                return;
            }
            Err(e) => log::error!("render error: {e:?}"),
        }
        if let Some(next) = scheduled.borrow().as_ref() {
            request_frame(&frame_window, next);
        }
    }));

    if let Some(first) = callback.borrow().as_ref() {
        request_frame(&window, first);
    }
}

fn request_frame(window: &Window, callback: &Closure<dyn FnMut()>) {
    if let Err(e) =
        window.request_animation_frame(callback.as_ref().unchecked_ref())
    {
        log::error!("requestAnimationFrame failed: {e:?}");
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────

/// Logical window size (`innerWidth`, `innerHeight`).
fn window_size(window: &Window) -> (f32, f32) {
    let dimension = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(1.0) as f32
    };
    (dimension(window.inner_width()), dimension(window.inner_height()))
}

/// Match the canvas backing store to the surface size.
fn sync_canvas(canvas: &HtmlCanvasElement, engine: &SceneEngine) {
    let (width, height) = engine.surface_size();
    if canvas.width() != width || canvas.height() != height {
        canvas.set_width(width);
        canvas.set_height(height);
    }
}

fn js_error(value: JsValue) -> SceneError {
    SceneError::Web(format!("{value:?}"))
}
