#![cfg(target_arch = "wasm32")]
mod ai;
mod camera;
mod controls;
mod dom;
mod events;
mod frame;
mod hands;
mod input;
mod overlay;
mod render;
mod state;

use instant::Instant;
use nebula_core::{ParticleCloud, Smoother};
use state::AppState;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("nebula-web starting");

    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        log::warn!("start already triggered; ignoring");
        return Ok(());
    }
    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    wire_canvas_resize(&window, &canvas);

    let (config, api_key) = state::load_page_config();
    if api_key.is_none() {
        log::warn!("[ai] no apiKey in NEBULA_CONFIG; prompt generation will fail");
    }
    let seed = config.particle_seed();
    let app = AppState::new(config, api_key)?;
    let params = app.store.current().clone();
    let smoother = Smoother::new(&params, app.config.smoother);
    let cloud = ParticleCloud::generate(params.count, seed);
    log::info!("[engine] {} particles, seed {}", cloud.len(), seed);
    let shared = Rc::new(RefCell::new(app));

    controls::wire_controls(&shared, &document);
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        document: document.clone(),
        state: shared.clone(),
    });

    let gpu = frame::init_gpu(&canvas, &cloud).await;
    if gpu.is_none() {
        overlay::set_text(&document, "error-banner", "WebGPU is not available in this browser.");
        overlay::show(&document, "error-banner");
    }
    let now = Instant::now();
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        state: shared,
        document,
        canvas,
        gpu,
        smoother,
        cloud,
        started: now,
        last_instant: now,
        seen_revision: None,
        seen_generation: None,
        seen_mode: None,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}

// Maintain canvas internal pixel size to match CSS size * devicePixelRatio
fn wire_canvas_resize(window: &web::Window, canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    window
        .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())
        .ok();
    resize_closure.forget();
}
