use crate::controls;
use crate::dom;
use crate::overlay;
use crate::render;
use crate::state::SharedState;
use instant::Instant;
use nebula_core::{
    GenerationState, InputMode, ParticleCloud, ParticleUniforms, SignalReader, Smoother,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// Longer gaps (a background tab) are treated as one step of this size.
const MAX_FRAME_DT_SEC: f32 = 0.25;

pub struct FrameContext<'a> {
    pub state: SharedState,
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub smoother: Smoother,
    pub cloud: ParticleCloud,

    pub started: Instant,
    pub last_instant: Instant,
    pub seen_revision: Option<u64>,
    pub seen_generation: Option<GenerationState>,
    pub seen_mode: Option<InputMode>,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT_SEC);
        self.last_instant = now;
        let time_sec = (now - self.started).as_secs_f32();

        let (input, params, revision, generation, mode, camera, fresh) = {
            let mut st = self.state.borrow_mut();
            st.generation.poll(dom::now_ms());
            let fresh = st.hands.as_mut().and_then(SignalReader::take_fresh);
            // the session that fed this reader is gone
            if st.hands.as_ref().is_some_and(|r| !r.writer_alive()) {
                st.hands = None;
            }
            if !st.drag.active {
                st.orbit.advance(dt_sec);
            }
            let aspect = self.canvas.width().max(1) as f32 / self.canvas.height().max(1) as f32;
            (
                st.interaction_input(),
                st.store.current().clone(),
                st.store.revision(),
                st.generation.state(),
                st.mode.mode(),
                st.orbit.camera(aspect),
                fresh,
            )
        };

        if let Some(signal) = fresh {
            overlay::update_status(&self.document, &signal);
        }

        if self.seen_revision != Some(revision) {
            self.seen_revision = Some(revision);
            controls::refresh_params(&self.document, &params);
            if params.count as usize != self.cloud.len() {
                self.cloud = ParticleCloud::generate(params.count, self.cloud.seed());
                if let Some(g) = &mut self.gpu {
                    g.set_cloud(&self.cloud);
                }
            }
        }
        if self.seen_generation != Some(generation) {
            self.seen_generation = Some(generation);
            controls::refresh_generation(&self.document, generation);
        }
        if self.seen_mode != Some(mode) {
            self.seen_mode = Some(mode);
            controls::refresh_mode(&self.document, mode);
        }

        let smoothed = *self.smoother.tick(&input, &params, dt_sec);

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            let uniforms = ParticleUniforms::new(&smoothed, &camera, time_sec, g.size(), g.srgb_target());
            match g.render(&uniforms) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => g.reconfigure(),
                Err(e) => log::error!("[gpu] render error: {:?}", e),
            }
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    cloud: &ParticleCloud,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, cloud).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
