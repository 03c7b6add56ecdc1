//! Camera-mode lifecycle: acquire the stream and the hand model, run the
//! per-video-frame detection loop, and fall back to the pointer on failure.

use crate::camera::{self, WebVideo};
use crate::dom;
use crate::overlay;
use crate::state::SharedState;
use glam::Vec3;
use js_sys::{Array, Object, Reflect};
use nebula_core::{
    signal_slot, HandDetector, HandLandmarks, Hands, InputMode, PendingSession, TrackerConfig,
    TrackingError, TrackingSession, MAX_TRACKED_HANDS,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

#[wasm_bindgen]
extern "C" {
    /// MediaPipe `HandLandmarker`, created by the page glue.
    pub type HandLandmarker;

    #[wasm_bindgen(catch, js_name = nebulaCreateHandLandmarker)]
    fn create_hand_landmarker(options: &JsValue) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(method, catch, js_name = detectForVideo)]
    fn detect_for_video(
        this: &HandLandmarker,
        video: &web::HtmlVideoElement,
        timestamp_ms: f64,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method)]
    fn close(this: &HandLandmarker);
}

pub struct WebHandDetector {
    landmarker: HandLandmarker,
}

impl HandDetector<WebVideo> for WebHandDetector {
    fn detect(&mut self, video: &WebVideo, timestamp_ms: f64) -> Result<Hands, TrackingError> {
        let result = self
            .landmarker
            .detect_for_video(video.element(), timestamp_ms)
            .map_err(|e| TrackingError::Detect(format!("{:?}", e)))?;
        parse_landmarks(&result)
    }

    fn close(&mut self) {
        self.landmarker.close();
        log::info!("[hands] model closed");
    }
}

fn model_options(cfg: &TrackerConfig) -> Result<JsValue, JsValue> {
    let o = Object::new();
    Reflect::set(&o, &"wasmRoot".into(), &cfg.wasm_root.as_str().into())?;
    Reflect::set(&o, &"modelAssetPath".into(), &cfg.model_url.as_str().into())?;
    Reflect::set(&o, &"numHands".into(), &cfg.num_hands.into())?;
    let conf = JsValue::from_f64(cfg.min_confidence as f64);
    Reflect::set(&o, &"minHandDetectionConfidence".into(), &conf)?;
    Reflect::set(&o, &"minHandPresenceConfidence".into(), &conf)?;
    Reflect::set(&o, &"minTrackingConfidence".into(), &conf)?;
    Ok(o.into())
}

async fn load_model(cfg: &TrackerConfig) -> Result<WebHandDetector, TrackingError> {
    let model_err = |e: JsValue| TrackingError::Model(format!("{:?}", e));
    let options = model_options(cfg).map_err(model_err)?;
    let landmarker = JsFuture::from(create_hand_landmarker(&options).map_err(model_err)?)
        .await
        .map_err(model_err)?;
    log::info!("[hands] model ready");
    Ok(WebHandDetector {
        landmarker: landmarker.unchecked_into(),
    })
}

fn coord(point: &JsValue, key: &str) -> f32 {
    Reflect::get(point, &key.into())
        .ok()
        .and_then(|v| v.as_f64())
        .map(|v| v as f32)
        .unwrap_or(f32::NAN)
}

/// `{ landmarks: [[{x, y, z}, ...], ...] }` into at most two hands.
fn parse_landmarks(result: &JsValue) -> Result<Hands, TrackingError> {
    let list = Reflect::get(result, &"landmarks".into()).unwrap_or(JsValue::UNDEFINED);
    if !Array::is_array(&list) {
        return Ok(Hands::new());
    }
    let mut hands = Hands::new();
    for hand in Array::from(&list).iter().take(MAX_TRACKED_HANDS) {
        let points: Vec<Vec3> = Array::from(&hand)
            .iter()
            .map(|p| Vec3::new(coord(&p, "x"), coord(&p, "y"), coord(&p, "z")))
            .collect();
        hands.push(HandLandmarks::from_points(&points)?);
    }
    Ok(hands)
}

/// Switch input mode from the UI, starting or ending the camera session.
pub fn select_mode(state: &SharedState, mode: InputMode) {
    let epoch = {
        let mut st = state.borrow_mut();
        if !st.mode.select(mode) {
            return;
        }
        st.end_camera_session()
    };
    let Some(document) = dom::window_document() else {
        return;
    };
    match mode {
        InputMode::Camera => {
            overlay::hide(&document, "error-banner");
            overlay::show(&document, "tracker-panel");
            overlay::show(&document, "tracker-loading");
            let state = state.clone();
            spawn_local(async move {
                match start_session(&state, epoch).await {
                    Ok(Some(session)) => start_tracking_loop(state, session, epoch),
                    Ok(None) => log::info!("[hands] setup superseded"),
                    // a newer selection owns the mode now
                    Err(e) if superseded(&state, epoch) => {
                        log::info!("[hands] abandoned setup failed: {}", e)
                    }
                    Err(e) => report_failure(&state, e),
                }
            });
        }
        InputMode::Pointer => overlay::hide(&document, "tracker-panel"),
    }
}

type WebSession = TrackingSession<WebVideo, WebHandDetector>;

fn superseded(state: &SharedState, epoch: u64) -> bool {
    let st = state.borrow();
    st.camera_epoch != epoch || st.mode.mode() != InputMode::Camera
}

async fn start_session(state: &SharedState, epoch: u64) -> Result<Option<WebSession>, TrackingError> {
    let (cfg, options) = {
        let st = state.borrow();
        (st.config.tracker.clone(), st.config.session_options())
    };
    let video_el = dom::window_document()
        .and_then(|d| d.get_element_by_id("hand-video"))
        .and_then(|el| el.dyn_into::<web::HtmlVideoElement>().ok())
        .ok_or_else(|| TrackingError::Camera("missing #hand-video".into()))?;

    let video = camera::open(&video_el, &cfg, || !superseded(state, epoch)).await?;
    let pending = PendingSession::new().with_video(video);
    if superseded(state, epoch) {
        return Ok(None);
    }
    let pending = pending.with_detector(load_model(&cfg).await?);
    if superseded(state, epoch) {
        return Ok(None);
    }
    let (writer, reader) = signal_slot();
    let session = pending.finish(writer, options)?;
    state.borrow_mut().hands = Some(reader);
    Ok(Some(session))
}

fn report_failure(state: &SharedState, err: TrackingError) {
    log::error!("[hands] {}", err);
    {
        let mut st = state.borrow_mut();
        st.end_camera_session();
        st.mode.tracking_failed(err.clone());
    }
    if let Some(document) = dom::window_document() {
        overlay::hide(&document, "tracker-panel");
        overlay::set_text(&document, "error-banner", overlay::failure_message(&err));
        overlay::show(&document, "error-banner");
    }
}

struct Preview {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl Preview {
    fn find(document: &web::Document, width: u32, height: u32) -> Option<Self> {
        let canvas = document
            .get_element_by_id("hand-overlay")?
            .dyn_into::<web::HtmlCanvasElement>()
            .ok()?;
        canvas.set_width(width);
        canvas.set_height(height);
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<web::CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }
}

struct TrackingLoop {
    state: SharedState,
    epoch: u64,
    session: Option<WebSession>,
    preview: Option<Preview>,
}

impl TrackingLoop {
    /// One animation frame. Returns false once the loop should stop.
    fn tick(&mut self) -> bool {
        if superseded(&self.state, self.epoch) {
            self.finish();
            return false;
        }
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        match session.process_frame(dom::now_ms()) {
            Ok(Some(_)) => {
                if let Some(p) = &self.preview {
                    overlay::draw_hands(&p.canvas, &p.ctx, session.last_hands());
                }
                true
            }
            Ok(None) => true,
            // one malformed result skips the frame
            Err(TrackingError::Landmarks(e)) => {
                log::warn!("[hands] frame skipped: {}", e);
                true
            }
            Err(e) => {
                self.finish();
                report_failure(&self.state, e);
                false
            }
        }
    }

    fn finish(&mut self) {
        // dropping the session releases camera and model
        self.session = None;
        if let Some(p) = &self.preview {
            overlay::clear_hands(&p.canvas, &p.ctx);
        }
    }
}

fn start_tracking_loop(state: SharedState, session: WebSession, epoch: u64) {
    let Some(document) = dom::window_document() else {
        return;
    };
    let (w, h) = {
        let st = state.borrow();
        (st.config.tracker.width, st.config.tracker.height)
    };
    overlay::hide(&document, "tracker-loading");
    log::info!("[hands] tracking started");
    let tracker = Rc::new(RefCell::new(TrackingLoop {
        preview: Preview::find(&document, w, h),
        state,
        epoch,
        session: Some(session),
    }));

    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !tracker.borrow_mut().tick() {
            return;
        }
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
