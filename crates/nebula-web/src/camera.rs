//! Webcam stream behind the `<video>` preview element.

use js_sys::{Object, Promise, Reflect};
use nebula_core::{TrackerConfig, TrackingError, VideoSource};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

// HTMLMediaElement.HAVE_CURRENT_DATA
const HAVE_CURRENT_DATA: u16 = 2;
const READY_TIMEOUT_MS: i32 = 10_000;
const SUPERSEDED: &str = "setup superseded";

pub struct WebVideo {
    element: web::HtmlVideoElement,
    stream: web::MediaStream,
}

impl WebVideo {
    pub fn element(&self) -> &web::HtmlVideoElement {
        &self.element
    }
}

impl VideoSource for WebVideo {
    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn release(&mut self) {
        stop_tracks(&self.stream);
        // a newer session may already own the element
        if self
            .element
            .src_object()
            .is_some_and(|s| Object::is(&s, &self.stream))
        {
            self.element.set_src_object(None);
        }
        log::info!("[camera] stream released");
    }
}

fn stop_tracks(stream: &web::MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<web::MediaStreamTrack>() {
            track.stop();
        }
    }
}

fn camera_err(e: JsValue) -> TrackingError {
    TrackingError::Camera(format!("{:?}", e))
}

fn constraints(cfg: &TrackerConfig) -> Result<web::MediaStreamConstraints, JsValue> {
    let frame_rate = Object::new();
    Reflect::set(&frame_rate, &"ideal".into(), &cfg.frame_rate.into())?;
    let video = Object::new();
    Reflect::set(&video, &"width".into(), &cfg.width.into())?;
    Reflect::set(&video, &"height".into(), &cfg.height.into())?;
    Reflect::set(&video, &"frameRate".into(), &frame_rate)?;
    let root = Object::new();
    Reflect::set(&root, &"video".into(), &video)?;
    Reflect::set(&root, &"audio".into(), &JsValue::FALSE)?;
    Ok(root.unchecked_into())
}

/// Request the camera, attach it to `element` and wait for the first frame.
///
/// `is_current` is checked after each wait. Once it turns false the stream is
/// stopped and a `Camera` error is returned; an element already handed to a
/// newer stream is left alone.
pub async fn open(
    element: &web::HtmlVideoElement,
    cfg: &TrackerConfig,
    is_current: impl Fn() -> bool,
) -> Result<WebVideo, TrackingError> {
    let window = web::window().ok_or_else(|| TrackingError::Camera("no window".into()))?;
    let devices = window.navigator().media_devices().map_err(camera_err)?;
    let promise = devices
        .get_user_media_with_constraints(&constraints(cfg).map_err(camera_err)?)
        .map_err(camera_err)?;
    let stream: web::MediaStream = JsFuture::from(promise)
        .await
        .map_err(camera_err)?
        .dyn_into()
        .map_err(camera_err)?;
    if !is_current() {
        stop_tracks(&stream);
        return Err(TrackingError::Camera(SUPERSEDED.into()));
    }
    element.set_src_object(Some(&stream));
    let mut video = WebVideo {
        element: element.clone(),
        stream,
    };
    if let Err(e) = wait_for_data(&window, element).await {
        video.release();
        return Err(camera_err(e));
    }
    if !is_current() {
        video.release();
        return Err(TrackingError::Camera(SUPERSEDED.into()));
    }
    log::info!(
        "[camera] streaming {}x{}",
        element.video_width(),
        element.video_height()
    );
    Ok(video)
}

/// Resolve on the element's next `loadeddata`, reject on `error` or after
/// [`READY_TIMEOUT_MS`]. Listeners are one-shot, so overlapping waits on the
/// same element do not displace each other.
async fn wait_for_data(window: &web::Window, element: &web::HtmlVideoElement) -> Result<(), JsValue> {
    if element.ready_state() < HAVE_CURRENT_DATA {
        let once = web::AddEventListenerOptions::new();
        once.set_once(true);
        let mut setup = Ok(());
        let loaded = Promise::new(&mut |resolve, reject| {
            setup = element
                .add_event_listener_with_callback_and_add_event_listener_options(
                    "loadeddata",
                    &resolve,
                    &once,
                )
                .and_then(|_| {
                    element.add_event_listener_with_callback_and_add_event_listener_options(
                        "error", &reject, &once,
                    )
                })
                .and_then(|_| {
                    window
                        .set_timeout_with_callback_and_timeout_and_arguments_0(
                            &reject,
                            READY_TIMEOUT_MS,
                        )
                        .map(|_| ())
                });
        });
        setup?;
        JsFuture::from(loaded).await?;
    }
    // autoplay may already be running; a rejected play() is not fatal
    if let Ok(p) = element.play() {
        _ = JsFuture::from(p).await;
    }
    Ok(())
}
