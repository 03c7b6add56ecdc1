// DOM overlays: the controls panel visibility, the tracking status line and
// the hand-skeleton preview drawn over the mirrored webcam video.

use glam::Vec2;
use nebula_core::{
    HandLandmarks, InputMode, InteractionSignal, TrackingError, FINGERTIPS, HAND_CONNECTIONS,
    PALM_CENTER,
};
use web_sys as web;

pub const HAND_COLORS: [&str; 2] = ["#00ffff", "#ff00ff"];
const TIP_COLOR: &str = "#ffffff";
const BONE_ALPHA: f64 = 0.7;
const LINK_COLOR: &str = "#ffffff";
const MIDPOINT_COLOR: &str = "#ffff00";
const LINK_DASH_PX: f64 = 5.0;

pub const CAMERA_ERROR_MESSAGE: &str = "Camera access denied or model failed to load.";
pub const DETECTION_ERROR_MESSAGE: &str = "Hand tracking stopped: the detector failed on a video frame.";

/// Banner text for a tracking failure. Setup failures and mid-session
/// detector failures read differently.
pub fn failure_message(err: &TrackingError) -> &'static str {
    match err {
        TrackingError::Camera(_) | TrackingError::Model(_) => CAMERA_ERROR_MESSAGE,
        TrackingError::Detect(_) | TrackingError::Landmarks(_) => DETECTION_ERROR_MESSAGE,
    }
}

#[inline]
pub fn show(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        _ = el.class_list().remove_1("hidden");
        // fallback for environments without CSS class
        _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        _ = el.class_list().add_1("hidden");
        _ = el.set_attribute("style", "display:none");
    }
}

#[inline]
pub fn is_hidden(document: &web::Document, id: &str) -> bool {
    if let Some(el) = document.get_element_by_id(id) {
        if el.class_list().contains("hidden") {
            return true;
        }
        return el
            .get_attribute("style")
            .map(|s| s.contains("display:none"))
            .unwrap_or(false);
    }
    false
}

#[inline]
pub fn toggle(document: &web::Document, id: &str) {
    if is_hidden(document, id) {
        show(document, id);
    } else {
        hide(document, id);
    }
}

/// Gesture badge text, e.g. `FIST` or `SEARCHING`.
pub fn gesture_text(signal: &InteractionSignal) -> &'static str {
    signal.gesture.label()
}

/// Hand-count badge text; empty when no hand is visible.
pub fn hands_text(signal: &InteractionSignal) -> String {
    match signal.hand_count {
        0 => String::new(),
        n => format!("HANDS: {}", n),
    }
}

pub fn link_text(signal: &InteractionSignal) -> &'static str {
    if signal.hand_count >= 2 {
        "DUAL_LINK_ACTIVE"
    } else {
        "SINGLE_THREAD"
    }
}

pub fn mode_button_text(mode: InputMode) -> String {
    format!("Input: {}", mode.label())
}

/// Bone segments of one hand in canvas pixels.
pub fn skeleton_segments(hand: &HandLandmarks, width: f32, height: f32) -> Vec<(Vec2, Vec2)> {
    let scale = Vec2::new(width, height);
    HAND_CONNECTIONS
        .iter()
        .map(|&(a, b)| (hand.planar(a) * scale, hand.planar(b) * scale))
        .collect()
}

/// Palm-center link between two hands in canvas pixels: both ends and the midpoint.
pub fn palm_link(hands: &[HandLandmarks], width: f32, height: f32) -> Option<(Vec2, Vec2, Vec2)> {
    let [first, second] = hands else {
        return None;
    };
    let scale = Vec2::new(width, height);
    let a = first.planar(PALM_CENTER) * scale;
    let b = second.planar(PALM_CENTER) * scale;
    Some((a, b, (a + b) * 0.5))
}

pub fn update_status(document: &web::Document, signal: &InteractionSignal) {
    set_text(document, "gesture-label", gesture_text(signal));
    set_text(document, "hand-count", &hands_text(signal));
    set_text(document, "link-label", link_text(signal));
}

pub fn set_text(document: &web::Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

/// Redraw the preview canvas with the given hands. Coordinates are drawn
/// unmirrored; the page mirrors canvas and video together with CSS.
pub fn draw_hands(canvas: &web::HtmlCanvasElement, ctx: &web::CanvasRenderingContext2d, hands: &[HandLandmarks]) {
    let w = canvas.width() as f64;
    let h = canvas.height() as f64;
    ctx.clear_rect(0.0, 0.0, w, h);
    ctx.set_line_width(2.0);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
    for (hand, color) in hands.iter().zip(HAND_COLORS) {
        ctx.set_stroke_style_str(color);
        ctx.set_global_alpha(BONE_ALPHA);
        for (a, b) in skeleton_segments(hand, w as f32, h as f32) {
            ctx.begin_path();
            ctx.move_to(a.x as f64, a.y as f64);
            ctx.line_to(b.x as f64, b.y as f64);
            ctx.stroke();
        }
        ctx.set_global_alpha(1.0);
        for (i, p) in hand.points().iter().enumerate() {
            let tip = FINGERTIPS.contains(&i);
            ctx.set_fill_style_str(if tip { TIP_COLOR } else { color });
            ctx.begin_path();
            let r = if tip { 3.0 } else { 1.5 };
            _ = ctx.arc(p.x as f64 * w, p.y as f64 * h, r, 0.0, std::f64::consts::TAU);
            ctx.fill();
        }
    }
    if let Some((a, b, mid)) = palm_link(hands, w as f32, h as f32) {
        let dash = js_sys::Array::of2(&LINK_DASH_PX.into(), &LINK_DASH_PX.into());
        _ = ctx.set_line_dash(&dash);
        ctx.set_stroke_style_str(LINK_COLOR);
        ctx.begin_path();
        ctx.move_to(a.x as f64, a.y as f64);
        ctx.line_to(b.x as f64, b.y as f64);
        ctx.stroke();
        _ = ctx.set_line_dash(&js_sys::Array::new());
        ctx.set_fill_style_str(MIDPOINT_COLOR);
        ctx.begin_path();
        _ = ctx.arc(mid.x as f64, mid.y as f64, 5.0, 0.0, std::f64::consts::TAU);
        ctx.fill();
    }
}

pub fn clear_hands(canvas: &web::HtmlCanvasElement, ctx: &web::CanvasRenderingContext2d) {
    ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
}
