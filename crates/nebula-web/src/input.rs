use glam::Vec2;
use nebula_core::pixel_to_ndc;
use web_sys as web;

/// Latest pointer position over the canvas.
#[derive(Default, Clone, Copy)]
pub struct MouseState {
    /// Normalized device coordinates, +y up.
    pub ndc: Vec2,
}

/// Orbit drag in progress.
#[derive(Default, Clone, Copy)]
pub struct DragState {
    pub active: bool,
    pub pointer_id: i32,
    pub last_client: Vec2,
}

impl DragState {
    /// Record a new client position and return the movement since the last one.
    pub fn step(&mut self, client: Vec2) -> Vec2 {
        let delta = client - self.last_client;
        self.last_client = client;
        delta
    }
}

#[inline]
pub fn pointer_ndc(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let pos = Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    );
    pixel_to_ndc(pos, Vec2::new(rect.width() as f32, rect.height() as f32))
}

#[inline]
pub fn client_pos(ev: &web::PointerEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

const WHEEL_PIXELS_PER_NOTCH: f64 = 100.0;
const WHEEL_LINES_PER_NOTCH: f64 = 3.0;
const WHEEL_MAX_NOTCHES: f32 = 5.0;

/// Zoom notches for a wheel event; positive zooms in (wheel up).
///
/// `delta_mode` follows `WheelEvent.deltaMode`: 0 pixels, 1 lines, 2 pages.
#[inline]
pub fn wheel_notches(delta_y: f64, delta_mode: u32) -> f32 {
    let notches = match delta_mode {
        0 => delta_y / WHEEL_PIXELS_PER_NOTCH,
        1 => delta_y / WHEEL_LINES_PER_NOTCH,
        _ => delta_y,
    };
    if !notches.is_finite() {
        return 0.0;
    }
    (-notches as f32).clamp(-WHEEL_MAX_NOTCHES, WHEEL_MAX_NOTCHES)
}
