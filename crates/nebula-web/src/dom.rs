use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Listen for `input` events on an `<input>` and hand its current value to `handler`.
pub fn add_input_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut(String) + 'static,
) {
    let Some(input) = input_by_id(document, element_id) else {
        log::warn!("[ui] missing #{}", element_id);
        return;
    };
    let target = input.clone();
    let closure = Closure::wrap(Box::new(move || handler(target.value())) as Box<dyn FnMut()>);
    let _ = input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
    closure.forget();
}

#[inline]
pub fn input_by_id(document: &web::Document, id: &str) -> Option<web::HtmlInputElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
}

pub fn set_disabled(document: &web::Document, id: &str, disabled: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        if disabled {
            _ = el.set_attribute("disabled", "");
        } else {
            _ = el.remove_attribute("disabled");
        }
    }
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// `window.NEBULA_CONFIG`, if the page defines one.
pub fn page_config() -> Option<JsValue> {
    let window = web::window()?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str("NEBULA_CONFIG")).ok()?;
    (!value.is_undefined() && !value.is_null()).then_some(value)
}

/// String property of a JS object, if present and non-empty.
pub fn string_prop(obj: &JsValue, key: &str) -> Option<String> {
    js_sys::Reflect::get(obj, &JsValue::from_str(key))
        .ok()?
        .as_string()
        .filter(|s| !s.trim().is_empty())
}

#[inline]
pub fn now_ms() -> f64 {
    web::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
