use crate::hands;
use crate::input;
use crate::overlay;
use crate::state::SharedState;
use nebula_core::{key_action, preset_for, InputMode, KeyAction};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub state: SharedState,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_pointerdown(&w);
    wire_pointerup(&w);
    wire_wheel(&w);
    wire_keydown(&w);
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let ndc = input::pointer_ndc(&ev, &w.canvas);
        let mut st = w.state.borrow_mut();
        st.mouse.ndc = ndc;
        if st.drag.active && st.drag.pointer_id == ev.pointer_id() {
            let delta = st.drag.step(input::client_pos(&ev));
            st.orbit.drag(delta);
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        {
            let mut st = w.state.borrow_mut();
            st.drag.active = true;
            st.drag.pointer_id = ev.pointer_id();
            st.drag.last_client = input::client_pos(&ev);
        }
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let mut st = w.state.borrow_mut();
        if st.drag.pointer_id == ev.pointer_id() {
            st.drag.active = false;
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_wheel(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let notches = input::wheel_notches(ev.delta_y(), ev.delta_mode());
        if notches != 0.0 {
            w.state.borrow_mut().orbit.zoom(notches);
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Keys typed into form fields are not shortcuts.
fn typing_in_field(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .map(|el| matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA"))
        .unwrap_or(false)
}

fn wire_keydown(w: &InputWiring) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        if ev.repeat() || ev.ctrl_key() || ev.meta_key() || typing_in_field(&ev) {
            return;
        }
        let Some(action) = key_action(&ev.key()) else {
            return;
        };
        match action {
            KeyAction::TogglePanel => overlay::toggle(&w.document, "controls-panel"),
            KeyAction::ToggleInputMode => {
                let next = match w.state.borrow().mode.mode() {
                    InputMode::Pointer => InputMode::Camera,
                    InputMode::Camera => InputMode::Pointer,
                };
                hands::select_mode(&w.state, next);
            }
            KeyAction::Preset(_) => {
                if let Some(preset) = preset_for(action) {
                    log::info!("[key] preset {}", preset.name);
                    if let Err(e) = w.state.borrow_mut().store.apply_preset(&preset) {
                        log::error!("[key] preset rejected: {}", e);
                    }
                }
            }
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
