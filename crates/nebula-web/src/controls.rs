//! Controls panel: sliders, color pickers, presets, the prompt form and the
//! input-mode buttons. Handlers write into the shared state; the render loop
//! pushes store and controller changes back into the DOM.

use crate::ai;
use crate::dom;
use crate::hands;
use crate::overlay;
use crate::state::SharedState;
use nebula_core::{presets, ColorSlot, Field, GenerationState, InputMode, VisualParameters};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const COLOR_SLOTS: [ColorSlot; 2] = [ColorSlot::Start, ColorSlot::End];

fn slider_id(field: Field) -> String {
    format!("slider-{}", field.name())
}

fn value_id(field: Field) -> String {
    format!("value-{}", field.name())
}

fn color_id(slot: ColorSlot) -> String {
    format!("color-{}", slot.name())
}

pub fn format_value(field: Field, v: f64) -> String {
    match field {
        Field::Count => format!("{:.0}", v),
        _ => format!("{:.2}", v),
    }
}

pub fn wire_controls(state: &SharedState, document: &web::Document) {
    wire_sliders(state, document);
    wire_colors(state, document);
    wire_presets(state, document);
    wire_prompt(state, document);
    wire_mode_buttons(state, document);
    dom::add_click_listener(document, "panel-toggle", {
        let document = document.clone();
        move || overlay::toggle(&document, "controls-panel")
    });
}

fn wire_sliders(state: &SharedState, document: &web::Document) {
    for field in Field::ALL {
        let id = slider_id(field);
        if let Some(input) = dom::input_by_id(document, &id) {
            let range = field.range();
            input.set_min(&range.min.to_string());
            input.set_max(&range.max.to_string());
            input.set_step(&field.step().to_string());
        }
        let state = state.clone();
        dom::add_input_listener(document, &id, move |raw| {
            let Ok(v) = raw.parse::<f64>() else {
                log::warn!("[ui] {} ignored non-numeric {:?}", field.name(), raw);
                return;
            };
            if let Err(e) = state.borrow_mut().store.set_field(field, v) {
                log::warn!("[ui] {}", e);
            }
        });
    }
}

fn wire_colors(state: &SharedState, document: &web::Document) {
    for slot in COLOR_SLOTS {
        let state = state.clone();
        dom::add_input_listener(document, &color_id(slot), move |hex| {
            if let Err(e) = state.borrow_mut().store.set_color(slot, &hex) {
                log::warn!("[ui] {}", e);
            }
        });
    }
}

fn wire_presets(state: &SharedState, document: &web::Document) {
    let Some(list) = document.get_element_by_id("preset-list") else {
        return;
    };
    for preset in presets() {
        let Ok(button) = document.create_element("button") else {
            continue;
        };
        button.set_text_content(Some(preset.name));
        _ = button.set_attribute("type", "button");
        _ = button.class_list().add_1("preset");
        let state = state.clone();
        let closure = Closure::wrap(Box::new(move || {
            match state.borrow_mut().store.apply_preset(&preset) {
                Ok(()) => log::info!("[ui] preset {}", preset.name),
                Err(e) => log::error!("[ui] preset {} rejected: {}", preset.name, e),
            }
        }) as Box<dyn FnMut()>);
        _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
        _ = list.append_child(&button);
    }
}

fn wire_prompt(state: &SharedState, document: &web::Document) {
    let Some(form) = document.get_element_by_id("prompt-form") else {
        return;
    };
    let state = state.clone();
    let document = document.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        ev.prevent_default();
        let prompt = dom::input_by_id(&document, "prompt-input")
            .map(|i| i.value())
            .unwrap_or_default();
        ai::submit(&state, &prompt);
    }) as Box<dyn FnMut(_)>);
    _ = form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_mode_buttons(state: &SharedState, document: &web::Document) {
    for (id, mode) in [("mode-mouse", InputMode::Pointer), ("mode-camera", InputMode::Camera)] {
        let state = state.clone();
        dom::add_click_listener(document, id, move || hands::select_mode(&state, mode));
    }
}

/// Push the store's values into sliders, labels and color inputs.
pub fn refresh_params(document: &web::Document, params: &VisualParameters) {
    for field in Field::ALL {
        let v = params.get(field);
        if let Some(input) = dom::input_by_id(document, &slider_id(field)) {
            input.set_value(&v.to_string());
        }
        overlay::set_text(document, &value_id(field), &format_value(field, v));
    }
    for slot in COLOR_SLOTS {
        if let Some(input) = dom::input_by_id(document, &color_id(slot)) {
            input.set_value(&params.color(slot).to_string());
        }
    }
}

pub fn refresh_generation(document: &web::Document, state: GenerationState) {
    let busy = state == GenerationState::Generating;
    dom::set_disabled(document, "generate-btn", busy);
    dom::set_disabled(document, "prompt-input", busy);
    overlay::set_text(
        document,
        "generate-btn",
        if busy { "Generating..." } else { "Generate" },
    );
    if matches!(state, GenerationState::Error { .. }) {
        overlay::show(document, "ai-error");
    } else {
        overlay::hide(document, "ai-error");
    }
}

pub fn refresh_mode(document: &web::Document, mode: InputMode) {
    for (id, m) in [("mode-mouse", InputMode::Pointer), ("mode-camera", InputMode::Camera)] {
        if let Some(el) = document.get_element_by_id(id) {
            _ = el.class_list().toggle_with_force("active", m == mode);
        }
    }
    overlay::set_text(document, "mode-label", &overlay::mode_button_text(mode));
}
