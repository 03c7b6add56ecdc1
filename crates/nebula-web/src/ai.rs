//! Prompt submission: one POST to the generative model, applied through the
//! generation controller.

use crate::dom;
use crate::state::{AppState, SharedState};
use nebula_core::{parse_response, GenerateError, GenerationRequest, VisualParameters};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

fn transport(e: JsValue) -> GenerateError {
    GenerateError::Transport(format!("{:?}", e))
}

async fn fetch_parameters(req: &GenerationRequest) -> Result<VisualParameters, GenerateError> {
    let opts = web::RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(web::RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&req.body));
    let request = web::Request::new_with_str_and_init(&req.url, &opts).map_err(transport)?;
    let headers = request.headers();
    headers.set("Content-Type", "application/json").map_err(transport)?;
    headers.set("x-goog-api-key", &req.api_key).map_err(transport)?;

    let window = web::window().ok_or_else(|| GenerateError::Transport("no window".into()))?;
    let response: web::Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport)?
        .dyn_into()
        .map_err(transport)?;
    if !response.ok() {
        return Err(GenerateError::Transport(format!("HTTP {}", response.status())));
    }
    let body = JsFuture::from(response.text().map_err(transport)?)
        .await
        .map_err(transport)?
        .as_string()
        .ok_or_else(|| GenerateError::Transport("response body is not text".into()))?;
    parse_response(&body)
}

/// Start a generation for `prompt`. Refusals (busy, empty prompt, no key) are
/// logged and reflected in the controller state; the request itself runs in
/// the background.
pub fn submit(state: &SharedState, prompt: &str) {
    let request = {
        let mut st = state.borrow_mut();
        let AppState {
            generation,
            api_key,
            ..
        } = &mut *st;
        generation.begin(prompt, api_key.as_deref(), dom::now_ms())
    };
    let request = match request {
        Ok(r) => r,
        Err(e) => {
            log::warn!("[ai] not generating: {}", e);
            return;
        }
    };
    let state = state.clone();
    spawn_local(async move {
        let result = fetch_parameters(&request).await;
        let mut st = state.borrow_mut();
        let AppState {
            generation, store, ..
        } = &mut *st;
        // failures are logged and held in the controller state
        _ = generation.finish(result, store, dom::now_ms());
    });
}
