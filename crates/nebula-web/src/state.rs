//! Page-wide state shared by the render loop, the tracking loop and the DOM
//! handlers. Everything runs on the browser's main thread, so it lives in a
//! single `Rc<RefCell<AppState>>`.

use crate::dom;
use crate::input::{DragState, MouseState};
use nebula_core::{
    AppConfig, GenerationController, InputMode, InteractionInput, InteractionSignal,
    ModeController, OrbitControls, ParameterStore, SignalReader,
};
use std::cell::RefCell;
use std::rc::Rc;

pub type SharedState = Rc<RefCell<AppState>>;

pub struct AppState {
    pub config: AppConfig,
    pub api_key: Option<String>,
    pub store: ParameterStore,
    pub mode: ModeController,
    pub generation: GenerationController,
    pub mouse: MouseState,
    pub drag: DragState,
    pub orbit: OrbitControls,
    /// Reader end of the current camera session's slot.
    pub hands: Option<SignalReader>,
    /// Bumped whenever a camera session should end; loops compare against
    /// the value they started with.
    pub camera_epoch: u64,
}

impl AppState {
    pub fn new(config: AppConfig, api_key: Option<String>) -> anyhow::Result<Self> {
        let store = ParameterStore::new(config.initial.clone())
            .map_err(|e| anyhow::anyhow!("initial parameters: {}", e))?;
        Ok(Self {
            generation: GenerationController::new(config.generator.clone()),
            config,
            api_key,
            store,
            mode: ModeController::new(),
            mouse: MouseState::default(),
            drag: DragState::default(),
            orbit: OrbitControls::default(),
            hands: None,
            camera_epoch: 0,
        })
    }

    /// What drives the interaction point this frame.
    pub fn interaction_input(&self) -> InteractionInput {
        match self.mode.mode() {
            // still loading: behaves like an empty frame
            InputMode::Camera => InteractionInput::Hands(
                self.hands
                    .as_ref()
                    .map(SignalReader::latest)
                    .unwrap_or(InteractionSignal::IDLE),
            ),
            InputMode::Pointer => {
                InteractionInput::Pointer(self.config.mapping.pointer_to_world(self.mouse.ndc))
            }
        }
    }

    /// End any running camera session and return the new epoch.
    pub fn end_camera_session(&mut self) -> u64 {
        self.camera_epoch += 1;
        self.hands = None;
        self.camera_epoch
    }
}

/// Read `window.NEBULA_CONFIG = { config: {...}, apiKey: "..." }`.
///
/// A missing or invalid config falls back to defaults; an invalid one is logged.
pub fn load_page_config() -> (AppConfig, Option<String>) {
    let Some(page) = dom::page_config() else {
        return (AppConfig::default(), None);
    };
    let api_key = dom::string_prop(&page, "apiKey");
    let config = js_sys::Reflect::get(&page, &"config".into())
        .ok()
        .filter(|v| v.is_object())
        .and_then(|v| js_sys::JSON::stringify(&v).ok())
        .and_then(|s| s.as_string())
        .map(|text| {
            AppConfig::from_json(&text).unwrap_or_else(|e| {
                log::error!("[config] ignoring page config: {}", e);
                AppConfig::default()
            })
        })
        .unwrap_or_default();
    (config, api_key)
}
