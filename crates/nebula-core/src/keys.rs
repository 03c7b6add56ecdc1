//! Keyboard shortcuts shared by both frontends. Keys arrive as the platform's
//! logical key string (`KeyboardEvent.key` on the web, winit's character keys
//! natively).

use crate::params::{presets, Preset};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    TogglePanel,
    ToggleInputMode,
    /// Index into [`presets`].
    Preset(usize),
}

pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        "h" | "H" => Some(KeyAction::TogglePanel),
        "m" | "M" => Some(KeyAction::ToggleInputMode),
        "1" => Some(KeyAction::Preset(0)),
        "2" => Some(KeyAction::Preset(1)),
        "3" => Some(KeyAction::Preset(2)),
        "4" => Some(KeyAction::Preset(3)),
        _ => None,
    }
}

pub fn preset_for(action: KeyAction) -> Option<Preset> {
    match action {
        KeyAction::Preset(i) => presets().into_iter().nth(i),
        _ => None,
    }
}
