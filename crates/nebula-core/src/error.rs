//! Error types for the core crate.
//!
//! Nothing here is fatal: every failure leaves the caller on its previous good
//! state (previous parameters, pointer input, idle generation).

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LandmarkError {
    #[error("expected {expected} landmarks per hand, got {got}")]
    WrongCount { expected: usize, got: usize },
    #[error("landmark {index} is not finite")]
    NotFinite { index: usize },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParamError {
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{field} must be finite")]
    NotFinite { field: &'static str },
    #[error("invalid hex color {0:?}")]
    BadColor(String),
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("API key is missing")]
    MissingApiKey,
    #[error("empty prompt")]
    EmptyPrompt,
    #[error("a generation request is already in flight")]
    Busy,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("no text in model response")]
    EmptyResponse,
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("response out of range: {0}")]
    Invalid(#[from] ParamError),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrackingError {
    #[error("camera unavailable: {0}")]
    Camera(String),
    #[error("hand model failed to load: {0}")]
    Model(String),
    #[error("hand detection failed: {0}")]
    Detect(String),
    #[error(transparent)]
    Landmarks(#[from] LandmarkError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config value {field} invalid: {reason}")]
    Invalid { field: &'static str, reason: String },
}
