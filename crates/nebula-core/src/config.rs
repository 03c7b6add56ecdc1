//! Application configuration shared by the web and native frontends.
//!
//! Every field has a default, so an empty JSON object (or no config at all)
//! yields the stock behavior.

use crate::constants::MAX_TRACKED_HANDS;
use crate::error::ConfigError;
use crate::generate::GeneratorConfig;
use crate::gesture::ClassifierThresholds;
use crate::interaction::WorldMapping;
use crate::params::VisualParameters;
use crate::smoothing::SmootherConfig;
use crate::tracking::SessionOptions;
use serde::{Deserialize, Serialize};

/// Camera constraints and hand-model options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub width: u32,
    pub height: u32,
    pub frame_rate: u32,
    pub num_hands: u32,
    pub min_confidence: f32,
    pub wasm_root: String,
    pub model_url: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            frame_rate: 60,
            num_hands: MAX_TRACKED_HANDS as u32,
            min_confidence: 0.5,
            wasm_root: "https://cdn.jsdelivr.net/npm/@mediapipe/tasks-vision@0.10.14/wasm".into(),
            model_url: "https://storage.googleapis.com/mediapipe-models/hand_landmarker/hand_landmarker/float16/1/hand_landmarker.task".into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub smoother: SmootherConfig,
    pub thresholds: ClassifierThresholds,
    pub mapping: WorldMapping,
    pub tracker: TrackerConfig,
    pub generator: GeneratorConfig,
    pub initial: VisualParameters,
    /// Seed for particle placement; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl AppConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let cfg: AppConfig = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason: &str| ConfigError::Invalid {
            field,
            reason: reason.to_string(),
        };
        let rates = &self.smoother.rates;
        for (field, rate) in [
            ("smoother.rates.position", rates.position),
            ("smoother.rates.force", rates.force),
            ("smoother.rates.dispersion", rates.dispersion),
            ("smoother.rates.cosmetic", rates.cosmetic),
        ] {
            if !(rate > 0.0 && rate <= 1.0) {
                return Err(invalid(field, "must be in (0, 1]"));
            }
        }
        let forces = &self.smoother.forces;
        if !(forces.separation_min <= forces.separation_max) {
            return Err(invalid(
                "smoother.forces.separation_min",
                "must not exceed separation_max",
            ));
        }
        if !(self.thresholds.pinch > 0.0) {
            return Err(invalid("thresholds.pinch", "must be positive"));
        }
        if self.thresholds.fist_min_folded == 0 || self.thresholds.fist_min_folded > 4 {
            return Err(invalid("thresholds.fist_min_folded", "must be 1..=4"));
        }
        let tracker = &self.tracker;
        if tracker.width == 0 || tracker.height == 0 {
            return Err(invalid("tracker", "resolution must be non-zero"));
        }
        if tracker.num_hands == 0 {
            return Err(invalid("tracker.num_hands", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&tracker.min_confidence) {
            return Err(invalid("tracker.min_confidence", "must be in [0, 1]"));
        }
        if self.generator.model.trim().is_empty() {
            return Err(invalid("generator.model", "must not be empty"));
        }
        self.initial
            .validate()
            .map_err(|e| invalid("initial", &e.to_string()))?;
        Ok(())
    }

    /// The configured particle seed, or a fresh random one.
    pub fn particle_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            thresholds: self.thresholds,
            mapping: self.mapping,
        }
    }
}
