//! Text-to-parameters generation: request building, response validation and
//! the Idle/Generating/Error controller around the external model.
//!
//! Transport is left to the frontend (browser `fetch`); everything that
//! decides whether a response is acceptable lives here.

use crate::constants::GENERATION_ERROR_RECOVERY_MS;
use crate::error::GenerateError;
use crate::params::{ParameterStore, VisualParameters};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const SYSTEM_INSTRUCTION: &str = "\
You are a specialized visual effects copilot. Your job is to translate natural language \
descriptions of visual effects into a specific JSON configuration for a 3D particle system.

The particle system has the following parameters:
- count: Integer (1000 to 20000). Higher means denser.
- size: Float (0.1 to 3.0). Particle size.
- speed: Float (0.0 to 5.0). Animation speed.
- noiseStrength: Float (0.0 to 5.0). Turbulence/Chaos factor.
- colorStart: Hex String. Inner/Primary color.
- colorEnd: Hex String. Outer/Secondary color.
- dispersion: Float (1.0 to 15.0). How spread out the particles are.
- shapeBias: Float (0.0 to 1.0). 0.0 tends towards spherical/ordered, 1.0 tends towards cubic/chaotic.

Interpret the user's poetic or technical description and output the JSON.
If the user asks for \"fire\", think about reds, oranges, high speed, upward motion (simulated by noise).
If \"galaxy\", think purples, blues, rotation, spiral (simulated by noise/dispersion).
";

const REQUIRED_FIELDS: [&str; 8] = [
    "count",
    "size",
    "speed",
    "noiseStrength",
    "colorStart",
    "colorEnd",
    "dispersion",
    "shapeBias",
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub endpoint: String,
    pub model: String,
    pub recovery_ms: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".into(),
            model: "gemini-2.5-flash".into(),
            recovery_ms: GENERATION_ERROR_RECOVERY_MS,
        }
    }
}

impl GeneratorConfig {
    pub fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

/// A ready-to-send request. The API key travels as the `x-goog-api-key` header.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationRequest {
    pub url: String,
    pub api_key: String,
    pub body: String,
}

pub fn request_body(prompt: &str) -> serde_json::Value {
    let number = json!({ "type": "NUMBER" });
    json!({
        "systemInstruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
        "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "count": { "type": "INTEGER" },
                    "size": number,
                    "speed": number,
                    "noiseStrength": number,
                    "colorStart": { "type": "STRING" },
                    "colorEnd": { "type": "STRING" },
                    "dispersion": number,
                    "shapeBias": number,
                },
                "required": REQUIRED_FIELDS,
            },
        },
    })
}

#[derive(Deserialize)]
struct ResponseEnvelope {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

/// Extract, parse and validate the parameters from a `generateContent` body.
///
/// Missing fields, wrong types, bad colors and out-of-range values are all
/// failures; nothing is clamped or partially applied.
pub fn parse_response(body: &str) -> Result<VisualParameters, GenerateError> {
    let envelope: ResponseEnvelope = serde_json::from_str(body)?;
    let text = envelope
        .candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
        .filter_map(|p| p.text)
        .find(|t| !t.trim().is_empty())
        .ok_or(GenerateError::EmptyResponse)?;
    parse_parameters(&text)
}

/// Parse the model's JSON text into validated parameters.
pub fn parse_parameters(text: &str) -> Result<VisualParameters, GenerateError> {
    let params: VisualParameters = serde_json::from_str(text.trim())?;
    params.validate()?;
    Ok(params)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GenerationState {
    Idle,
    Generating,
    /// Failure display; returns to idle `recovery_ms` after `since_ms`.
    Error { since_ms: f64 },
}

/// One request in flight at a time; failures clear themselves after a delay.
#[derive(Debug)]
pub struct GenerationController {
    state: GenerationState,
    config: GeneratorConfig,
}

impl GenerationController {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            state: GenerationState::Idle,
            config,
        }
    }

    pub fn state(&self) -> GenerationState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state == GenerationState::Generating
    }

    /// Start a request. An empty prompt or an outstanding request is refused
    /// without changing state; a missing key enters the error state.
    pub fn begin(
        &mut self,
        prompt: &str,
        api_key: Option<&str>,
        now_ms: f64,
    ) -> Result<GenerationRequest, GenerateError> {
        if self.is_busy() {
            return Err(GenerateError::Busy);
        }
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(GenerateError::EmptyPrompt);
        }
        let Some(api_key) = api_key.map(str::trim).filter(|k| !k.is_empty()) else {
            log::warn!("[ai] no API key configured");
            self.state = GenerationState::Error { since_ms: now_ms };
            return Err(GenerateError::MissingApiKey);
        };
        self.state = GenerationState::Generating;
        log::info!("[ai] generating for prompt {:?}", prompt);
        Ok(GenerationRequest {
            url: self.config.url(),
            api_key: api_key.to_string(),
            body: request_body(prompt).to_string(),
        })
    }

    /// Settle the outstanding request. On success the store is replaced as a
    /// whole; on failure it is left untouched.
    pub fn finish(
        &mut self,
        result: Result<VisualParameters, GenerateError>,
        store: &mut ParameterStore,
        now_ms: f64,
    ) -> Result<(), GenerateError> {
        let applied = result.and_then(|params| store.replace(params).map_err(GenerateError::from));
        match &applied {
            Ok(()) => {
                log::info!("[ai] applied generated parameters");
                self.state = GenerationState::Idle;
            }
            Err(e) => {
                log::error!("[ai] generation failed: {}", e);
                self.state = GenerationState::Error { since_ms: now_ms };
            }
        }
        applied
    }

    /// Leave the error state once the recovery delay has elapsed. Returns true
    /// on the transition back to idle.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        if let GenerationState::Error { since_ms } = self.state {
            if now_ms - since_ms >= self.config.recovery_ms as f64 {
                self.state = GenerationState::Idle;
                return true;
            }
        }
        false
    }

    pub fn recovery_ms(&self) -> u64 {
        self.config.recovery_ms
    }
}
