//! Interaction state smoother: the per-render-tick control loop.
//!
//! Each frame the current input (pointer or combined hands) is turned into a
//! target position, force and spread, and every render-facing channel moves
//! a fraction of the way from its previous value toward its target.

use crate::constants::*;
use crate::gesture::Gesture;
use crate::interaction::InteractionSignal;
use crate::params::VisualParameters;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Per-channel blend fractions, expressed per reference frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendRates {
    pub position: f32,
    pub force: f32,
    pub dispersion: f32,
    pub cosmetic: f32,
}

impl Default for BlendRates {
    fn default() -> Self {
        Self {
            position: BLEND_POSITION,
            force: BLEND_FORCE,
            dispersion: BLEND_DISPERSION,
            cosmetic: BLEND_COSMETIC,
        }
    }
}

/// Gesture -> force/spread target table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceTable {
    pub idle_repel: f32,
    pub fist_attract: f32,
    pub pinch_attract: f32,
    pub dual_fist_attract: f32,
    pub dual_open_repel: f32,
    pub pinch_compression: f32,
    pub separation_min: f32,
    pub separation_max: f32,
    pub separation_scale: f32,
}

impl Default for ForceTable {
    fn default() -> Self {
        Self {
            idle_repel: FORCE_IDLE_REPEL,
            fist_attract: FORCE_FIST_ATTRACT,
            pinch_attract: FORCE_PINCH_ATTRACT,
            dual_fist_attract: FORCE_DUAL_FIST_ATTRACT,
            dual_open_repel: FORCE_DUAL_OPEN_REPEL,
            pinch_compression: PINCH_COMPRESSION,
            separation_min: SEPARATION_MIN,
            separation_max: SEPARATION_MAX,
            separation_scale: SEPARATION_DISPERSION_SCALE,
        }
    }
}

/// What drives the interaction point this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InteractionInput {
    /// Pointer position already mapped to world space.
    Pointer(Vec3),
    Hands(InteractionSignal),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Targets {
    /// `None` holds the previous smoothed position.
    pub position: Option<Vec3>,
    pub force: f32,
    pub dispersion: f32,
}

/// Evaluate the target table for one frame. Stateless.
pub fn targets(input: &InteractionInput, params: &VisualParameters, table: &ForceTable) -> Targets {
    let base = params.dispersion;
    match *input {
        InteractionInput::Pointer(position) => Targets {
            position: Some(position),
            force: table.idle_repel,
            dispersion: base,
        },
        InteractionInput::Hands(signal) => {
            let (force, dispersion) = match signal.hand_count {
                0 => (table.idle_repel, base),
                1 => match signal.gesture {
                    Gesture::Fist => (table.fist_attract, base),
                    Gesture::Pinch => (table.pinch_attract, base * table.pinch_compression),
                    _ => (table.idle_repel, base),
                },
                _ => {
                    let sep = signal
                        .separation
                        .clamp(table.separation_min, table.separation_max);
                    let spread = sep * table.separation_scale;
                    if signal.gesture == Gesture::DualFist {
                        (table.dual_fist_attract, spread)
                    } else {
                        (table.dual_open_repel, spread)
                    }
                }
            };
            // no hands: hold the point, only the force returns to idle
            Targets {
                position: (signal.hand_count > 0).then_some(signal.position),
                force,
                dispersion,
            }
        }
    }
}

/// Fraction of the remaining distance to cover this tick.
///
/// With `time_normalized`, `rate` is the fraction per reference frame and is
/// rescaled for the elapsed `dt_sec`; exactly one reference frame yields
/// `rate` itself. Otherwise `rate` is applied as-is on every call.
#[inline]
pub fn blend_factor(rate: f32, dt_sec: f32, time_normalized: bool) -> f32 {
    let rate = rate.clamp(0.0, 1.0);
    if !time_normalized {
        return rate;
    }
    if !(dt_sec > 0.0) {
        return 0.0;
    }
    let frames = dt_sec * REFERENCE_FRAME_RATE;
    (1.0 - (1.0 - rate).powf(frames)).clamp(0.0, 1.0)
}

#[inline]
pub fn approach(current: f32, target: f32, t: f32) -> f32 {
    current + (target - current) * t
}

/// Render-facing state consumed by the particle shader.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothedUniforms {
    pub position: Vec3,
    pub interaction_strength: f32,
    pub dispersion: f32,
    pub size: f32,
    pub speed: f32,
    pub noise_strength: f32,
    pub shape_bias: f32,
    /// Linear-space colors.
    pub color_start: Vec3,
    pub color_end: Vec3,
}

impl SmoothedUniforms {
    /// Initial state: snapped onto the parameters with the idle force.
    pub fn snapped(params: &VisualParameters, table: &ForceTable) -> Self {
        Self {
            position: Vec3::ZERO,
            interaction_strength: table.idle_repel,
            dispersion: params.dispersion,
            size: params.size,
            speed: params.speed,
            noise_strength: params.noise_strength,
            shape_bias: params.shape_bias,
            color_start: params.color_start.to_linear_vec3(),
            color_end: params.color_end.to_linear_vec3(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmootherConfig {
    pub rates: BlendRates,
    pub forces: ForceTable,
    /// Rescale blend rates by elapsed time instead of applying them per call.
    pub frame_rate_independent: bool,
}

impl Default for SmootherConfig {
    fn default() -> Self {
        Self {
            rates: BlendRates::default(),
            forces: ForceTable::default(),
            frame_rate_independent: true,
        }
    }
}

pub struct Smoother {
    state: SmoothedUniforms,
    config: SmootherConfig,
}

impl Smoother {
    pub fn new(params: &VisualParameters, config: SmootherConfig) -> Self {
        Self {
            state: SmoothedUniforms::snapped(params, &config.forces),
            config,
        }
    }

    pub fn uniforms(&self) -> &SmoothedUniforms {
        &self.state
    }

    pub fn config(&self) -> &SmootherConfig {
        &self.config
    }

    /// Advance one render tick.
    pub fn tick(
        &mut self,
        input: &InteractionInput,
        params: &VisualParameters,
        dt_sec: f32,
    ) -> &SmoothedUniforms {
        let t = targets(input, params, &self.config.forces);
        let norm = self.config.frame_rate_independent;
        let rates = self.config.rates;
        let a_pos = blend_factor(rates.position, dt_sec, norm);
        let a_force = blend_factor(rates.force, dt_sec, norm);
        let a_disp = blend_factor(rates.dispersion, dt_sec, norm);
        let a_cos = blend_factor(rates.cosmetic, dt_sec, norm);

        let s = &mut self.state;
        if let Some(target) = t.position {
            s.position = s.position.lerp(target, a_pos);
        }
        s.interaction_strength = approach(s.interaction_strength, t.force, a_force);
        s.dispersion = approach(s.dispersion, t.dispersion, a_disp);
        s.size = approach(s.size, params.size, a_cos);
        s.speed = approach(s.speed, params.speed, a_cos);
        s.noise_strength = approach(s.noise_strength, params.noise_strength, a_cos);
        s.shape_bias = approach(s.shape_bias, params.shape_bias, a_cos);
        s.color_start = s
            .color_start
            .lerp(params.color_start.to_linear_vec3(), a_cos);
        s.color_end = s.color_end.lerp(params.color_end.to_linear_vec3(), a_cos);
        &self.state
    }
}
