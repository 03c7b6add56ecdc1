//! Visual parameter record, ranges, presets and the store that owns the
//! current configuration.
//!
//! Every accepted write leaves each field inside its declared range. Manual
//! edits clamp; whole-record replacements (presets, AI results) are validated
//! and rejected as a unit, so a failed replacement never partially applies.

use crate::error::ParamError;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// `#rrggbb` color. Also parses the short `#rgb` form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub rgb: [u8; 3],
}

impl HexColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { rgb: [r, g, b] }
    }

    /// Components normalized to \[0, 1\] in sRGB space.
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(
            self.rgb[0] as f32 / 255.0,
            self.rgb[1] as f32 / 255.0,
            self.rgb[2] as f32 / 255.0,
        )
    }

    /// Components converted to linear space for sRGB render targets.
    pub fn to_linear_vec3(self) -> Vec3 {
        let c = self.to_vec3();
        Vec3::new(srgb_to_linear(c.x), srgb_to_linear(c.y), srgb_to_linear(c.z))
    }
}

#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl FromStr for HexColor {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ParamError::BadColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(bad)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map_err(|_| bad());
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        match hex.len() {
            3 => Ok(Self::new(nibble(0)? * 17, nibble(1)? * 17, nibble(2)? * 17)),
            6 => Ok(Self::new(byte(0)?, byte(2)?, byte(4)?)),
            _ => Err(bad()),
        }
    }
}

impl TryFrom<String> for HexColor {
    type Error = ParamError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<HexColor> for String {
    fn from(c: HexColor) -> Self {
        c.to_string()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.rgb[0], self.rgb[1], self.rgb[2])
    }
}

/// Closed numeric range of one parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    #[inline]
    pub fn clamp(&self, v: f64) -> f64 {
        v.clamp(self.min, self.max)
    }
}

/// Numeric fields of [`VisualParameters`] editable from the control surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Count,
    Size,
    Speed,
    NoiseStrength,
    Dispersion,
    ShapeBias,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Count,
        Field::Size,
        Field::Speed,
        Field::NoiseStrength,
        Field::Dispersion,
        Field::ShapeBias,
    ];

    pub const fn range(self) -> Range {
        match self {
            Field::Count => Range::new(1000.0, 20000.0),
            Field::Size => Range::new(0.1, 3.0),
            Field::Speed => Range::new(0.0, 5.0),
            Field::NoiseStrength => Range::new(0.0, 5.0),
            Field::Dispersion => Range::new(1.0, 15.0),
            Field::ShapeBias => Range::new(0.0, 1.0),
        }
    }

    /// Slider step used by the control surface.
    pub const fn step(self) -> f64 {
        match self {
            Field::Count => 500.0,
            Field::ShapeBias => 0.05,
            _ => 0.1,
        }
    }

    /// Wire/DOM name (camelCase, matching the AI response schema).
    pub const fn name(self) -> &'static str {
        match self {
            Field::Count => "count",
            Field::Size => "size",
            Field::Speed => "speed",
            Field::NoiseStrength => "noiseStrength",
            Field::Dispersion => "dispersion",
            Field::ShapeBias => "shapeBias",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorSlot {
    Start,
    End,
}

impl ColorSlot {
    pub const fn name(self) -> &'static str {
        match self {
            ColorSlot::Start => "colorStart",
            ColorSlot::End => "colorEnd",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualParameters {
    pub count: u32,
    pub size: f32,
    pub speed: f32,
    pub noise_strength: f32,
    pub color_start: HexColor,
    pub color_end: HexColor,
    pub dispersion: f32,
    pub shape_bias: f32,
}

impl Default for VisualParameters {
    fn default() -> Self {
        Self {
            count: 8000,
            size: 0.8,
            speed: 0.5,
            noise_strength: 1.2,
            color_start: HexColor::new(0x00, 0xff, 0xff),
            color_end: HexColor::new(0xff, 0x00, 0xff),
            dispersion: 5.0,
            shape_bias: 0.2,
        }
    }
}

impl VisualParameters {
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::Count => self.count as f64,
            Field::Size => self.size as f64,
            Field::Speed => self.speed as f64,
            Field::NoiseStrength => self.noise_strength as f64,
            Field::Dispersion => self.dispersion as f64,
            Field::ShapeBias => self.shape_bias as f64,
        }
    }

    fn put(&mut self, field: Field, v: f64) {
        match field {
            Field::Count => self.count = v.round() as u32,
            Field::Size => self.size = v as f32,
            Field::Speed => self.speed = v as f32,
            Field::NoiseStrength => self.noise_strength = v as f32,
            Field::Dispersion => self.dispersion = v as f32,
            Field::ShapeBias => self.shape_bias = v as f32,
        }
    }

    pub fn color(&self, slot: ColorSlot) -> HexColor {
        match slot {
            ColorSlot::Start => self.color_start,
            ColorSlot::End => self.color_end,
        }
    }

    /// Check every field against its range.
    pub fn validate(&self) -> Result<(), ParamError> {
        for field in Field::ALL {
            let v = self.get(field);
            if !v.is_finite() {
                return Err(ParamError::NotFinite {
                    field: field.name(),
                });
            }
            let r = field.range();
            if !r.contains(v) {
                return Err(ParamError::OutOfRange {
                    field: field.name(),
                    value: v,
                    min: r.min,
                    max: r.max,
                });
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub params: VisualParameters,
}

pub fn presets() -> Vec<Preset> {
    vec![
        Preset {
            name: "Cosmic Nebula",
            params: VisualParameters::default(),
        },
        Preset {
            name: "Golden Fireflies",
            params: VisualParameters {
                count: 5000,
                size: 1.5,
                speed: 0.2,
                noise_strength: 2.0,
                color_start: HexColor::new(0xff, 0xd7, 0x00),
                color_end: HexColor::new(0xff, 0x45, 0x00),
                dispersion: 8.0,
                shape_bias: 0.5,
            },
        },
        Preset {
            name: "Matrix Rain",
            params: VisualParameters {
                count: 12000,
                size: 0.6,
                speed: 1.5,
                noise_strength: 0.5,
                color_start: HexColor::new(0x00, 0xff, 0x00),
                color_end: HexColor::new(0x00, 0x33, 0x00),
                dispersion: 10.0,
                shape_bias: 1.0,
            },
        },
        Preset {
            name: "Ice Storm",
            params: VisualParameters {
                count: 15000,
                size: 0.5,
                speed: 2.5,
                noise_strength: 3.0,
                color_start: HexColor::new(0xff, 0xff, 0xff),
                color_end: HexColor::new(0xaa, 0xdd, 0xff),
                dispersion: 6.0,
                shape_bias: 0.8,
            },
        },
    ]
}

/// Owner of the current [`VisualParameters`].
///
/// `revision` increments on every accepted change so frontends can tell when
/// to rebuild particle buffers or refresh their controls.
#[derive(Clone, Debug, Default)]
pub struct ParameterStore {
    current: VisualParameters,
    revision: u64,
}

impl ParameterStore {
    pub fn new(initial: VisualParameters) -> Result<Self, ParamError> {
        initial.validate()?;
        Ok(Self {
            current: initial,
            revision: 0,
        })
    }

    pub fn current(&self) -> &VisualParameters {
        &self.current
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Manual edit: the value is clamped into range. Returns the stored value.
    pub fn set_field(&mut self, field: Field, value: f64) -> Result<f64, ParamError> {
        if !value.is_finite() {
            return Err(ParamError::NotFinite {
                field: field.name(),
            });
        }
        let clamped = field.range().clamp(value);
        self.current.put(field, clamped);
        self.revision += 1;
        Ok(self.current.get(field))
    }

    pub fn set_color(&mut self, slot: ColorSlot, hex: &str) -> Result<HexColor, ParamError> {
        let color: HexColor = hex.parse()?;
        match slot {
            ColorSlot::Start => self.current.color_start = color,
            ColorSlot::End => self.current.color_end = color,
        }
        self.revision += 1;
        Ok(color)
    }

    pub fn apply_preset(&mut self, preset: &Preset) -> Result<(), ParamError> {
        self.replace(preset.params.clone())
    }

    /// Whole-record replacement; rejected entirely if any field is out of range.
    pub fn replace(&mut self, params: VisualParameters) -> Result<(), ParamError> {
        params.validate()?;
        self.current = params;
        self.revision += 1;
        Ok(())
    }
}
