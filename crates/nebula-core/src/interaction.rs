//! Dual-hand combination and world-space mapping.

use crate::constants::{MAX_TRACKED_HANDS, POINTER_WORLD_SCALE, WORLD_HEIGHT, WORLD_WIDTH};
use crate::gesture::{classify_with, ClassifierThresholds, Gesture, HandReading};
use crate::landmarks::HandLandmarks;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Per-frame output of the tracking pipeline, consumed once by the render loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InteractionSignal {
    pub position: Vec3,
    pub gesture: Gesture,
    pub pinch_distance: f32,
    pub hand_count: u8,
    pub separation: f32,
}

impl InteractionSignal {
    /// No hands in view.
    pub const IDLE: Self = Self {
        position: Vec3::ZERO,
        gesture: Gesture::None,
        pinch_distance: 0.0,
        hand_count: 0,
        separation: 0.0,
    };
}

impl Default for InteractionSignal {
    fn default() -> Self {
        Self::IDLE
    }
}

/// Normalized camera plane / pointer NDC to world-space mapping.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldMapping {
    pub width: f32,
    pub height: f32,
    pub pointer_scale: f32,
    pub mirror_x: bool,
}

impl Default for WorldMapping {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            pointer_scale: POINTER_WORLD_SCALE,
            mirror_x: true,
        }
    }
}

impl WorldMapping {
    /// Map a normalized camera point (origin top-left, y down) into world space.
    /// The camera image is a mirror, so x is flipped first.
    pub fn camera_to_world(&self, uv: Vec2) -> Vec3 {
        let u = if self.mirror_x { 1.0 - uv.x } else { uv.x };
        Vec3::new((u - 0.5) * self.width, -(uv.y - 0.5) * self.height, 0.0)
    }

    /// Map pointer normalized device coordinates (\[-1, 1\], y up) into world space.
    pub fn pointer_to_world(&self, ndc: Vec2) -> Vec3 {
        Vec3::new(ndc.x * self.pointer_scale, ndc.y * self.pointer_scale, 0.0)
    }
}

/// Pixel offset inside a surface of `size` to NDC in \[-1, 1\], y up.
/// An empty surface maps everything to the center.
#[inline]
pub fn pixel_to_ndc(pos: Vec2, size: Vec2) -> Vec2 {
    if !(size.x > 0.0 && size.y > 0.0) {
        return Vec2::ZERO;
    }
    let x = pos.x / size.x * 2.0 - 1.0;
    let y = 1.0 - pos.y / size.y * 2.0;
    Vec2::new(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0))
}

/// Normalized-plane distance between two palm centers.
#[inline]
pub fn separation(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Two-hand gesture rule: both fists make a dual fist, anything else is dual open.
#[inline]
pub fn combine_gestures(a: Gesture, b: Gesture) -> Gesture {
    if a == Gesture::Fist && b == Gesture::Fist {
        Gesture::DualFist
    } else {
        Gesture::DualOpen
    }
}

/// Classify and merge the hands of one video frame.
///
/// At most [`MAX_TRACKED_HANDS`] hands are considered; extras are ignored in
/// tracker order.
pub fn combine(
    hands: &[HandLandmarks],
    thresholds: &ClassifierThresholds,
    mapping: &WorldMapping,
) -> InteractionSignal {
    let mut readings = hands
        .iter()
        .take(MAX_TRACKED_HANDS)
        .map(|h| (classify_with(h, thresholds), h.palm_center()));
    match (readings.next(), readings.next()) {
        (None, _) => InteractionSignal::IDLE,
        (Some((reading, palm)), None) => single(reading, palm, mapping),
        (Some((r1, p1)), Some((r2, p2))) => InteractionSignal {
            position: mapping.camera_to_world((p1 + p2) * 0.5),
            gesture: combine_gestures(r1.gesture, r2.gesture),
            pinch_distance: r1.pinch_distance,
            hand_count: 2,
            separation: separation(p1, p2),
        },
    }
}

fn single(reading: HandReading, palm: Vec2, mapping: &WorldMapping) -> InteractionSignal {
    InteractionSignal {
        position: mapping.camera_to_world(palm),
        gesture: reading.gesture,
        pinch_distance: reading.pinch_distance,
        hand_count: 1,
        separation: 0.0,
    }
}
