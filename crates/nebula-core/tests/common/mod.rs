// Synthetic hand skeletons for host-side tests.

#![allow(dead_code)]

use glam::{Vec2, Vec3};
use nebula_core::{HandLandmarks, FINGER_TIP_PIP, INDEX_TIP, LANDMARK_COUNT, PALM_CENTER, THUMB_TIP, WRIST};

const FINGER_DX: [f32; 4] = [-0.03, -0.01, 0.01, 0.03];

/// Upright hand with the palm center at `palm`. `folded[i]` curls finger i
/// (index, middle, ring, pinky); the thumb tip sits `pinch` to the right of
/// the index tip.
pub fn hand(palm: Vec2, folded: [bool; 4], pinch: f32) -> HandLandmarks {
    let wrist = palm + Vec2::new(0.0, 0.15);
    let mut pts = [wrist.extend(0.0); LANDMARK_COUNT];
    for (i, &(tip, pip)) in FINGER_TIP_PIP.iter().enumerate() {
        let dx = FINGER_DX[i];
        pts[pip] = (wrist + Vec2::new(dx, -0.15)).extend(0.0);
        let reach = if folded[i] { 0.05 } else { 0.30 };
        pts[tip] = (wrist + Vec2::new(dx, -reach)).extend(0.0);
    }
    pts[WRIST] = wrist.extend(0.0);
    pts[PALM_CENTER] = palm.extend(0.0);
    pts[THUMB_TIP] = pts[INDEX_TIP] + Vec3::new(pinch, 0.0, 0.0);
    HandLandmarks::new(pts)
}

pub fn open_hand(palm: Vec2) -> HandLandmarks {
    hand(palm, [false; 4], 0.2)
}

pub fn fist(palm: Vec2) -> HandLandmarks {
    hand(palm, [true; 4], 0.2)
}

pub fn pinch(palm: Vec2) -> HandLandmarks {
    hand(palm, [false; 4], 0.01)
}

/// All 16 fold patterns with their folded-finger count.
pub fn fold_patterns() -> impl Iterator<Item = ([bool; 4], usize)> {
    (0u8..16).map(|bits| {
        let f = [bits & 1 != 0, bits & 2 != 0, bits & 4 != 0, bits & 8 != 0];
        (f, f.iter().filter(|b| **b).count())
    })
}
