//! Single-hand gesture classification.
//!
//! Classification is instantaneous per frame with no hysteresis; flips
//! between frames are absorbed by the smoother.

use crate::constants::{FINGER_TIP_PIP, FIST_MIN_FOLDED, INDEX_TIP, THUMB_TIP};
use crate::landmarks::HandLandmarks;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Gesture {
    Open,
    Fist,
    Pinch,
    #[default]
    None,
    DualFist,
    DualOpen,
}

impl Gesture {
    pub fn label(self) -> &'static str {
        match self {
            Gesture::Open => "OPEN",
            Gesture::Fist => "FIST",
            Gesture::Pinch => "PINCH",
            Gesture::None => "SEARCHING",
            Gesture::DualFist => "DUAL FIST",
            Gesture::DualOpen => "DUAL OPEN",
        }
    }
}

/// Classification of one hand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandReading {
    pub gesture: Gesture,
    pub pinch_distance: f32,
}

/// Thresholds used by [`classify_with`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierThresholds {
    pub pinch: f32,
    pub fist_min_folded: usize,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            pinch: crate::constants::PINCH_THRESHOLD,
            fist_min_folded: FIST_MIN_FOLDED,
        }
    }
}

pub fn classify(hand: &HandLandmarks) -> HandReading {
    classify_with(hand, &ClassifierThresholds::default())
}

pub fn classify_with(hand: &HandLandmarks, thresholds: &ClassifierThresholds) -> HandReading {
    let pinch_distance = pinch_distance(hand);
    // fist takes priority over pinch
    let gesture = if folded_fingers(hand) >= thresholds.fist_min_folded {
        Gesture::Fist
    } else if pinch_distance < thresholds.pinch {
        Gesture::Pinch
    } else {
        Gesture::Open
    };
    HandReading {
        gesture,
        pinch_distance,
    }
}

#[inline]
pub fn pinch_distance(hand: &HandLandmarks) -> f32 {
    hand.planar(THUMB_TIP).distance(hand.planar(INDEX_TIP))
}

/// A finger is folded when its tip sits closer to the wrist than its PIP knuckle.
#[inline]
pub fn is_folded(hand: &HandLandmarks, tip: usize, pip: usize) -> bool {
    let wrist = hand.wrist();
    hand.planar(tip).distance(wrist) < hand.planar(pip).distance(wrist)
}

pub fn folded_fingers(hand: &HandLandmarks) -> usize {
    FINGER_TIP_PIP
        .iter()
        .filter(|&&(tip, pip)| is_folded(hand, tip, pip))
        .count()
}
