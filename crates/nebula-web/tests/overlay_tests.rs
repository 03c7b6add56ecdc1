// Host-side tests for the status and skeleton helpers of the overlay.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod overlay {
    include!("../src/overlay.rs");
}

use glam::{Vec2, Vec3};
use nebula_core::{
    Gesture, HandLandmarks, InputMode, InteractionSignal, LandmarkError, TrackingError,
    HAND_CONNECTIONS, PALM_CENTER,
};
use overlay::*;

fn signal(gesture: Gesture, hand_count: u8) -> InteractionSignal {
    InteractionSignal {
        gesture,
        hand_count,
        ..InteractionSignal::IDLE
    }
}

#[test]
fn status_badges_follow_the_signal() {
    let idle = InteractionSignal::IDLE;
    assert_eq!(gesture_text(&idle), "SEARCHING");
    assert_eq!(hands_text(&idle), "");
    assert_eq!(link_text(&idle), "SINGLE_THREAD");

    let dual = signal(Gesture::DualFist, 2);
    assert_eq!(gesture_text(&dual), "DUAL FIST");
    assert_eq!(hands_text(&dual), "HANDS: 2");
    assert_eq!(link_text(&dual), "DUAL_LINK_ACTIVE");
}

#[test]
fn mode_button_names_the_mode() {
    assert_eq!(mode_button_text(InputMode::Pointer), "Input: Mouse");
    assert_eq!(mode_button_text(InputMode::Camera), "Input: Camera");
}

#[test]
fn skeleton_segments_scale_to_canvas_pixels() {
    let points: Vec<Vec3> = (0..21)
        .map(|i| Vec3::new(i as f32 / 20.0, 0.5, 0.0))
        .collect();
    let hand = HandLandmarks::from_points(&points).unwrap();
    let segs = skeleton_segments(&hand, 320.0, 240.0);
    assert_eq!(segs.len(), HAND_CONNECTIONS.len());
    // wrist -> thumb base
    assert_eq!(segs[0].0, Vec2::new(0.0, 120.0));
    assert_eq!(segs[0].1, Vec2::new(16.0, 120.0));
}

fn hand_with_palm_at(x: f32, y: f32) -> HandLandmarks {
    let mut points = vec![Vec3::new(0.5, 0.5, 0.0); 21];
    points[PALM_CENTER] = Vec3::new(x, y, 0.0);
    HandLandmarks::from_points(&points).unwrap()
}

#[test]
fn palm_link_only_for_two_hands() {
    let left = hand_with_palm_at(0.25, 0.5);
    let right = hand_with_palm_at(0.75, 0.25);
    assert!(palm_link(&[], 320.0, 240.0).is_none());
    assert!(palm_link(&[left.clone()], 320.0, 240.0).is_none());

    let (a, b, mid) = palm_link(&[left, right], 320.0, 240.0).unwrap();
    assert_eq!(a, Vec2::new(80.0, 120.0));
    assert_eq!(b, Vec2::new(240.0, 60.0));
    assert_eq!(mid, Vec2::new(160.0, 90.0));
}

#[test]
fn setup_and_runtime_failures_read_differently() {
    assert_eq!(
        failure_message(&TrackingError::Camera("denied".into())),
        CAMERA_ERROR_MESSAGE
    );
    assert_eq!(
        failure_message(&TrackingError::Model("404".into())),
        CAMERA_ERROR_MESSAGE
    );
    assert_eq!(
        failure_message(&TrackingError::Detect("lost context".into())),
        DETECTION_ERROR_MESSAGE
    );
    let bad = TrackingError::from(LandmarkError::WrongCount { expected: 21, got: 3 });
    assert_eq!(failure_message(&bad), DETECTION_ERROR_MESSAGE);
    assert_ne!(CAMERA_ERROR_MESSAGE, DETECTION_ERROR_MESSAGE);
}
