//! View-side state shared by the web and native frontends.
//!
//! Nothing here touches platform APIs; frontends feed pointer drags, wheel
//! notches and elapsed time, and read back camera matrices.

use crate::constants::{
    CAMERA_FOVY_DEG, CAMERA_Z, ORBIT_DRAG_RADIANS_PER_PX, ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE,
    ORBIT_PERIOD_SEC, ORBIT_ZOOM_PER_NOTCH,
};
use glam::{Mat4, Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

/// Orbit around the origin: drag to rotate, wheel to zoom, slow auto-rotation.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    /// Seconds per full auto-rotation; `None` disables it.
    pub auto_rotate_period: Option<f32>,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: CAMERA_Z,
            auto_rotate_period: Some(ORBIT_PERIOD_SEC),
        }
    }
}

impl OrbitControls {
    const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

    pub fn advance(&mut self, dt_sec: f32) {
        if let Some(period) = self.auto_rotate_period.filter(|p| *p > 0.0) {
            if dt_sec > 0.0 {
                self.yaw = (self.yaw + TAU * dt_sec / period).rem_euclid(TAU);
            }
        }
    }

    /// Rotate by a pointer drag given in CSS/physical pixels.
    pub fn drag(&mut self, delta_px: Vec2) {
        self.yaw = (self.yaw - delta_px.x * ORBIT_DRAG_RADIANS_PER_PX).rem_euclid(TAU);
        self.pitch = (self.pitch + delta_px.y * ORBIT_DRAG_RADIANS_PER_PX)
            .clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
    }

    /// Positive `notches` zoom in.
    pub fn zoom(&mut self, notches: f32) {
        self.distance = (self.distance * ORBIT_ZOOM_PER_NOTCH.powf(notches))
            .clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
    }

    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(sy * cp, sp, cy * cp) * self.distance
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.eye(),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: if aspect > 0.0 { aspect } else { 1.0 },
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: 0.1,
            zfar: 200.0,
        }
    }
}
