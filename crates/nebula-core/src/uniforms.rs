//! GPU-side layout of the particle pass. Mirrors the structs in
//! `shaders/particles.wgsl`; every member is a 16-byte aligned vec4 or mat4.

use crate::constants::POINT_SCALE;
use crate::particles::ParticleCloud;
use crate::smoothing::SmoothedUniforms;
use crate::state::Camera;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleUniforms {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    /// xyz: interaction point, w: interaction strength.
    pub mouse_strength: [f32; 4],
    /// rgb: start color (linear), a: particle size.
    pub color_start_size: [f32; 4],
    /// rgb: end color (linear), a: shape bias.
    pub color_end_shape: [f32; 4],
    /// time, speed, noise strength, dispersion.
    pub params: [f32; 4],
    /// width px, height px, point scale, 1.0 when the shader must sRGB-encode.
    pub viewport: [f32; 4],
}

impl ParticleUniforms {
    pub fn new(
        s: &SmoothedUniforms,
        camera: &Camera,
        time_sec: f32,
        viewport: (u32, u32),
        srgb_target: bool,
    ) -> Self {
        let p = s.position;
        let cs = s.color_start;
        let ce = s.color_end;
        Self {
            view: camera.view_matrix().to_cols_array_2d(),
            proj: camera.projection_matrix().to_cols_array_2d(),
            mouse_strength: [p.x, p.y, p.z, s.interaction_strength],
            color_start_size: [cs.x, cs.y, cs.z, s.size],
            color_end_shape: [ce.x, ce.y, ce.z, s.shape_bias],
            params: [time_sec, s.speed, s.noise_strength, s.dispersion],
            viewport: [
                viewport.0.max(1) as f32,
                viewport.1.max(1) as f32,
                POINT_SCALE,
                if srgb_target { 0.0 } else { 1.0 },
            ],
        }
    }
}

/// Per-particle instance attributes (locations 1 and 2).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 3],
    pub scale: f32,
}

impl ParticleInstance {
    pub fn from_cloud(cloud: &ParticleCloud) -> Vec<ParticleInstance> {
        cloud
            .particles()
            .iter()
            .map(|p| ParticleInstance {
                position: p.position.to_array(),
                scale: p.scale,
            })
            .collect()
    }

    /// Instances ready for upload, plus the count to draw. An empty cloud still
    /// yields one zero-scale slot since zero-sized vertex buffers are rejected.
    pub fn buffer_contents(cloud: &ParticleCloud) -> (Vec<ParticleInstance>, u32) {
        let mut instances = Self::from_cloud(cloud);
        let count = instances.len() as u32;
        if instances.is_empty() {
            instances.push(ParticleInstance {
                position: [0.0; 3],
                scale: 0.0,
            });
        }
        (instances, count)
    }
}

/// Two triangles spanning \[-0.5, 0.5\]², drawn once per instance (location 0).
pub const QUAD_VERTICES: [f32; 12] = [
    -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
];
