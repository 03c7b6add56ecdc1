//! Seeded particle attributes and the CPU reference of the vertex-stage
//! interaction math in `shaders/particles.wgsl`.

use crate::constants::{ATTRACT_SWIRL, INFLUENCE_RADIUS, SEED_CUBE_EXTENT};
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Base position inside the seeding cube, before shape/noise.
    pub position: Vec3,
    /// Per-particle size multiplier in \[0, 1).
    pub scale: f32,
}

/// The particle population for one `count`. Rebuilt whenever the count changes.
#[derive(Clone, Debug)]
pub struct ParticleCloud {
    particles: Vec<Particle>,
    seed: u64,
}

impl ParticleCloud {
    pub fn generate(count: u32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let particles = (0..count)
            .map(|_| {
                let mut coord = || (rng.gen::<f32>() - 0.5) * SEED_CUBE_EXTENT;
                let position = Vec3::new(coord(), coord(), coord());
                Particle {
                    position,
                    scale: rng.gen::<f32>(),
                }
            })
            .collect();
        Self { particles, seed }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

/// Interaction weight at distance `dist`: `((r - d) / r)^2` inside the radius, zero outside.
#[inline]
pub fn falloff(dist: f32, radius: f32) -> f32 {
    if !(radius > 0.0) || !(dist < radius) {
        return 0.0;
    }
    let f = (radius - dist.max(0.0)) / radius;
    f * f
}

/// Blend of the spherical and cubic arrangements of a base position.
#[inline]
pub fn shaped_position(base: Vec3, dispersion: f32, shape_bias: f32) -> Vec3 {
    let spherical = base.normalize_or_zero() * dispersion;
    let cubic = base * (dispersion * 0.5);
    spherical.lerp(cubic, shape_bias)
}

/// Rotate the xz components by `angle`, matching the shader's `mat2(c, -s, s, c)`.
#[inline]
pub fn rotate_xz(p: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    let xz = Vec2::new(c * p.x + s * p.z, -s * p.x + c * p.z);
    Vec3::new(xz.x, p.y, xz.y)
}

/// Push `pos` along the ray from `point` by `falloff * strength`.
/// Positive strength repels, negative attracts; attraction also swirls around y.
/// Returns the displaced position and the falloff weight used.
pub fn apply_interaction(pos: Vec3, point: Vec3, strength: f32) -> (Vec3, f32) {
    let delta = pos - point;
    let force = falloff(delta.length(), INFLUENCE_RADIUS);
    if force == 0.0 {
        return (pos, 0.0);
    }
    let dir = delta.normalize_or_zero();
    let mut out = pos + dir * force * strength;
    if strength < 0.0 {
        out = rotate_xz(out, force * ATTRACT_SWIRL);
    }
    (out, force)
}
