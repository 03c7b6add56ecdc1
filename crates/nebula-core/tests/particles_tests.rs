// Host-side tests for particle seeding, the CPU reference of the shader's
// interaction math, the GPU layout and the orbit camera.

use glam::{Vec2, Vec3};
use nebula_core::*;

#[test]
fn cloud_is_seeded_and_bounded() {
    let a = ParticleCloud::generate(5000, 42);
    let b = ParticleCloud::generate(5000, 42);
    let c = ParticleCloud::generate(5000, 43);
    assert_eq!(a.len(), 5000);
    assert_eq!(a.particles(), b.particles());
    assert_ne!(a.particles(), c.particles());
    let half = SEED_CUBE_EXTENT / 2.0;
    for p in a.particles() {
        assert!(p.position.abs().max_element() <= half);
        assert!((0.0..1.0).contains(&p.scale));
    }
    assert!(ParticleCloud::generate(0, 1).is_empty());
}

#[test]
fn falloff_is_quadratic_inside_and_zero_beyond_radius() {
    assert_eq!(falloff(0.0, INFLUENCE_RADIUS), 1.0);
    assert!((falloff(3.5, 7.0) - 0.25).abs() < 1e-6);
    for d in [7.0, 7.001, 10.0, 1e6] {
        assert_eq!(falloff(d, INFLUENCE_RADIUS), 0.0);
    }
    assert_eq!(falloff(1.0, 0.0), 0.0);
    let mut prev = 1.0;
    for i in 1..70 {
        let f = falloff(i as f32 * 0.1, 7.0);
        assert!(f <= prev);
        prev = f;
    }
}

#[test]
fn repel_pushes_out_and_attract_pulls_in() {
    let point = Vec3::ZERO;
    let pos = Vec3::new(5.0, 1.0, -1.0);
    let (pushed, f) = apply_interaction(pos, point, 6.0);
    assert!(f > 0.0);
    assert!(pushed.length() > pos.length());
    let (pulled, _) = apply_interaction(pos, point, -15.0);
    assert!(pulled.length() < pos.length());
    let far = Vec3::new(20.0, 0.0, 0.0);
    assert_eq!(apply_interaction(far, point, -25.0), (far, 0.0));
}

#[test]
fn shape_bias_blends_sphere_and_cube() {
    let base = Vec3::new(3.0, 4.0, 0.0);
    let sphere = shaped_position(base, 5.0, 0.0);
    assert!((sphere.length() - 5.0).abs() < 1e-5);
    let cube = shaped_position(base, 5.0, 1.0);
    assert!(cube.distance(base * 2.5) < 1e-5);
    assert_eq!(shaped_position(Vec3::ZERO, 5.0, 0.0), Vec3::ZERO);
}

#[test]
fn rotation_preserves_height_and_radius() {
    let p = Vec3::new(1.0, 2.0, 3.0);
    let r = rotate_xz(p, 1.3);
    assert_eq!(r.y, 2.0);
    assert!((r.length() - p.length()).abs() < 1e-5);
    assert!(rotate_xz(p, 0.0).distance(p) < 1e-6);
}

#[test]
fn gpu_structs_are_vec4_aligned() {
    assert_eq!(std::mem::size_of::<ParticleUniforms>() % 16, 0);
    assert_eq!(std::mem::size_of::<ParticleUniforms>(), 2 * 64 + 5 * 16);
    assert_eq!(std::mem::size_of::<ParticleInstance>(), 16);
    assert_eq!(QUAD_VERTICES.len(), 12);
    assert!(PARTICLES_WGSL.contains("fn vs_main"));
    assert!(PARTICLES_WGSL.contains("fn fs_main"));
}

#[test]
fn uniforms_pack_the_smoothed_state() {
    let params = VisualParameters::default();
    let s = SmoothedUniforms::snapped(&params, &ForceTable::default());
    let cam = OrbitControls::default().camera(16.0 / 9.0);
    let u = ParticleUniforms::new(&s, &cam, 2.5, (1280, 720), true);
    assert_eq!(u.mouse_strength[3], FORCE_IDLE_REPEL);
    assert_eq!(u.params, [2.5, 0.5, 1.2, 5.0]);
    assert_eq!(u.color_start_size[3], 0.8);
    assert_eq!(u.color_end_shape[3], 0.2);
    assert_eq!(u.viewport, [1280.0, 720.0, POINT_SCALE, 0.0]);
    let encoded = ParticleUniforms::new(&s, &cam, 0.0, (0, 0), false);
    assert_eq!(encoded.viewport[0], 1.0);
    assert_eq!(encoded.viewport[3], 1.0);

    let cloud = ParticleCloud::generate(10, 3);
    let instances = ParticleInstance::from_cloud(&cloud);
    assert_eq!(instances.len(), 10);
    assert_eq!(instances[4].position, cloud.particles()[4].position.to_array());
}

#[test]
fn empty_cloud_still_uploads_one_slot() {
    let (instances, count) = ParticleInstance::buffer_contents(&ParticleCloud::generate(0, 1));
    assert_eq!(count, 0);
    assert_eq!(instances.len(), 1);
    assert_eq!(instances[0].scale, 0.0);

    let (instances, count) = ParticleInstance::buffer_contents(&ParticleCloud::generate(7, 1));
    assert_eq!((instances.len(), count), (7, 7));
}

#[test]
fn orbit_starts_on_axis_and_stays_in_bounds() {
    let mut orbit = OrbitControls::default();
    assert!(orbit.eye().distance(Vec3::new(0.0, 0.0, CAMERA_Z)) < 1e-5);

    // auto-rotation completes one turn per period
    orbit.advance(ORBIT_PERIOD_SEC / 4.0);
    assert!(orbit.eye().distance(Vec3::new(CAMERA_Z, 0.0, 0.0)) < 1e-3);

    orbit.drag(Vec2::new(0.0, 1.0e5));
    assert!(orbit.pitch < std::f32::consts::FRAC_PI_2);
    for _ in 0..200 {
        orbit.zoom(1.0);
    }
    assert_eq!(orbit.distance, ORBIT_MIN_DISTANCE);
    for _ in 0..200 {
        orbit.zoom(-1.0);
    }
    assert_eq!(orbit.distance, ORBIT_MAX_DISTANCE);
    assert!((orbit.eye().length() - ORBIT_MAX_DISTANCE).abs() < 1e-3);

    let still = OrbitControls {
        auto_rotate_period: None,
        ..OrbitControls::default()
    };
    let mut moved = still.clone();
    moved.advance(10.0);
    assert_eq!(moved.yaw, still.yaw);
}
