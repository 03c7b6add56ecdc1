
// Shared gesture/visual tuning constants used by both web and native frontends.

// Landmark skeleton
pub const LANDMARK_COUNT: usize = 21;
pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_PIP: usize = 6;
pub const INDEX_TIP: usize = 8;
pub const PALM_CENTER: usize = 9; // middle-finger MCP
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_TIP: usize = 12;
pub const RING_PIP: usize = 14;
pub const RING_TIP: usize = 16;
pub const PINKY_PIP: usize = 18;
pub const PINKY_TIP: usize = 20;

/// (tip, pip) pairs for the four non-thumb fingers.
pub const FINGER_TIP_PIP: [(usize, usize); 4] = [
    (INDEX_TIP, INDEX_PIP),
    (MIDDLE_TIP, MIDDLE_PIP),
    (RING_TIP, RING_PIP),
    (PINKY_TIP, PINKY_PIP),
];

/// Bone pairs for drawing a tracked skeleton.
#[rustfmt::skip]
pub const HAND_CONNECTIONS: [(usize, usize); 23] = [
    (0, 1), (1, 2), (2, 3), (3, 4),
    (0, 5), (5, 6), (6, 7), (7, 8),
    (0, 9), (9, 10), (10, 11), (11, 12),
    (0, 13), (13, 14), (14, 15), (15, 16),
    (0, 17), (17, 18), (18, 19), (19, 20),
    (5, 9), (9, 13), (13, 17),
];
pub const FINGERTIPS: [usize; 5] = [THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

// Classification
pub const PINCH_THRESHOLD: f32 = 0.05; // normalized-plane units
pub const FIST_MIN_FOLDED: usize = 3;
pub const MAX_TRACKED_HANDS: usize = 2;

// World mapping (normalized camera plane -> world rectangle centered at origin)
pub const WORLD_WIDTH: f32 = 24.0;
pub const WORLD_HEIGHT: f32 = 20.0;
pub const POINTER_WORLD_SCALE: f32 = 12.0; // NDC [-1,1] -> world

// Interaction force targets (positive = repel, negative = attract)
pub const FORCE_IDLE_REPEL: f32 = 6.0;
pub const FORCE_FIST_ATTRACT: f32 = -15.0;
pub const FORCE_PINCH_ATTRACT: f32 = -5.0;
pub const FORCE_DUAL_FIST_ATTRACT: f32 = -25.0;
pub const FORCE_DUAL_OPEN_REPEL: f32 = 2.0;

// Spread targets
pub const PINCH_COMPRESSION: f32 = 0.5;
pub const SEPARATION_MIN: f32 = 0.1;
pub const SEPARATION_MAX: f32 = 1.0;
pub const SEPARATION_DISPERSION_SCALE: f32 = 18.0;

// Blend rates per reference frame
pub const BLEND_POSITION: f32 = 0.25;
pub const BLEND_FORCE: f32 = 0.15;
pub const BLEND_DISPERSION: f32 = 0.10;
pub const BLEND_COSMETIC: f32 = 0.05;
pub const REFERENCE_FRAME_RATE: f32 = 60.0;

// Render-time interaction falloff
pub const INFLUENCE_RADIUS: f32 = 7.0;
pub const ATTRACT_SWIRL: f32 = 3.0;

// Particle seeding
pub const SEED_CUBE_EXTENT: f32 = 10.0;

// View
pub const CAMERA_Z: f32 = 12.0;
pub const CAMERA_FOVY_DEG: f32 = 60.0;
pub const ORBIT_PERIOD_SEC: f32 = 120.0;
pub const ORBIT_MIN_DISTANCE: f32 = 2.0;
pub const ORBIT_MAX_DISTANCE: f32 = 30.0;
pub const ORBIT_DRAG_RADIANS_PER_PX: f32 = 0.005;
pub const ORBIT_ZOOM_PER_NOTCH: f32 = 0.95;
pub const POINT_SCALE: f32 = 300.0; // pixels at unit view distance
pub const CLEAR_COLOR: [f64; 3] = [0.02, 0.02, 0.02];

// AI generation
pub const GENERATION_ERROR_RECOVERY_MS: u64 = 3000;
