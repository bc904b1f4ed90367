// Shared page geometry and animation tuning constants used by the core and the web frontend.

// Page geometry (world units)
pub const PAGE_WIDTH: f32 = 1.28;
pub const PAGE_HEIGHT: f32 = 1.71;
pub const PAGE_DEPTH: f32 = 0.003;
pub const PAGE_SEGMENTS: usize = 30; // bones = segments + 1
pub const PAGE_HEIGHT_SEGMENTS: usize = 2;
pub const SEGMENT_WIDTH: f32 = PAGE_WIDTH / PAGE_SEGMENTS as f32;

// Whole book is turned so the closed cover faces the camera
pub const BOOK_ROOT_ROTATION_Y: f32 = -std::f32::consts::FRAC_PI_2;

// Segment damping (smooth time, seconds)
pub const BEND_SMOOTH_TIME: f32 = 0.5;
pub const FOLD_SMOOTH_TIME: f32 = 0.3;
pub const DAMP_EPSILON: f32 = 0.001; // snap to target inside this distance

// Curl curve weights
pub const INSIDE_CURVE_STRENGTH: f32 = 0.18;
pub const OUTSIDE_CURVE_STRENGTH: f32 = 0.05;
pub const TURNING_CURVE_STRENGTH: f32 = 0.09;
pub const CURVE_SPLIT_SEGMENT: usize = 8; // inside curve below, outside curve from here
pub const FOLD_TILT_DEG: f32 = 2.0;
pub const PAGE_STAGGER_DEG: f32 = 0.8; // per page index, open book only

// Turn animation window (milliseconds)
pub const TURN_DURATION_MS: f64 = 400.0;

// Page-turn scheduler tick delays (milliseconds)
pub const FAST_TICK_MS: u64 = 50;
pub const SLOW_TICK_MS: u64 = 150;
pub const FAST_TICK_MIN_DISTANCE: usize = 2; // strictly more than this uses the fast tick

// Hover highlight
pub const HIGHLIGHT_INTENSITY: f32 = 0.12;
pub const HIGHLIGHT_BLEND: f32 = 0.1; // per frame, not time scaled

// Page surface look
pub const PAGE_BASE_EMISSIVE: [f32; 3] = [0.05, 0.05, 0.05];
pub const PAGE_BASE_EMISSIVE_INTENSITY: f32 = 0.1;
pub const PAGE_ROUGHNESS: f32 = 0.2;
pub const EDGE_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const SPINE_COLOR: [f32; 3] = [0.0067, 0.0067, 0.0067]; // #111 in linear space

// Placeholder surface
pub const PLACEHOLDER_SIZE: u32 = 512;
pub const PLACEHOLDER_SPECKLES: usize = 30;
