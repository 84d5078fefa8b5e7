// Host-side layout and timing constants.

// Frame loop
pub const DEFAULT_FRAME_DT_SEC: f32 = 1.0 / 60.0;
pub const DEFAULT_FRAMES: u32 = 900; // 15 s of headless simulation
pub const STATS_LOG_EVERY: u32 = 120; // frames between summary log lines

// Field
pub const DEFAULT_SAMPLE_COUNT: usize = 20_000;
pub const DEFAULT_TRACK_COUNT: usize = 6;
pub const GALLERY_ITEMS: usize = 6;

// Control surface: three round buttons below the field, on the z = 0 plane
pub const SURFACE_ORIGIN: [f32; 3] = [0.0, -1.6, 0.0];
pub const ZONE_RADIUS: f32 = 0.22;
pub const SURFACE_GRAB_RADIUS: f32 = 1.0; // presses farther from the origin belong to playback
pub const ZONE_LAYOUT: [(&str, [f32; 2]); 3] = [
    ("prev", [-0.6, 0.0]),
    ("play", [0.0, 0.0]),
    ("next", [0.6, 0.0]),
];

// Synthetic detector
pub const DETECTOR_WARMUP_MS: u64 = 40; // simulated model load time
pub const HAND_GAP_PERIOD_SEC: f32 = 10.0; // hand leaves the frame once per period
pub const HAND_GAP_SEC: f32 = 1.0;
pub const WAVE_PERIOD_SEC: f32 = 8.0;
pub const WAVE_SWING_SEC: f32 = 0.6;
pub const WAVE_AMPLITUDE: f32 = 0.25;
