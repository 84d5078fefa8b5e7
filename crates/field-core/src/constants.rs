// Shared gesture and simulation tuning constants.
//
// Thresholds are empirical; they are grouped by the component that reads them.

// Gesture normalization
pub const PINCH_THRESHOLD: f32 = 0.05; // thumb/index distance below this = pinching
pub const OPENNESS_EMA_ALPHA: f32 = 0.1; // smoothing factor per hand frame
pub const OPENNESS_RANGE_MIN: f32 = 0.15; // mean wrist->tip distance of a closed fist
pub const OPENNESS_RANGE_MAX: f32 = 0.45; // mean wrist->tip distance of an open palm
pub const OPENNESS_RESTING: f32 = 0.5; // value before the first hand frame / pointer mode
pub const HAND_VELOCITY_GAIN: f32 = 20.0; // scales landmark deltas to pointer-equivalent magnitude
pub const POINTER_ROTATION_RANGE: f32 = std::f32::consts::FRAC_PI_2; // full sweep across the viewport

// Wave detector
pub const WAVE_VELOCITY_THRESHOLD: f32 = 0.6;
pub const WAVE_RETURN_WINDOW_MS: f64 = 600.0;
pub const WAVE_COOLDOWN_MS: f64 = 1500.0;

// Playback control detector
pub const PLAYBACK_PINCH_COOLDOWN_MS: f64 = 1000.0;
pub const PLAYBACK_THROW_SPEED: f32 = 1.5;
pub const PLAYBACK_THROW_COOLDOWN_MS: f64 = 1500.0;
pub const PLAYBACK_SWIPE_THRESHOLD: f32 = 0.7;
pub const PLAYBACK_SWIPE_COOLDOWN_MS: f64 = 1000.0;
pub const PLAYBACK_VOLUME_THRESHOLD: f32 = 0.15;
pub const PLAYBACK_VOLUME_GAIN: f32 = 0.05; // volume units per unit of vertical velocity per frame
pub const PLAYBACK_SEEK_THRESHOLD: f32 = 0.6; // radians
pub const PLAYBACK_SEEK_GAIN: f32 = 0.5; // seconds per radian per frame
pub const PLAYBACK_OPEN_LEVEL: f32 = 0.8;
pub const PLAYBACK_CLOSED_LEVEL: f32 = 0.2;
pub const PLAYBACK_OPENNESS_COOLDOWN_MS: f64 = 500.0;

// Physics: inertia and rotation
pub const INERTIA_NOISE_FLOOR: f32 = 0.001;
pub const INERTIA_GAIN: f32 = 0.02;
pub const INERTIA_DECAY: f32 = 0.95; // per frame
pub const INERTIA_ROTATION_SCALE: f32 = 10.0; // radians/sec per unit of accumulated velocity
pub const IDLE_SPIN_PER_SEC: f32 = 0.05; // yaw rate at speed multiplier 1.0
pub const ROLL_LERP: f32 = 0.1; // per frame

// Physics: expansion
pub const EXPANSION_MIN: f32 = 0.6; // closed fist
pub const EXPANSION_MAX: f32 = 1.8; // open palm
pub const EXPANSION_FLOOR: f32 = 0.1;
pub const EXPANSION_RATE_PER_SEC: f32 = 3.0;
pub const BASS_EXPANSION_BOOST: f32 = 0.5;
pub const PINCH_GRAVITY: f32 = 0.6;

// Physics: per-sample motion
pub const POSITION_SMOOTHING_PER_SEC: f32 = 5.0;
pub const SHIMMER_AMPLITUDE: f32 = 0.02;
pub const SHIMMER_TIME_RATE: f32 = 1.7;
pub const MID_SHIMMER_GAIN: f32 = 2.0; // extra shimmer per unit of mid energy

// Equalizer layout
pub const EQ_BARS: usize = 8;
pub const EQ_BAR_SPACING: f32 = 0.45;
pub const EQ_BAR_HEIGHT: f32 = 1.2;
pub const EQ_BASELINE: f32 = -0.6; // bars grow upward from here
pub const EQ_BAR_MIN_SCALE: f32 = 0.2;
pub const EQ_BAR_SCALE_SPAN: f32 = 1.8;

// Gallery focus
pub const FOCUS_DISTANCE: f32 = 3.0; // in front of the camera eye
pub const FOCUS_SCALE: f32 = 2.5;
pub const FOCUS_LERP: f32 = 0.1; // per frame, focused item
pub const UNFOCUS_LERP: f32 = 0.05; // per frame, everything else
pub const UNFOCUSED_OPACITY: f32 = 0.15;

// Audio band extraction
pub const FFT_SIZE: usize = 256;
pub const SPECTRUM_BINS: usize = FFT_SIZE / 2;
pub const BASS_BINS: std::ops::Range<usize> = 0..10;
pub const MID_BINS: std::ops::Range<usize> = 10..50;
pub const FALLBACK_WAVE_RATE: f32 = 6.0; // radians/sec of the traveling wave
pub const FALLBACK_WAVE_PHASE_STEP: f32 = 0.8; // phase offset between bars

// Camera
pub const CAMERA_Z: f32 = 6.0;
pub const CAMERA_FOVY: f32 = std::f32::consts::FRAC_PI_4;
