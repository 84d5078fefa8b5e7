//! Raw input → semantic gesture bundle.
//!
//! Two front doors produce the same [`GestureBundle`]: [`HandNormalizer`] for
//! camera landmarks and [`PointerMapper`] for a mouse or touch pointer. Both
//! emit [`GestureBundle::NEUTRAL`] when there is no input and forget their
//! previous reference point so velocity does not spike on re-acquisition.

use crate::constants::*;
use crate::error::{FieldError, Result};
use glam::{Vec2, Vec3};

/// Per-frame semantic signals. Recomputed every frame, never accumulated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureBundle {
    /// Positive x is rightward on screen, positive y is downward.
    pub velocity: Vec2,
    pub pinch_distance: f32,
    pub is_pinching: bool,
    /// Signed tilt in radians; an upright hand or a centred pointer reads 0.
    pub rotation: f32,
    /// Normalized screen position in [0,1]², already mirrored for camera input.
    pub position: Vec2,
}

impl GestureBundle {
    pub const NEUTRAL: GestureBundle = GestureBundle {
        velocity: Vec2::ZERO,
        pinch_distance: 1.0,
        is_pinching: false,
        rotation: 0.0,
        position: Vec2::new(0.5, 0.5),
    };
}

impl Default for GestureBundle {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

// ---------------- Hand landmarks ----------------

pub const LANDMARK_COUNT: usize = 21;

/// Landmark indices in the 21-point hand layout.
pub mod joint {
    pub const WRIST: usize = 0;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_TIP: usize = 16;
    pub const PINKY_TIP: usize = 20;
}

/// One tracked hand in normalized image coordinates (x right, y down).
#[derive(Clone, Debug, PartialEq)]
pub struct HandLandmarks {
    points: [Vec3; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn new(points: [Vec3; LANDMARK_COUNT]) -> Result<Self> {
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(FieldError::NonFiniteLandmark { index });
        }
        Ok(Self { points })
    }

    pub fn from_slice(points: &[Vec3]) -> Result<Self> {
        let points: [Vec3; LANDMARK_COUNT] =
            points.try_into().map_err(|_| FieldError::LandmarkCount {
                expected: LANDMARK_COUNT,
                got: points.len(),
            })?;
        Self::new(points)
    }

    #[inline]
    pub fn point(&self, index: usize) -> Vec3 {
        self.points[index]
    }

    /// Image-plane position of a joint.
    #[inline]
    pub fn xy(&self, index: usize) -> Vec2 {
        self.points[index].truncate()
    }
}

/// Raw aperture of a hand in [0,1] before smoothing.
pub fn raw_openness(hand: &HandLandmarks) -> f32 {
    let wrist = hand.xy(joint::WRIST);
    let tips = [joint::INDEX_TIP, joint::MIDDLE_TIP, joint::PINKY_TIP];
    let mean = tips
        .iter()
        .map(|&t| hand.xy(t).distance(wrist))
        .sum::<f32>()
        / tips.len() as f32;
    ((mean - OPENNESS_RANGE_MIN) / (OPENNESS_RANGE_MAX - OPENNESS_RANGE_MIN)).clamp(0.0, 1.0)
}

/// Tilt of the wrist → middle-knuckle axis, mirrored, zero when upright.
pub fn hand_rotation(hand: &HandLandmarks) -> f32 {
    let wrist = hand.xy(joint::WRIST);
    let knuckle = hand.xy(joint::MIDDLE_MCP);
    // Both axes flip: x for the mirrored feed, y because image rows grow down.
    let dx = wrist.x - knuckle.x;
    let dy = wrist.y - knuckle.y;
    dy.atan2(dx) - std::f32::consts::FRAC_PI_2
}

#[inline]
fn mirrored(p: Vec2) -> Vec2 {
    Vec2::new(1.0 - p.x, p.y).clamp(Vec2::ZERO, Vec2::ONE)
}

/// Landmark normalizer. Owns the openness EMA and the previous palm
/// reference used for velocity.
#[derive(Clone, Debug)]
pub struct HandNormalizer {
    prev_reference: Option<Vec2>,
    openness: f32,
}

impl Default for HandNormalizer {
    fn default() -> Self {
        Self {
            prev_reference: None,
            openness: OPENNESS_RESTING,
        }
    }
}

impl HandNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Smoothed openness. Held at its last value while no hand is visible.
    #[inline]
    pub fn openness(&self) -> f32 {
        self.openness
    }

    pub fn update(&mut self, hand: Option<&HandLandmarks>) -> GestureBundle {
        let Some(hand) = hand else {
            self.prev_reference = None;
            return GestureBundle::NEUTRAL;
        };

        self.openness += (raw_openness(hand) - self.openness) * OPENNESS_EMA_ALPHA;

        let pinch_distance = hand
            .point(joint::THUMB_TIP)
            .distance(hand.point(joint::INDEX_TIP));

        let position = mirrored(hand.xy(joint::MIDDLE_MCP));
        let velocity = match self.prev_reference {
            Some(prev) => (position - prev) * HAND_VELOCITY_GAIN,
            None => Vec2::ZERO,
        };
        self.prev_reference = Some(position);

        GestureBundle {
            velocity,
            pinch_distance,
            is_pinching: pinch_distance < PINCH_THRESHOLD,
            rotation: hand_rotation(hand),
            position,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ---------------- Pointer input ----------------

/// Pointer state in viewport pixels.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
    pub down: bool,
    /// False once the pointer has left the viewport.
    pub inside: bool,
}

#[derive(Default, Clone, Debug)]
pub struct PointerMapper {
    prev_uv: Option<Vec2>,
}

impl PointerMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a pointer sample to a bundle. `viewport` is the size in pixels.
    pub fn update(&mut self, pointer: &PointerState, viewport: Vec2) -> GestureBundle {
        if !pointer.inside || viewport.x <= 0.0 || viewport.y <= 0.0 {
            self.prev_uv = None;
            return GestureBundle::NEUTRAL;
        }
        let uv = (Vec2::new(pointer.x, pointer.y) / viewport).clamp(Vec2::ZERO, Vec2::ONE);
        let velocity = self.prev_uv.map_or(Vec2::ZERO, |prev| uv - prev);
        self.prev_uv = Some(uv);
        GestureBundle {
            velocity,
            pinch_distance: if pointer.down { 0.0 } else { 1.0 },
            is_pinching: pointer.down,
            rotation: (uv.x - 0.5) * POINTER_ROTATION_RANGE,
            position: uv,
        }
    }
}
