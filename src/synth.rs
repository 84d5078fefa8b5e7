//! Stand-ins for the camera landmark detector, the audio analyser and a
//! pointer, used by the headless binary. All three are driven by script
//! time so runs are repeatable for a given seed.

use crate::constants::*;
use crate::input::LandmarkDetector;
use field_core::gesture::{joint, LANDMARK_COUNT};
use field_core::{PointerState, SpectrumSource};
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// A hand that drifts around the frame, opens and closes, tilts, pinches
/// now and then, waves every [`WAVE_PERIOD_SEC`] and briefly leaves the
/// frame every [`HAND_GAP_PERIOD_SEC`].
pub struct ScriptedHand {
    rng: StdRng,
    released: bool,
}

impl ScriptedHand {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            released: false,
        }
    }

    /// 21 landmarks for script time `t` seconds, ignoring gaps.
    pub fn pose(&mut self, t: f32) -> Vec<Vec3> {
        let wave_t = t % WAVE_PERIOD_SEC;
        let wave_dx = if wave_t < WAVE_SWING_SEC {
            WAVE_AMPLITUDE * (TAU * wave_t / WAVE_SWING_SEC).sin()
        } else {
            0.0
        };
        // Image coordinates: x right, y down. The camera feed is mirrored
        // later by the normalizer.
        let palm = Vec2::new(
            0.5 + 0.15 * (0.5 * t).sin() + wave_dx,
            0.55 + 0.08 * (0.7 * t).cos(),
        );
        let wrist = palm + Vec2::new(0.0, 0.12);
        let openness = 0.5 + 0.5 * (0.3 * t).sin();
        let reach = 0.14 + 0.32 * openness;
        let tilt = 0.45 * (0.2 * t).sin();
        let rot = |v: Vec2| Vec2::from_angle(tilt).rotate(v);

        // Finger directions (thumb, index, middle, ring, pinky) before tilt.
        let dirs = [
            Vec2::new(-0.55, -0.6),
            Vec2::new(-0.2, -1.0),
            Vec2::new(0.0, -1.0),
            Vec2::new(0.15, -0.95),
            Vec2::new(0.3, -0.8),
        ];
        let pinching = (1.1 * t).sin() > 0.92;

        let mut points = vec![Vec3::ZERO; LANDMARK_COUNT];
        points[joint::WRIST] = wrist.extend(0.0);
        for (f, dir) in dirs.iter().enumerate() {
            let tip = wrist + rot(*dir * reach);
            for k in 1..=4 {
                let p = wrist.lerp(tip, k as f32 / 4.0);
                points[f * 4 + k] = p.extend(-0.01 * k as f32);
            }
        }
        let index_tip = points[joint::INDEX_TIP];
        if pinching {
            points[joint::THUMB_TIP] = index_tip + Vec3::new(0.01, 0.005, 0.0);
        }
        for p in points.iter_mut() {
            p.x += self.rng.gen_range(-0.002..=0.002);
            p.y += self.rng.gen_range(-0.002..=0.002);
        }
        points
    }
}

impl LandmarkDetector for ScriptedHand {
    fn detect(&mut self, now_ms: f64) -> Option<Vec<Vec3>> {
        if self.released {
            return None;
        }
        let t = (now_ms / 1000.0) as f32;
        if t % HAND_GAP_PERIOD_SEC > HAND_GAP_PERIOD_SEC - HAND_GAP_SEC {
            return None;
        }
        Some(self.pose(t))
    }

    fn release(&mut self) {
        self.released = true;
    }
}

/// Spectrum with a kick on every beat and a falling tilt across bins.
pub struct SyntheticAnalyser {
    rng: StdRng,
    frame: u32,
    /// Mimic a cross-origin source whose analysis is blocked.
    pub blocked: bool,
}

impl SyntheticAnalyser {
    pub fn new(seed: u64, blocked: bool) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15),
            frame: 0,
            blocked,
        }
    }
}

impl SpectrumSource for SyntheticAnalyser {
    fn fill(&mut self, out: &mut [u8]) {
        self.frame = self.frame.wrapping_add(1);
        if self.blocked {
            out.fill(0);
            return;
        }
        // 120 bpm at 60 fps: a beat every 30 frames.
        let beat = (self.frame % 30) as f32 / 30.0;
        let kick = (-beat * 6.0).exp();
        let n = out.len().max(1) as f32;
        for (i, bin) in out.iter_mut().enumerate() {
            let tilt = (1.0 - i as f32 / n).powf(1.5);
            let low = if i < 12 { kick } else { 0.3 };
            let v = 200.0 * tilt * (0.35 + 0.65 * low) + self.rng.gen_range(0.0..20.0);
            *bin = v.clamp(0.0, 255.0) as u8;
        }
    }
}

/// Pointer tracing a slow figure-eight, clicking once every few seconds.
pub struct ScriptedPointer {
    pub viewport: Vec2,
}

impl ScriptedPointer {
    pub fn sample(&self, t: f32) -> PointerState {
        let u = 0.5 + 0.35 * (0.6 * t).sin();
        let v = 0.5 + 0.25 * (1.2 * t).sin();
        PointerState {
            x: u * self.viewport.x,
            y: v * self.viewport.y,
            down: t % 4.0 < 0.3,
            inside: true,
        }
    }
}
