//! Discrete gesture events detected over time.
//!
//! Every consumer owns its own detectors; nothing here is shared between
//! the camera toggle, playback controls and the control surface.

use crate::constants::{WAVE_COOLDOWN_MS, WAVE_RETURN_WINDOW_MS, WAVE_VELOCITY_THRESHOLD};
use crate::gesture::GestureBundle;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureEvent {
    Wave,
    PinchStart,
    PinchEnd,
}

// ---------------- Pinch edges ----------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PinchEdge {
    was_pinching: bool,
}

impl PinchEdge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this frame's pinch flag; returns the edge, if any.
    #[inline]
    pub fn update(&mut self, is_pinching: bool) -> Option<GestureEvent> {
        let edge = match (self.was_pinching, is_pinching) {
            (false, true) => Some(GestureEvent::PinchStart),
            (true, false) => Some(GestureEvent::PinchEnd),
            _ => None,
        };
        self.was_pinching = is_pinching;
        edge
    }

    #[inline]
    pub fn is_held(&self) -> bool {
        self.was_pinching
    }
}

// ---------------- Wave ----------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WavePhase {
    #[default]
    Neutral,
    StartedRight,
    StartedLeft,
}

#[derive(Clone, Debug)]
pub struct WaveConfig {
    pub velocity_threshold: f32,
    pub return_window_ms: f64,
    pub cooldown_ms: f64,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            velocity_threshold: WAVE_VELOCITY_THRESHOLD,
            return_window_ms: WAVE_RETURN_WINDOW_MS,
            cooldown_ms: WAVE_COOLDOWN_MS,
        }
    }
}

/// Two-phase swing detector: a fast horizontal swing one way, then back the
/// other way inside the return window.
#[derive(Clone, Debug, Default)]
pub struct WaveDetector {
    pub config: WaveConfig,
    phase: WavePhase,
    phase_started_ms: f64,
    cooldown_until_ms: f64,
}

impl WaveDetector {
    pub fn new(config: WaveConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[inline]
    pub fn phase(&self) -> WavePhase {
        self.phase
    }

    pub fn update(&mut self, bundle: &GestureBundle, now_ms: f64) -> Option<GestureEvent> {
        if now_ms < self.cooldown_until_ms {
            return None;
        }
        if self.phase != WavePhase::Neutral
            && now_ms - self.phase_started_ms > self.config.return_window_ms
        {
            self.phase = WavePhase::Neutral;
        }

        let vx = bundle.velocity.x;
        let threshold = self.config.velocity_threshold;
        let right = vx > threshold;
        let left = vx < -threshold;

        match self.phase {
            WavePhase::Neutral => {
                if right {
                    self.start(WavePhase::StartedRight, now_ms);
                } else if left {
                    self.start(WavePhase::StartedLeft, now_ms);
                }
                None
            }
            WavePhase::StartedRight if left => Some(self.fire(now_ms)),
            WavePhase::StartedLeft if right => Some(self.fire(now_ms)),
            _ => None,
        }
    }

    fn start(&mut self, phase: WavePhase, now_ms: f64) {
        self.phase = phase;
        self.phase_started_ms = now_ms;
    }

    fn fire(&mut self, now_ms: f64) -> GestureEvent {
        self.phase = WavePhase::Neutral;
        self.cooldown_until_ms = now_ms + self.config.cooldown_ms;
        log::info!("[gesture] wave");
        GestureEvent::Wave
    }
}
