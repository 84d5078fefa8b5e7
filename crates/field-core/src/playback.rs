//! Gesture-driven playback control.
//!
//! The detector turns bundles plus smoothed openness into [`PlaybackAction`]s.
//! Discrete actions share one `last_action_ms` per instance: firing any of
//! them restarts the cooldown window for all the others. Continuous volume
//! and seek mappings neither read nor touch it.

use crate::constants::*;
use crate::events::{GestureEvent, PinchEdge};
use crate::gesture::GestureBundle;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlaybackAction {
    /// Pinch rising edge.
    TogglePlay,
    /// Openness rising across the open level.
    Play,
    /// Openness falling across the closed level.
    Pause,
    /// Swipe right.
    Next,
    /// Swipe left.
    Previous,
    /// Throw: fast movement while a pinch is held.
    RemoveCurrent,
    /// Vertical swipe, applied every frame. Positive = louder.
    Volume(f32),
    /// Wrist tilt, applied every frame. Seconds.
    Seek(f32),
}

impl PlaybackAction {
    pub fn is_continuous(&self) -> bool {
        matches!(self, PlaybackAction::Volume(_) | PlaybackAction::Seek(_))
    }
}

pub type PlaybackActions = SmallVec<[PlaybackAction; 4]>;

#[derive(Clone, Debug)]
pub struct PlaybackConfig {
    pub pinch_cooldown_ms: f64,
    pub throw_speed: f32,
    pub throw_cooldown_ms: f64,
    pub swipe_threshold: f32,
    pub swipe_cooldown_ms: f64,
    pub volume_threshold: f32,
    pub volume_gain: f32,
    pub seek_threshold: f32,
    pub seek_gain: f32,
    pub open_level: f32,
    pub closed_level: f32,
    pub openness_cooldown_ms: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            pinch_cooldown_ms: PLAYBACK_PINCH_COOLDOWN_MS,
            throw_speed: PLAYBACK_THROW_SPEED,
            throw_cooldown_ms: PLAYBACK_THROW_COOLDOWN_MS,
            swipe_threshold: PLAYBACK_SWIPE_THRESHOLD,
            swipe_cooldown_ms: PLAYBACK_SWIPE_COOLDOWN_MS,
            volume_threshold: PLAYBACK_VOLUME_THRESHOLD,
            volume_gain: PLAYBACK_VOLUME_GAIN,
            seek_threshold: PLAYBACK_SEEK_THRESHOLD,
            seek_gain: PLAYBACK_SEEK_GAIN,
            open_level: PLAYBACK_OPEN_LEVEL,
            closed_level: PLAYBACK_CLOSED_LEVEL,
            openness_cooldown_ms: PLAYBACK_OPENNESS_COOLDOWN_MS,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PlaybackDetector {
    pub config: PlaybackConfig,
    pinch: PinchEdge,
    last_action_ms: Option<f64>,
    prev_openness: Option<f32>,
}

impl Default for PlaybackDetector {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}

impl PlaybackDetector {
    pub fn new(config: PlaybackConfig) -> Self {
        Self {
            config,
            pinch: PinchEdge::new(),
            last_action_ms: None,
            prev_openness: None,
        }
    }

    pub fn last_action_ms(&self) -> Option<f64> {
        self.last_action_ms
    }

    pub fn update(&mut self, bundle: &GestureBundle, openness: f32, now_ms: f64) -> PlaybackActions {
        self.update_routed(bundle, openness, now_ms, false)
    }

    /// Like [`PlaybackDetector::update`], but when `pinch_claimed` is set
    /// another consumer owns this frame's pinch: the edge is still tracked,
    /// and neither the toggle nor a throw fires.
    pub fn update_routed(
        &mut self,
        bundle: &GestureBundle,
        openness: f32,
        now_ms: f64,
        pinch_claimed: bool,
    ) -> PlaybackActions {
        let Self {
            config: cfg,
            pinch,
            last_action_ms,
            prev_openness,
        } = self;
        let mut out = PlaybackActions::new();
        let held_before = pinch.is_held();
        let edge = pinch.update(bundle.is_pinching);

        if !pinch_claimed
            && edge == Some(GestureEvent::PinchStart)
            && cooled_down(*last_action_ms, now_ms, cfg.pinch_cooldown_ms)
        {
            fire(last_action_ms, &mut out, PlaybackAction::TogglePlay, now_ms);
        }

        if !pinch_claimed
            && held_before
            && bundle.is_pinching
            && bundle.velocity.length() > cfg.throw_speed
            && cooled_down(*last_action_ms, now_ms, cfg.throw_cooldown_ms)
        {
            fire(last_action_ms, &mut out, PlaybackAction::RemoveCurrent, now_ms);
        }

        if !bundle.is_pinching && cooled_down(*last_action_ms, now_ms, cfg.swipe_cooldown_ms) {
            let vx = bundle.velocity.x;
            if vx > cfg.swipe_threshold {
                fire(last_action_ms, &mut out, PlaybackAction::Next, now_ms);
            } else if vx < -cfg.swipe_threshold {
                fire(last_action_ms, &mut out, PlaybackAction::Previous, now_ms);
            }
        }

        let vy = bundle.velocity.y;
        if vy.abs() > cfg.volume_threshold {
            // Screen y grows downward; raising the hand turns it up.
            out.push(PlaybackAction::Volume(-vy * cfg.volume_gain));
        }
        if bundle.rotation.abs() > cfg.seek_threshold {
            out.push(PlaybackAction::Seek(bundle.rotation * cfg.seek_gain));
        }

        if let Some(prev) = *prev_openness {
            let opened = prev < cfg.open_level && openness >= cfg.open_level;
            let closed = prev > cfg.closed_level && openness <= cfg.closed_level;
            if (opened || closed) && cooled_down(*last_action_ms, now_ms, cfg.openness_cooldown_ms) {
                let action = if opened {
                    PlaybackAction::Play
                } else {
                    PlaybackAction::Pause
                };
                fire(last_action_ms, &mut out, action, now_ms);
            }
        }
        *prev_openness = Some(openness);

        out
    }
}

#[inline]
fn cooled_down(last_action_ms: Option<f64>, now_ms: f64, cooldown_ms: f64) -> bool {
    last_action_ms.map_or(true, |last| now_ms - last >= cooldown_ms)
}

fn fire(
    last_action_ms: &mut Option<f64>,
    out: &mut PlaybackActions,
    action: PlaybackAction,
    now_ms: f64,
) {
    *last_action_ms = Some(now_ms);
    log::debug!("[playback] {:?}", action);
    out.push(action);
}

/// Minimal model of the media player the actions drive.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub volume: f32,
    pub position_sec: f32,
    pub track_index: usize,
    pub track_count: usize,
}

impl PlaybackState {
    pub fn new(track_count: usize) -> Self {
        Self {
            is_playing: false,
            volume: 0.8,
            position_sec: 0.0,
            track_index: 0,
            track_count,
        }
    }

    pub fn apply(&mut self, action: PlaybackAction) {
        match action {
            PlaybackAction::TogglePlay => self.is_playing = !self.is_playing,
            PlaybackAction::Play => self.is_playing = true,
            PlaybackAction::Pause => self.is_playing = false,
            PlaybackAction::Next => self.skip(1),
            PlaybackAction::Previous => self.skip(-1),
            PlaybackAction::RemoveCurrent => {
                if self.track_count > 0 {
                    self.track_count -= 1;
                    self.position_sec = 0.0;
                    if self.track_index >= self.track_count {
                        self.track_index = 0;
                    }
                    if self.track_count == 0 {
                        self.is_playing = false;
                    }
                }
            }
            PlaybackAction::Volume(delta) => {
                self.volume = (self.volume + delta).clamp(0.0, 1.0);
            }
            PlaybackAction::Seek(delta) => {
                self.position_sec = (self.position_sec + delta).max(0.0);
            }
        }
    }

    pub fn apply_all(&mut self, actions: &[PlaybackAction]) {
        for &a in actions {
            self.apply(a);
        }
    }

    fn skip(&mut self, step: isize) {
        if self.track_count == 0 {
            return;
        }
        let n = self.track_count as isize;
        self.track_index = (self.track_index as isize + step).rem_euclid(n) as usize;
        self.position_sec = 0.0;
    }
}
