use crate::constants::*;
use field_core::ShapeKind;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    Hand,
    Pointer,
}

impl FromStr for InputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hand" | "camera" => Ok(InputMode::Hand),
            "pointer" | "mouse" => Ok(InputMode::Pointer),
            other => Err(format!("unknown input mode `{other}`")),
        }
    }
}

/// Headless host settings. Every field can be overridden from the
/// environment (see [`HostConfig::from_env`]).
#[derive(Clone, Debug)]
pub struct HostConfig {
    pub shape: ShapeKind,
    pub count: usize,
    pub frames: u32,
    pub frame_dt_sec: f32,
    pub input: InputMode,
    pub speed: f32,
    pub seed: Option<u64>,
    pub tracks: usize,
    /// Run against the wall clock instead of a fixed simulated step.
    pub realtime: bool,
    /// Make the synthetic detector fail its setup.
    pub fail_detector: bool,
    /// Make the synthetic analyser return zeros, as a blocked cross-origin
    /// source does.
    pub blocked_audio: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            shape: ShapeKind::Sphere,
            count: DEFAULT_SAMPLE_COUNT,
            frames: DEFAULT_FRAMES,
            frame_dt_sec: DEFAULT_FRAME_DT_SEC,
            input: InputMode::Hand,
            speed: 1.0,
            seed: None,
            tracks: DEFAULT_TRACK_COUNT,
            realtime: false,
            fail_detector: false,
            blocked_audio: false,
        }
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, fallback: T) -> T {
    match raw {
        Some(v) => v.trim().parse().unwrap_or_else(|_| {
            log::warn!("[config] ignoring {key}={v:?}");
            fallback
        }),
        None => fallback,
    }
}

fn flag(raw: Option<String>) -> bool {
    matches!(
        raw.as_deref().map(str::trim),
        Some("1") | Some("true") | Some("yes") | Some("on")
    )
}

impl HostConfig {
    /// Read `FIELD_*` overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let d = Self::default();
        let count = parse_or("FIELD_COUNT", lookup("FIELD_COUNT"), d.count);
        Self {
            shape: lookup("FIELD_SHAPE").map_or(d.shape, |s| ShapeKind::from_id(&s)),
            count: if count == 0 { d.count } else { count },
            frames: parse_or("FIELD_FRAMES", lookup("FIELD_FRAMES"), d.frames),
            frame_dt_sec: d.frame_dt_sec,
            input: parse_or("FIELD_INPUT", lookup("FIELD_INPUT"), d.input),
            speed: parse_or("FIELD_SPEED", lookup("FIELD_SPEED"), d.speed),
            seed: lookup("FIELD_SEED").and_then(|s| s.trim().parse().ok()),
            tracks: parse_or("FIELD_TRACKS", lookup("FIELD_TRACKS"), d.tracks),
            realtime: flag(lookup("FIELD_REALTIME")),
            fail_detector: flag(lookup("FIELD_FAIL_DETECTOR")),
            blocked_audio: flag(lookup("FIELD_BLOCKED_AUDIO")),
        }
    }
}
