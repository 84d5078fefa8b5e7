// Host-side tests for configuration, input routing and the frame loop.

use field_core::gesture::LANDMARK_COUNT;
use field_core::{Camera, HandLandmarks, PointerState, ShapeKind};
use gesture_field::constants::SURFACE_ORIGIN;
use gesture_field::input::DetectorResult;
use gesture_field::synth::{ScriptedHand, ScriptedPointer, SyntheticAnalyser};
use gesture_field::{
    DetectorStatus, FrameContext, HandInput, HostConfig, HostError, InputMode, InputRouter,
    LandmarkDetector,
};
use glam::{Vec2, Vec3, Vec4};
use std::collections::HashMap;
use std::sync::mpsc;

const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);
const DT: f32 = 1.0 / 60.0;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |k: &str| map.get(k).cloned()
}

fn pointer_config(count: usize) -> HostConfig {
    HostConfig {
        count,
        input: InputMode::Pointer,
        seed: Some(3),
        ..HostConfig::default()
    }
}

fn pointer_context(config: &HostConfig, blocked: bool) -> FrameContext {
    let input = InputRouter::new(InputMode::Pointer, None, VIEWPORT);
    FrameContext::new(config, input, Box::new(SyntheticAnalyser::new(3, blocked))).unwrap()
}

#[test]
fn config_reads_overrides_and_keeps_defaults_on_bad_values() {
    let c = HostConfig::from_lookup(lookup(&[
        ("FIELD_SHAPE", "Heart"),
        ("FIELD_COUNT", "0"),
        ("FIELD_INPUT", "mouse"),
        ("FIELD_SPEED", "fast"),
        ("FIELD_SEED", "17"),
        ("FIELD_REALTIME", "1"),
        ("FIELD_TRACKS", "2"),
    ]));
    let d = HostConfig::default();
    assert_eq!(c.shape, ShapeKind::Heart);
    assert_eq!(c.count, d.count);
    assert_eq!(c.input, InputMode::Pointer);
    assert_eq!(c.speed, d.speed);
    assert_eq!(c.seed, Some(17));
    assert!(c.realtime);
    assert!(!c.fail_detector);
    assert_eq!(c.tracks, 2);

    let c = HostConfig::from_lookup(lookup(&[("FIELD_SHAPE", "cube"), ("FIELD_COUNT", "512")]));
    assert_eq!(c.shape, ShapeKind::Scatter);
    assert_eq!(c.count, 512);
    assert_eq!(c.input, InputMode::Hand);
}

#[test]
fn loading_detector_yields_neutral_input() {
    let (_tx, rx) = mpsc::channel::<DetectorResult>();
    let mut router = InputRouter::new(InputMode::Hand, Some(HandInput::from_receiver(rx)), VIEWPORT);
    router.set_pointer(PointerState { x: 10.0, y: 10.0, down: true, inside: true });
    for i in 0..5 {
        let (bundle, openness) = router.sample(i as f64 * 16.0);
        assert_eq!(bundle, field_core::GestureBundle::NEUTRAL);
        assert_eq!(openness, 0.5);
    }
    assert_eq!(router.mode(), InputMode::Hand);
    assert_eq!(router.hand_status(), Some(DetectorStatus::Loading));
}

#[test]
fn failed_setup_falls_back_to_the_pointer() {
    let (tx, rx) = mpsc::channel::<DetectorResult>();
    let mut router = InputRouter::new(InputMode::Hand, Some(HandInput::from_receiver(rx)), VIEWPORT);
    router.set_pointer(PointerState { x: 640.0, y: 360.0, down: true, inside: true });
    router.sample(0.0);
    tx.send(Err(HostError::DetectorSetup("camera permission denied".into())))
        .unwrap();
    let (bundle, openness) = router.sample(16.0);
    assert_eq!(router.mode(), InputMode::Pointer);
    assert_eq!(router.hand_status(), Some(DetectorStatus::Failed));
    assert!(bundle.is_pinching);
    assert_eq!(bundle.position, Vec2::new(0.5, 0.5));
    assert_eq!(openness, 0.5);
}

#[test]
fn vanished_setup_thread_counts_as_failure() {
    let (tx, rx) = mpsc::channel::<DetectorResult>();
    drop(tx);
    let mut router = InputRouter::new(InputMode::Hand, Some(HandInput::from_receiver(rx)), VIEWPORT);
    router.sample(0.0);
    assert_eq!(router.mode(), InputMode::Pointer);
}

#[test]
fn ready_detector_drives_the_hand_path() {
    let (tx, rx) = mpsc::channel::<DetectorResult>();
    let mut router = InputRouter::new(InputMode::Hand, Some(HandInput::from_receiver(rx)), VIEWPORT);
    let detector: Box<dyn LandmarkDetector> = Box::new(ScriptedHand::new(1));
    tx.send(Ok(detector)).unwrap();
    let (first, _) = router.sample(1000.0);
    assert_eq!(router.hand_status(), Some(DetectorStatus::Ready));
    assert_eq!(first.velocity, Vec2::ZERO);
    assert_ne!(first, field_core::GestureBundle::NEUTRAL);
    router.shutdown();
    assert_eq!(router.mode(), InputMode::Hand);
}

#[test]
fn scripted_hand_produces_valid_frames_and_gaps() {
    let mut hand = ScriptedHand::new(4);
    for i in 0..200 {
        let t_ms = i as f64 * 40.0;
        if let Some(points) = hand.detect(t_ms) {
            assert_eq!(points.len(), LANDMARK_COUNT);
            assert!(HandLandmarks::from_slice(&points).is_ok());
        }
    }
    assert!(hand.detect(9_500.0).is_none());
    assert!(hand.detect(2_000.0).is_some());
    hand.release();
    assert!(hand.detect(2_000.0).is_none());
}

#[test]
fn frame_loop_produces_finite_transforms() {
    let config = pointer_config(800);
    let mut ctx = pointer_context(&config, false);
    ctx.playback.is_playing = true;
    let pointer = ScriptedPointer { viewport: VIEWPORT };
    for n in 0..120 {
        let t_ms = n as f64 * DT as f64 * 1000.0;
        ctx.set_pointer(pointer.sample((t_ms / 1000.0) as f32));
        ctx.step(DT, t_ms);
    }
    assert_eq!(ctx.stats.frames, 120);
    assert_eq!(ctx.stats.synthetic_audio_frames, 0);
    assert_eq!(ctx.transforms().len(), 800);
    assert!(ctx
        .transforms()
        .iter()
        .all(|t| t.position.iter().all(|v| v.is_finite())));
    assert_eq!(ctx.gallery.focus(), Some(ctx.playback.track_index));

    ctx.set_count(300).unwrap();
    ctx.set_shape(ShapeKind::Equalizer);
    ctx.step(DT, 2100.0);
    assert_eq!(ctx.transforms().len(), 300);
    assert!(ctx.set_count(0).is_err());
    ctx.shutdown();
}

#[test]
fn blocked_audio_runs_on_the_oscillator() {
    let config = pointer_config(100);
    let mut ctx = pointer_context(&config, true);
    ctx.playback.is_playing = true;
    for n in 0..30 {
        ctx.step(DT, n as f64 * 16.0);
    }
    assert_eq!(ctx.stats.synthetic_audio_frames, 30);

    ctx.playback.is_playing = false;
    ctx.step(DT, 500.0);
    assert_eq!(ctx.stats.synthetic_audio_frames, 30);
    assert_eq!(ctx.gallery.focus(), None);
}

#[test]
fn pointer_click_on_the_play_zone_toggles_playback() {
    let config = pointer_config(100);
    let mut ctx = pointer_context(&config, false);
    let camera = Camera::default();
    let play = Vec3::from_array(SURFACE_ORIGIN);
    let clip = camera.projection_matrix() * camera.view_matrix() * Vec4::new(play.x, play.y, play.z, 1.0);
    let ndc = clip.truncate() / clip.w;
    let uv = Vec2::new((ndc.x + 1.0) * 0.5, (1.0 - ndc.y) * 0.5);
    let px = uv * VIEWPORT;

    ctx.set_pointer(PointerState { x: px.x, y: px.y, down: false, inside: true });
    ctx.step(DT, 0.0);
    let out = ctx.surface_output().unwrap();
    assert_eq!(out.hovered.as_deref(), Some("play"));
    assert!(!ctx.orbit.enabled);

    assert!(!ctx.playback.is_playing);
    ctx.set_pointer(PointerState { x: px.x, y: px.y, down: true, inside: true });
    ctx.step(DT, 16.0);
    assert!(ctx.playback.is_playing);
    assert_eq!(ctx.stats.zone_clicks, 1);
    assert_eq!(ctx.surface_output().unwrap().fired.as_deref(), Some("play"));

    // Pointer input never reaches the gesture playback detector.
    assert_eq!(ctx.stats.discrete_actions, 0);
}
