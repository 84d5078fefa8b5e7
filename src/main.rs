use anyhow::Context;
use gesture_field::constants::{DETECTOR_WARMUP_MS, STATS_LOG_EVERY};
use gesture_field::synth::{ScriptedHand, ScriptedPointer, SyntheticAnalyser};
use gesture_field::{FrameContext, HandInput, HostConfig, HostError, InputMode, InputRouter};
use glam::Vec2;
use std::time::Duration;

const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

fn build_input(config: &HostConfig, seed: u64) -> InputRouter {
    let hand = (config.input == InputMode::Hand).then(|| {
        let fail = config.fail_detector;
        HandInput::spawn(move || {
            // Stand-in for model download and camera permission.
            std::thread::sleep(Duration::from_millis(DETECTOR_WARMUP_MS));
            if fail {
                return Err(HostError::DetectorSetup("hand model failed to load".into()));
            }
            Ok(Box::new(ScriptedHand::new(seed)) as Box<dyn gesture_field::LandmarkDetector>)
        })
    });
    InputRouter::new(config.input, hand, VIEWPORT)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = HostConfig::from_env();
    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!(
        "[host] shape={} count={} input={:?} frames={} seed={}",
        config.shape.id(),
        config.count,
        config.input,
        config.frames,
        seed
    );

    let input = build_input(&config, seed);
    let analyser = Box::new(SyntheticAnalyser::new(seed, config.blocked_audio));
    let mut ctx = FrameContext::new(&config, input, analyser).context("building frame context")?;
    ctx.playback.is_playing = true;
    let pointer = ScriptedPointer { viewport: VIEWPORT };

    let dt = config.frame_dt_sec;
    for n in 0..config.frames {
        let t_ms = if config.realtime {
            ctx.clock_ms()
        } else {
            n as f64 * dt as f64 * 1000.0
        };
        ctx.set_pointer(pointer.sample((t_ms / 1000.0) as f32));
        if config.realtime {
            ctx.frame();
            std::thread::sleep(Duration::from_secs_f32(dt));
        } else {
            ctx.step(dt, t_ms);
            if n == 0 {
                // Give the detector thread a moment in simulated runs.
                std::thread::sleep(Duration::from_millis(DETECTOR_WARMUP_MS + 10));
            }
        }

        if n % STATS_LOG_EVERY == 0 {
            let bundle = ctx.bundle_signal().latest();
            log::info!(
                "[host] frame {:>5} expansion={:.3} yaw={:.2} openness={:.2} pinch={} playing={} track={} vol={:.2}",
                n,
                ctx.field.expansion(),
                ctx.field.rotation().x,
                ctx.openness_signal().latest(),
                bundle.is_pinching,
                ctx.playback.is_playing,
                ctx.playback.track_index,
                ctx.playback.volume
            );
        }
    }

    let stats = ctx.stats.clone();
    ctx.shutdown();
    log::info!(
        "[host] done: frames={} waves={} actions={} zone_clicks={} synthetic_audio_frames={} input={:?}",
        stats.frames,
        stats.waves,
        stats.discrete_actions,
        stats.zone_clicks,
        stats.synthetic_audio_frames,
        ctx.input().mode()
    );
    Ok(())
}
