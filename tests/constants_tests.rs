// Host-side sanity checks for tuning constants.

use field_core::constants::*;
use field_core::SignalCell;
use gesture_field::constants::{ZONE_LAYOUT, ZONE_RADIUS};

#[test]
fn ranges_are_ordered() {
    assert!(OPENNESS_RANGE_MIN < OPENNESS_RANGE_MAX);
    assert!(PLAYBACK_CLOSED_LEVEL < PLAYBACK_OPEN_LEVEL);
    assert!(EXPANSION_FLOOR < EXPANSION_MIN && EXPANSION_MIN < EXPANSION_MAX);
    assert!(UNFOCUSED_OPACITY > 0.0 && UNFOCUSED_OPACITY < 1.0);
    assert!(INERTIA_DECAY > 0.0 && INERTIA_DECAY < 1.0);
}

#[test]
fn audio_bands_fit_in_the_spectrum() {
    assert_eq!(SPECTRUM_BINS, FFT_SIZE / 2);
    assert!(BASS_BINS.end <= MID_BINS.start);
    assert!(MID_BINS.end <= SPECTRUM_BINS);
    assert_eq!(SPECTRUM_BINS % EQ_BARS, 0);
}

#[test]
fn wave_cooldown_outlasts_the_return_window() {
    assert!(WAVE_COOLDOWN_MS > WAVE_RETURN_WINDOW_MS);
    assert!(PLAYBACK_THROW_SPEED > PLAYBACK_SWIPE_THRESHOLD);
}

#[test]
fn control_zones_do_not_overlap() {
    for (i, (a, ca)) in ZONE_LAYOUT.iter().enumerate() {
        for (b, cb) in ZONE_LAYOUT.iter().skip(i + 1) {
            assert_ne!(a, b);
            let d = ((ca[0] - cb[0]).powi(2) + (ca[1] - cb[1]).powi(2)).sqrt();
            assert!(d > 2.0 * ZONE_RADIUS, "{a} and {b} overlap");
        }
    }
}

#[test]
fn signal_handles_share_one_slot() {
    let writer = SignalCell::new(0.5f32);
    let reader = writer.clone();
    assert_eq!(writer.handles(), 2);
    writer.publish(0.9);
    assert_eq!(reader.latest(), 0.9);
    // Nothing published this frame: readers see the previous value.
    assert_eq!(reader.latest(), 0.9);
    drop(reader);
    assert_eq!(writer.handles(), 1);
}
