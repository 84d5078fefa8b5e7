//! Coarse band energies from an analyser spectrum.
//!
//! A cross-origin media element can play normally while the analyser reports
//! nothing but zeros. There is no flag for that case, so an all-zero spectrum
//! during playback is taken to mean "blocked" and a time-based oscillator
//! stands in. Truly silent audio looks the same and gets the oscillator too.

use crate::constants::{
    BASS_BINS, EQ_BARS, FALLBACK_WAVE_PHASE_STEP, FALLBACK_WAVE_RATE, MID_BINS,
};
use std::ops::Range;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BandEnergies {
    pub bass: f32,
    pub mid: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BandSource {
    Spectrum,
    Synthetic,
    Silent,
}

/// Classify a spectrum snapshot. Only the host looks at this.
pub fn band_source(spectrum: &[u8], playing: bool) -> BandSource {
    let empty = spectrum.iter().all(|&b| b == 0);
    match (empty, playing) {
        (false, _) => BandSource::Spectrum,
        (true, true) => BandSource::Synthetic,
        (true, false) => BandSource::Silent,
    }
}

/// Mean of `bins` within the spectrum, normalized to [0,1].
#[inline]
fn mean_range(spectrum: &[u8], bins: Range<usize>) -> f32 {
    let end = bins.end.min(spectrum.len());
    let start = bins.start.min(end);
    let slice = &spectrum[start..end];
    if slice.is_empty() {
        return 0.0;
    }
    let sum: u32 = slice.iter().map(|&b| b as u32).sum();
    sum as f32 / (slice.len() as f32 * 255.0)
}

/// Bass and mid energies for one frame. Pure in its arguments.
pub fn band_energies(spectrum: &[u8], playing: bool, time_sec: f32) -> BandEnergies {
    match band_source(spectrum, playing) {
        BandSource::Spectrum => BandEnergies {
            bass: mean_range(spectrum, BASS_BINS),
            mid: mean_range(spectrum, MID_BINS),
        },
        BandSource::Synthetic => BandEnergies {
            bass: 0.45 + 0.35 * (time_sec * 4.0).sin(),
            mid: 0.35 + 0.25 * (time_sec * 6.3 + 1.1).sin(),
        },
        BandSource::Silent => BandEnergies::default(),
    }
}

/// Per-bar energies for the equalizer layout: the spectrum split into
/// [`EQ_BARS`] contiguous groups, or a traveling wave when blocked.
pub fn bar_energies(spectrum: &[u8], playing: bool, time_sec: f32) -> [f32; EQ_BARS] {
    let mut bars = [0.0; EQ_BARS];
    match band_source(spectrum, playing) {
        BandSource::Spectrum => {
            let width = (spectrum.len() / EQ_BARS).max(1);
            for (i, bar) in bars.iter_mut().enumerate() {
                *bar = mean_range(spectrum, i * width..(i + 1) * width);
            }
        }
        BandSource::Synthetic => {
            for (i, bar) in bars.iter_mut().enumerate() {
                let phase = time_sec * FALLBACK_WAVE_RATE - i as f32 * FALLBACK_WAVE_PHASE_STEP;
                *bar = 0.5 + 0.5 * phase.sin();
            }
        }
        BandSource::Silent => {}
    }
    bars
}

/// Anything that can hand over the latest spectrum snapshot. Whether audio
/// is playing comes from the player state, not from here.
pub trait SpectrumSource {
    /// Copy the latest bins into `out`.
    fn fill(&mut self, out: &mut [u8]);
}
