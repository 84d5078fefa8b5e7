//! Per-frame simulation of the particle field.
//!
//! The clock is the frame delta handed to [`ParticleField::step`]. Inertia and
//! roll are integrated per frame, expansion and positions per second, so the
//! approach speed of samples does not depend on the frame rate.

use crate::audio::BandEnergies;
use crate::constants::*;
use crate::error::{FieldError, Result};
use crate::gesture::GestureBundle;
use crate::shapes::{self, equalizer_bar, ShapeKind};
use glam::{EulerRot, Quat, Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Longest frame delta the integrator accepts; longer stalls are clipped.
pub const MAX_FRAME_DT_SEC: f32 = 0.1;

/// Renderer-facing record for one sample.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SampleTransform {
    pub position: [f32; 3],
    pub scale: f32,
    pub rotation: [f32; 4],
    pub opacity: f32,
}

impl SampleTransform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position: position.to_array(),
            scale: 1.0,
            rotation: Quat::IDENTITY.to_array(),
            opacity: 1.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct FieldParams {
    /// Idle spin multiplier; 0 stops the idle rotation.
    pub speed: f32,
    /// Whether bass energy pushes the field outward and mid energy widens
    /// the shimmer.
    pub audio_reactive: bool,
    pub shimmer: f32,
    pub mid_shimmer_gain: f32,
    pub position_smoothing_per_sec: f32,
    pub expansion_rate_per_sec: f32,
    pub expansion_min: f32,
    pub expansion_max: f32,
    pub bass_boost: f32,
    pub pinch_gravity: f32,
    pub inertia_gain: f32,
    pub inertia_decay: f32,
    pub roll_lerp: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            speed: 1.0,
            audio_reactive: true,
            shimmer: SHIMMER_AMPLITUDE,
            mid_shimmer_gain: MID_SHIMMER_GAIN,
            position_smoothing_per_sec: POSITION_SMOOTHING_PER_SEC,
            expansion_rate_per_sec: EXPANSION_RATE_PER_SEC,
            expansion_min: EXPANSION_MIN,
            expansion_max: EXPANSION_MAX,
            bass_boost: BASS_EXPANSION_BOOST,
            pinch_gravity: PINCH_GRAVITY,
            inertia_gain: INERTIA_GAIN,
            inertia_decay: INERTIA_DECAY,
            roll_lerp: ROLL_LERP,
        }
    }
}

/// Everything the field reads in one frame.
#[derive(Clone, Copy, Debug)]
pub struct FieldInput {
    pub bundle: GestureBundle,
    pub openness: f32,
    pub bands: BandEnergies,
    pub bars: [f32; EQ_BARS],
}

impl Default for FieldInput {
    fn default() -> Self {
        Self {
            bundle: GestureBundle::NEUTRAL,
            openness: OPENNESS_RESTING,
            bands: BandEnergies::default(),
            bars: [0.0; EQ_BARS],
        }
    }
}

/// Expansion the field is heading toward for this input.
pub fn expansion_target(params: &FieldParams, input: &FieldInput) -> f32 {
    let openness = input.openness.clamp(0.0, 1.0);
    let mut target = params.expansion_min + openness * (params.expansion_max - params.expansion_min);
    if params.audio_reactive {
        target += input.bands.bass * params.bass_boost;
    }
    if input.bundle.is_pinching {
        // Pinch gravity: the closer the fingers, the stronger the pull inward.
        target -= params.pinch_gravity * (1.0 - input.bundle.pinch_distance.clamp(0.0, 1.0));
    }
    target.max(EXPANSION_FLOOR)
}

/// Shimmer amplitude before scaling by expansion.
pub fn shimmer_amplitude(params: &FieldParams, bands: &BandEnergies) -> f32 {
    if params.audio_reactive {
        params.shimmer * (1.0 + bands.mid.clamp(0.0, 1.0) * params.mid_shimmer_gain)
    } else {
        params.shimmer
    }
}

/// Deterministic per-index shimmer, unit amplitude.
#[inline]
fn shimmer(i: usize, t: f32) -> Vec3 {
    let fi = i as f32;
    let w = t * SHIMMER_TIME_RATE;
    Vec3::new(
        (w + fi * 0.37).sin(),
        (w * 1.3 + fi * 0.61).cos(),
        (w * 0.7 + fi * 1.13).sin(),
    )
}

pub struct ParticleField {
    pub params: FieldParams,
    shape: ShapeKind,
    base: Vec<Vec3>,
    current: Vec<Vec3>,
    inertia: Vec2,
    /// (yaw, pitch, roll)
    rotation: Vec3,
    expansion: f32,
    elapsed: f32,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(shape: ShapeKind, count: usize, params: FieldParams) -> Result<Self> {
        Self::from_rng(shape, count, params, StdRng::from_entropy())
    }

    /// Same as [`ParticleField::new`] with reproducible shape randomness.
    pub fn with_seed(shape: ShapeKind, count: usize, params: FieldParams, seed: u64) -> Result<Self> {
        Self::from_rng(shape, count, params, StdRng::seed_from_u64(seed))
    }

    fn from_rng(shape: ShapeKind, count: usize, params: FieldParams, mut rng: StdRng) -> Result<Self> {
        let base = shapes::generate_with(shape, count, &mut rng)?;
        let expansion = 1.0;
        let current = base.iter().map(|b| *b * expansion).collect();
        log::info!("[field] {} samples, shape {}", count, shape.id());
        Ok(Self {
            params,
            shape,
            base,
            current,
            inertia: Vec2::ZERO,
            rotation: Vec3::ZERO,
            expansion,
            elapsed: 0.0,
            rng,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.current.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn base(&self) -> &[Vec3] {
        &self.base
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.current
    }

    /// Current positions as `3 * len` floats.
    pub fn flat_positions(&self) -> &[f32] {
        shapes::flatten(&self.current)
    }

    pub fn expansion(&self) -> f32 {
        self.expansion
    }

    /// (yaw, pitch, roll) in radians.
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn inertia(&self) -> Vec2 {
        self.inertia
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Swap the target geometry. Current positions keep animating from where
    /// they are toward the new shape.
    pub fn set_shape(&mut self, shape: ShapeKind) {
        if shape == self.shape {
            return;
        }
        // Count is always >= 1 here, so regeneration cannot fail.
        if let Ok(base) = shapes::generate_with(shape, self.base.len(), &mut self.rng) {
            log::debug!("[field] shape {} -> {}", self.shape.id(), shape.id());
            self.base = base;
            self.shape = shape;
        }
    }

    /// Change the sample count. Base and current buffers are rebuilt together.
    pub fn set_count(&mut self, count: usize) -> Result<()> {
        if count == 0 {
            return Err(FieldError::EmptySampleSet);
        }
        if count == self.base.len() {
            return Ok(());
        }
        let base = shapes::generate_with(self.shape, count, &mut self.rng)?;
        let rot = self.orientation();
        let current = base.iter().map(|b| rot * (*b * self.expansion)).collect();
        log::debug!("[field] count {} -> {}", self.base.len(), count);
        self.base = base;
        self.current = current;
        Ok(())
    }

    pub fn step(&mut self, input: &FieldInput, dt_sec: f32) {
        let dt = dt_sec.clamp(0.0, MAX_FRAME_DT_SEC);
        self.elapsed += dt;
        let p = &self.params;
        let bundle = &input.bundle;

        if bundle.velocity.length() > INERTIA_NOISE_FLOOR {
            self.inertia += bundle.velocity * p.inertia_gain;
        }
        self.inertia *= p.inertia_decay;

        self.rotation.x += (self.inertia.x * INERTIA_ROTATION_SCALE + IDLE_SPIN_PER_SEC * p.speed) * dt;
        self.rotation.y += self.inertia.y * INERTIA_ROTATION_SCALE * dt;
        self.rotation.z += (bundle.rotation - self.rotation.z) * p.roll_lerp;

        let target_expansion = expansion_target(p, input);
        let k = (dt * p.expansion_rate_per_sec).min(1.0);
        self.expansion += (target_expansion - self.expansion) * k;

        let rot = self.orientation();
        let blend = (dt * p.position_smoothing_per_sec).min(1.0);
        let banded = self.shape.is_banded();
        let count = self.base.len();
        let expansion = self.expansion;
        let shimmer_amp = shimmer_amplitude(p, &input.bands);
        let t = self.elapsed;

        for (i, (cur, base)) in self.current.iter_mut().zip(self.base.iter()).enumerate() {
            let bar = if banded { equalizer_bar(i, count) } else { None };
            let target = match bar {
                Some(bar) => {
                    let scale = EQ_BAR_MIN_SCALE + EQ_BAR_SCALE_SPAN * input.bars[bar].clamp(0.0, 1.0);
                    Vec3::new(base.x, EQ_BASELINE + (base.y - EQ_BASELINE) * scale, base.z)
                }
                None => rot * (*base * expansion) + shimmer(i, t) * (shimmer_amp * expansion),
            };
            *cur += (target - *cur) * blend;
        }
    }

    /// Fill `out` with one renderer record per sample.
    pub fn write_transforms(&self, out: &mut Vec<SampleTransform>) {
        out.clear();
        out.extend(self.current.iter().map(|p| SampleTransform::at(*p)));
    }
}
