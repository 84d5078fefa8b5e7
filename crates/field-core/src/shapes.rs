//! Base geometry for the particle field.
//!
//! Every position is a function of `(kind, i, count)` plus, for some kinds, a
//! random source. Heart, flower, spiral and the scatter cube draw from that
//! source, so two calls with the thread RNG give different clouds. Pass a
//! seeded RNG to [`generate_with`] when output has to be reproducible.

use crate::constants::{EQ_BARS, EQ_BAR_HEIGHT, EQ_BAR_SPACING, EQ_BASELINE};
use crate::error::{FieldError, Result};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::{PI, TAU};

const GOLDEN_ANGLE: f32 = 2.399_963;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Sphere,
    Heart,
    Flower,
    Saturn,
    Figure,
    Spiral,
    Equalizer,
    /// Uniform random cube; also what unknown ids resolve to.
    Scatter,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 8] = [
        ShapeKind::Sphere,
        ShapeKind::Heart,
        ShapeKind::Flower,
        ShapeKind::Saturn,
        ShapeKind::Figure,
        ShapeKind::Spiral,
        ShapeKind::Equalizer,
        ShapeKind::Scatter,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ShapeKind::Sphere => "sphere",
            ShapeKind::Heart => "heart",
            ShapeKind::Flower => "flower",
            ShapeKind::Saturn => "saturn",
            ShapeKind::Figure => "figure",
            ShapeKind::Spiral => "spiral",
            ShapeKind::Equalizer => "equalizer",
            ShapeKind::Scatter => "scatter",
        }
    }

    /// Resolve a shape id. Anything unrecognised becomes [`ShapeKind::Scatter`].
    pub fn from_id(id: &str) -> Self {
        let id = id.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.id().eq_ignore_ascii_case(id))
            .unwrap_or(ShapeKind::Scatter)
    }

    /// Banded shapes are driven per bar by audio rather than by expansion.
    pub fn is_banded(&self) -> bool {
        matches!(self, ShapeKind::Equalizer)
    }
}

/// Generate `count` base positions using the thread RNG.
pub fn generate(kind: ShapeKind, count: usize) -> Result<Vec<Vec3>> {
    generate_with(kind, count, &mut rand::thread_rng())
}

/// Generate `count` base positions drawing randomness from `rng`.
pub fn generate_with<R: Rng + ?Sized>(
    kind: ShapeKind,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Vec3>> {
    if count == 0 {
        return Err(FieldError::EmptySampleSet);
    }
    let positions = (0..count)
        .map(|i| match kind {
            ShapeKind::Sphere => even_spread(i, count),
            ShapeKind::Heart => heart(i, count, rng),
            ShapeKind::Flower => flower(i, count, rng),
            ShapeKind::Saturn => saturn(i, count),
            ShapeKind::Figure => figure(i, count),
            ShapeKind::Spiral => spiral(i, count, rng),
            ShapeKind::Equalizer => equalizer(i, count),
            ShapeKind::Scatter => scatter(rng),
        })
        .collect::<Vec<_>>();
    log::debug!("[shapes] generated {} x {}", kind.id(), count);
    Ok(positions)
}

/// View a position buffer as `3 * len` floats for upload.
#[inline]
pub fn flatten(positions: &[Vec3]) -> &[f32] {
    bytemuck::cast_slice(positions)
}

/// Fibonacci-style unit sphere point for index `i` of `count`.
#[inline]
pub fn even_spread(i: usize, count: usize) -> Vec3 {
    let n = count.max(1) as f32;
    let phi = (-1.0 + 2.0 * i as f32 / n).clamp(-1.0, 1.0).acos();
    let theta = (n * PI).sqrt() * phi;
    Vec3::new(
        theta.cos() * phi.sin(),
        theta.sin() * phi.sin(),
        phi.cos(),
    )
}

/// Which equalizer bar index `i` belongs to, or `None` for leftover samples
/// once `count` has been split into [`EQ_BARS`] equal columns.
#[inline]
pub fn equalizer_bar(i: usize, count: usize) -> Option<usize> {
    let per_bar = count / EQ_BARS;
    if per_bar == 0 || i >= per_bar * EQ_BARS {
        return None;
    }
    Some(i / per_bar)
}

fn heart<R: Rng + ?Sized>(i: usize, count: usize, rng: &mut R) -> Vec3 {
    let t = i as f32 / count as f32 * TAU;
    let s = t.sin();
    let x = 16.0 * s * s * s;
    let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    // Pull some samples inside the outline so the heart reads as filled.
    let fill = rng.gen_range(0.75..=1.0_f32);
    Vec3::new(
        x / 16.0 * fill,
        y / 16.0 * fill,
        rng.gen_range(-0.15..=0.15_f32),
    )
}

fn flower<R: Rng + ?Sized>(i: usize, count: usize, rng: &mut R) -> Vec3 {
    const PETALS: f32 = 5.0;
    let theta = i as f32 / count as f32 * TAU;
    let r = (PETALS * theta).cos() * 1.2;
    let thickness = rng.gen_range(-0.04..=0.04_f32);
    Vec3::new(
        (r + thickness) * theta.cos(),
        (r + thickness) * theta.sin(),
        rng.gen_range(-0.1..=0.1_f32),
    )
}

fn saturn(i: usize, count: usize) -> Vec3 {
    let planet = (count * 3 / 5).clamp(1, count);
    if i < planet {
        return even_spread(i, planet) * 0.8;
    }
    let j = (i - planet) as f32;
    let angle = j * GOLDEN_ANGLE;
    let band = (j * 0.618_034).fract();
    let radius = 1.3 + 0.7 * band;
    let flat = Vec3::new(radius * angle.cos(), 0.0, radius * angle.sin());
    // Tilt the ring plane toward the viewer.
    glam::Quat::from_rotation_x(0.4) * flat
}

fn figure(i: usize, count: usize) -> Vec3 {
    // Cumulative share of samples per part: head, torso, arms, legs.
    const SPLITS: [f32; 6] = [0.2, 0.55, 0.675, 0.8, 0.9, 1.0];
    let f = i as f32 / count as f32;
    let part = SPLITS.iter().position(|&s| f < s).unwrap_or(SPLITS.len() - 1);
    let start = if part == 0 {
        0
    } else {
        (SPLITS[part - 1] * count as f32) as usize
    };
    let end = ((SPLITS[part] * count as f32) as usize).max(start + 1);
    let k = i.saturating_sub(start);
    let local = k as f32 / (end - start) as f32;
    let angle = k as f32 * GOLDEN_ANGLE;

    let cylinder = |base: Vec3, axis: Vec3, length: f32, radius: f32| {
        let axis = axis.normalize();
        let side = axis.any_orthonormal_vector();
        let up = axis.cross(side);
        base + axis * (local * length) + (side * angle.cos() + up * angle.sin()) * radius
    };

    match part {
        0 => Vec3::new(0.0, 1.1, 0.0) + even_spread(k, end - start) * 0.3,
        1 => cylinder(Vec3::new(0.0, 0.75, 0.0), Vec3::NEG_Y, 1.0, 0.28),
        2 => cylinder(Vec3::new(-0.3, 0.7, 0.0), Vec3::new(-1.0, -1.2, 0.0), 0.8, 0.08),
        3 => cylinder(Vec3::new(0.3, 0.7, 0.0), Vec3::new(1.0, -1.2, 0.0), 0.8, 0.08),
        4 => cylinder(Vec3::new(-0.15, -0.25, 0.0), Vec3::new(-0.2, -1.0, 0.0), 1.0, 0.1),
        _ => cylinder(Vec3::new(0.15, -0.25, 0.0), Vec3::new(0.2, -1.0, 0.0), 1.0, 0.1),
    }
}

fn spiral<R: Rng + ?Sized>(i: usize, count: usize, rng: &mut R) -> Vec3 {
    const ARMS: usize = 3;
    const TURNS: f32 = 2.0;
    const OUTER_RADIUS: f32 = 1.6;
    let arm = i % ARMS;
    let per_arm = count.div_ceil(ARMS).max(1);
    let t = (i / ARMS) as f32 / per_arm as f32;
    let theta = t * TURNS * TAU;
    // Archimedean: radius grows linearly with the swept angle.
    let a = OUTER_RADIUS / (TURNS * TAU);
    let r = 0.05 + a * theta;
    let angle = theta + arm as f32 * TAU / ARMS as f32;
    let jitter = 0.08 * (0.3 + t);
    Vec3::new(
        r * angle.cos() + rng.gen_range(-jitter..=jitter),
        rng.gen_range(-0.05..=0.05_f32),
        r * angle.sin() + rng.gen_range(-jitter..=jitter),
    )
}

fn equalizer(i: usize, count: usize) -> Vec3 {
    match equalizer_bar(i, count) {
        Some(bar) => {
            let per_bar = count / EQ_BARS;
            let k = i % per_bar;
            let x = (bar as f32 - (EQ_BARS as f32 - 1.0) * 0.5) * EQ_BAR_SPACING;
            let y = EQ_BASELINE + k as f32 / per_bar as f32 * EQ_BAR_HEIGHT;
            let a = k as f32 * GOLDEN_ANGLE;
            Vec3::new(x + 0.06 * a.cos(), y, 0.06 * a.sin())
        }
        // Leftovers form a loose shell around the bars.
        None => even_spread(i, count) * 1.6,
    }
}

fn scatter<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    Vec3::new(
        rng.gen_range(-1.0..=1.0_f32),
        rng.gen_range(-1.0..=1.0_f32),
        rng.gen_range(-1.0..=1.0_f32),
    )
}
