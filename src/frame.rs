use crate::config::{HostConfig, InputMode};
use crate::constants::*;
use crate::input::InputRouter;
use field_core::constants::SPECTRUM_BINS;
use field_core::physics::FieldInput;
use field_core::{
    band_energies, band_source, bar_energies, BandSource, Camera, CameraRotationControl,
    ControlSurface, FieldError, FieldParams, Gallery, GestureBundle, GestureEvent, HitZone,
    ParticleField, PlaybackAction, PlaybackDetector, PlaybackState, PointerState, SampleTransform,
    ShapeKind, SignalCell, SpectrumSource, SurfaceOutput, SurfaceState, WaveConfig, WaveDetector,
};
use fnv::FnvHashMap;
use glam::{Vec2, Vec3};
use instant::Instant;

/// Orbit-style camera controls as far as the core is concerned: a switch.
#[derive(Debug, Default)]
pub struct OrbitControl {
    pub enabled: bool,
}

impl CameraRotationControl for OrbitControl {
    fn set_rotation_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

#[derive(Debug, Default, Clone)]
pub struct FrameStats {
    pub frames: u64,
    pub waves: u32,
    pub discrete_actions: u32,
    pub zone_clicks: u32,
    pub synthetic_audio_frames: u64,
}

pub struct FrameContext {
    pub field: ParticleField,
    pub gallery: Gallery,
    pub surface: ControlSurface,
    pub camera: Camera,
    pub orbit: OrbitControl,
    pub playback: PlaybackState,
    pub stats: FrameStats,
    /// Toggled by a wave: whether the host shows its camera preview.
    pub camera_preview: bool,

    input: InputRouter,
    wave: WaveDetector,
    playback_detector: PlaybackDetector,
    analyser: Box<dyn SpectrumSource>,
    spectrum: Vec<u8>,
    band_source: BandSource,
    zone_actions: FnvHashMap<String, PlaybackAction>,

    bundle: SignalCell<GestureBundle>,
    openness: SignalCell<f32>,
    last_surface: Option<SurfaceOutput>,
    transforms: Vec<SampleTransform>,
    gallery_homes: Vec<Vec3>,

    last_instant: Instant,
    started: Instant,
    clock_ms: f64,
}

pub fn default_zones() -> Result<Vec<HitZone>, FieldError> {
    ZONE_LAYOUT
        .iter()
        .map(|(id, c)| HitZone::new(*id, Vec2::from_array(*c), ZONE_RADIUS))
        .collect()
}

fn default_zone_actions() -> FnvHashMap<String, PlaybackAction> {
    let mut map = FnvHashMap::default();
    map.insert("prev".to_string(), PlaybackAction::Previous);
    map.insert("play".to_string(), PlaybackAction::TogglePlay);
    map.insert("next".to_string(), PlaybackAction::Next);
    map
}

impl FrameContext {
    pub fn new(
        config: &HostConfig,
        input: InputRouter,
        analyser: Box<dyn SpectrumSource>,
    ) -> Result<Self, FieldError> {
        let params = FieldParams {
            speed: config.speed,
            ..FieldParams::default()
        };
        let field = match config.seed {
            Some(seed) => ParticleField::with_seed(config.shape, config.count, params, seed)?,
            None => ParticleField::new(config.shape, config.count, params)?,
        };
        let surface = ControlSurface::new(default_zones()?, Vec3::from_array(SURFACE_ORIGIN))
            .with_plane(SURFACE_ORIGIN[2])
            .with_grab_radius(SURFACE_GRAB_RADIUS);
        let now = Instant::now();
        Ok(Self {
            field,
            gallery: Gallery::new(GALLERY_ITEMS),
            surface,
            camera: Camera::default(),
            orbit: OrbitControl { enabled: true },
            playback: PlaybackState::new(config.tracks),
            stats: FrameStats::default(),
            camera_preview: config.input == InputMode::Hand,
            input,
            wave: WaveDetector::new(WaveConfig::default()),
            playback_detector: PlaybackDetector::default(),
            analyser,
            spectrum: vec![0; SPECTRUM_BINS],
            band_source: BandSource::Silent,
            zone_actions: default_zone_actions(),
            bundle: SignalCell::new(GestureBundle::NEUTRAL),
            openness: SignalCell::new(field_core::constants::OPENNESS_RESTING),
            last_surface: None,
            transforms: Vec::new(),
            gallery_homes: Vec::with_capacity(GALLERY_ITEMS),
            last_instant: now,
            started: now,
            clock_ms: 0.0,
        })
    }

    /// Read-only handle onto the published bundle.
    pub fn bundle_signal(&self) -> SignalCell<GestureBundle> {
        self.bundle.clone()
    }

    pub fn openness_signal(&self) -> SignalCell<f32> {
        self.openness.clone()
    }

    pub fn input(&self) -> &InputRouter {
        &self.input
    }

    pub fn set_pointer(&mut self, pointer: PointerState) {
        self.input.set_pointer(pointer);
    }

    pub fn set_shape(&mut self, shape: ShapeKind) {
        self.field.set_shape(shape);
    }

    pub fn set_count(&mut self, count: usize) -> Result<(), FieldError> {
        self.field.set_count(count)
    }

    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    pub fn surface_output(&self) -> Option<&SurfaceOutput> {
        self.last_surface.as_ref()
    }

    /// Renderer records for the field, refreshed every step.
    pub fn transforms(&self) -> &[SampleTransform] {
        &self.transforms
    }

    /// One wall-clock frame.
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        let now_ms = (now - self.started).as_secs_f64() * 1000.0;
        self.step(dt.as_secs_f32(), now_ms);
    }

    /// One simulation step at an explicit time.
    pub fn step(&mut self, dt_sec: f32, now_ms: f64) {
        self.clock_ms = now_ms;
        let t_sec = (now_ms / 1000.0) as f32;

        let (bundle, openness) = self.input.sample(now_ms);
        self.bundle.publish(bundle);
        self.openness.publish(openness);

        let surface = self
            .surface
            .step_with_camera(&bundle, &self.camera, &mut self.orbit);
        if let Some(id) = &surface.fired {
            if let Some(&action) = self.zone_actions.get(id) {
                log::info!("[frame] zone {} -> {:?}", id, action);
                self.playback.apply(action);
                self.stats.zone_clicks += 1;
            }
        }
        // A pinch over the surface is a click or a drag, not a toggle.
        let pinch_claimed = surface.fired.is_some() || surface.state != SurfaceState::Idle;
        self.last_surface = Some(surface);

        if self.input.mode() == InputMode::Hand {
            if self.wave.update(&bundle, now_ms) == Some(GestureEvent::Wave) {
                self.camera_preview = !self.camera_preview;
                self.stats.waves += 1;
            }
            let actions = self
                .playback_detector
                .update_routed(&bundle, openness, now_ms, pinch_claimed);
            for a in &actions {
                if !a.is_continuous() {
                    self.stats.discrete_actions += 1;
                    log::info!("[frame] gesture action {:?}", a);
                }
            }
            self.playback.apply_all(&actions);
        }

        let playing = self.playback.is_playing;
        if playing {
            self.analyser.fill(&mut self.spectrum);
        } else {
            self.spectrum.fill(0);
        }
        let source = band_source(&self.spectrum, playing);
        if source != self.band_source {
            log::debug!("[frame] audio bands from {:?}", source);
            self.band_source = source;
        }
        if source == BandSource::Synthetic {
            self.stats.synthetic_audio_frames += 1;
        }

        let input = FieldInput {
            bundle,
            openness,
            bands: band_energies(&self.spectrum, playing, t_sec),
            bars: bar_energies(&self.spectrum, playing, t_sec),
        };
        self.field.step(&input, dt_sec);
        self.field.write_transforms(&mut self.transforms);

        // Gallery cards ride on evenly spaced field samples.
        let stride = (self.field.len() / self.gallery.len().max(1)).max(1);
        self.gallery_homes.clear();
        self.gallery_homes
            .extend(self.field.positions().iter().step_by(stride).take(self.gallery.len()));
        let focus = if playing && self.playback.track_count > 0 {
            Some(self.playback.track_index % self.gallery.len().max(1))
        } else {
            None
        };
        self.gallery.set_focus(focus);
        self.gallery.step(&self.gallery_homes, &self.camera);

        self.stats.frames += 1;
    }

    /// Release devices. The loop must not be stepped afterwards.
    pub fn shutdown(&mut self) {
        self.input.shutdown();
        self.spectrum.fill(0);
        log::info!("[frame] shut down after {} frames", self.stats.frames);
    }
}
