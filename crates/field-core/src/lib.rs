//! Gesture interpretation and physics-driven animation for a particle field.
//!
//! Everything here is platform free and single threaded: the host calls into
//! it once per rendered frame and hands the resulting numbers to its renderer.

pub mod audio;
pub mod camera;
pub mod constants;
pub mod error;
pub mod events;
pub mod gallery;
pub mod gesture;
pub mod interaction;
pub mod physics;
pub mod playback;
pub mod shapes;
pub mod signal;

pub use audio::{band_energies, bar_energies, band_source, BandEnergies, BandSource, SpectrumSource};
pub use camera::Camera;
pub use error::FieldError;
pub use events::{GestureEvent, PinchEdge, WaveConfig, WaveDetector, WavePhase};
pub use gallery::{Gallery, GalleryItem};
pub use gesture::{GestureBundle, HandLandmarks, HandNormalizer, PointerMapper, PointerState};
pub use interaction::{CameraRotationControl, ControlSurface, HitZone, SurfaceOutput, SurfaceState};
pub use physics::{FieldInput, FieldParams, ParticleField, SampleTransform};
pub use playback::{PlaybackAction, PlaybackActions, PlaybackConfig, PlaybackDetector, PlaybackState};
pub use shapes::ShapeKind;
pub use signal::SignalCell;
