//! Host side of gesture-field: input selection, detector setup, the frame
//! loop and synthetic sources for headless runs. The engine itself lives in
//! `field-core`.

pub mod config;
pub mod constants;
pub mod error;
pub mod frame;
pub mod input;
pub mod synth;

pub use config::{HostConfig, InputMode};
pub use error::HostError;
pub use frame::{FrameContext, FrameStats, OrbitControl};
pub use input::{DetectorStatus, HandInput, InputRouter, LandmarkDetector};
