//! Input sources feeding the gesture bundle.
//!
//! Hand tracking needs a detector whose setup (model load, camera
//! permission) can take a while or fail. Setup runs on its own thread and
//! reports back over a channel; the frame loop never waits for it. Until it
//! is ready the hand path yields neutral input, and if it fails the router
//! falls back to the pointer.

use crate::config::InputMode;
use crate::error::HostError;
use field_core::constants::OPENNESS_RESTING;
use field_core::{GestureBundle, HandLandmarks, HandNormalizer, PointerMapper, PointerState};
use glam::{Vec2, Vec3};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

/// External landmark detector: at most one hand per frame.
pub trait LandmarkDetector: Send {
    /// Raw landmarks for the latest camera frame, or `None` when no hand.
    fn detect(&mut self, now_ms: f64) -> Option<Vec<Vec3>>;
    /// Release the camera stream and model.
    fn release(&mut self) {}
}

pub type DetectorResult = Result<Box<dyn LandmarkDetector>, HostError>;

/// Run detector setup on a worker thread and return the receiving end.
pub fn spawn_detector_setup<F>(setup: F) -> Receiver<DetectorResult>
where
    F: FnOnce() -> DetectorResult + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        // Nobody is listening any more: release what setup acquired.
        if let Err(mpsc::SendError(Ok(mut detector))) = tx.send(setup()) {
            detector.release();
            log::debug!("[input] hand detector released after teardown");
        }
    });
    rx
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetectorStatus {
    Loading,
    Ready,
    Failed,
}

pub struct HandInput {
    status: DetectorStatus,
    pending: Option<Receiver<DetectorResult>>,
    detector: Option<Box<dyn LandmarkDetector>>,
    normalizer: HandNormalizer,
}

impl HandInput {
    pub fn spawn<F>(setup: F) -> Self
    where
        F: FnOnce() -> DetectorResult + Send + 'static,
    {
        Self::from_receiver(spawn_detector_setup(setup))
    }

    pub fn from_receiver(rx: Receiver<DetectorResult>) -> Self {
        Self {
            status: DetectorStatus::Loading,
            pending: Some(rx),
            detector: None,
            normalizer: HandNormalizer::new(),
        }
    }

    pub fn status(&self) -> DetectorStatus {
        self.status
    }

    /// Check once, without blocking, whether setup has finished.
    pub fn poll_setup(&mut self) -> DetectorStatus {
        let Some(rx) = &self.pending else {
            return self.status;
        };
        let outcome = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return self.status,
            Err(TryRecvError::Disconnected) => Err(HostError::DetectorDisconnected),
        };
        self.pending = None;
        match outcome {
            Ok(detector) => {
                log::info!("[input] hand detector ready");
                self.detector = Some(detector);
                self.status = DetectorStatus::Ready;
            }
            Err(e) => {
                log::warn!("[input] hand tracking unavailable: {e}");
                self.status = DetectorStatus::Failed;
            }
        }
        self.status
    }

    pub fn sample(&mut self, now_ms: f64) -> GestureBundle {
        let raw = self.detector.as_mut().and_then(|d| d.detect(now_ms));
        let hand = raw.and_then(|points| match HandLandmarks::from_slice(&points) {
            Ok(hand) => Some(hand),
            Err(e) => {
                log::debug!("[input] dropping landmark frame: {e}");
                None
            }
        });
        self.normalizer.update(hand.as_ref())
    }

    pub fn openness(&self) -> f32 {
        self.normalizer.openness()
    }

    pub fn release(&mut self) {
        if let Some(mut d) = self.detector.take() {
            d.release();
            log::info!("[input] hand detector released");
        }
        self.pending = None;
    }
}

impl Drop for HandInput {
    fn drop(&mut self) {
        self.release();
    }
}

/// Chooses between hand and pointer input each frame.
pub struct InputRouter {
    mode: InputMode,
    hand: Option<HandInput>,
    pointer: PointerMapper,
    pointer_state: PointerState,
    viewport: Vec2,
}

impl InputRouter {
    pub fn new(mode: InputMode, hand: Option<HandInput>, viewport: Vec2) -> Self {
        let mode = if hand.is_none() { InputMode::Pointer } else { mode };
        Self {
            mode,
            hand,
            pointer: PointerMapper::new(),
            pointer_state: PointerState::default(),
            viewport,
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn hand_status(&self) -> Option<DetectorStatus> {
        self.hand.as_ref().map(HandInput::status)
    }

    pub fn set_pointer(&mut self, pointer: PointerState) {
        self.pointer_state = pointer;
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }

    /// This frame's bundle and smoothed openness.
    pub fn sample(&mut self, now_ms: f64) -> (GestureBundle, f32) {
        if self.mode == InputMode::Hand {
            if let Some(hand) = self.hand.as_mut() {
                match hand.poll_setup() {
                    DetectorStatus::Ready => return (hand.sample(now_ms), hand.openness()),
                    DetectorStatus::Loading => return (GestureBundle::NEUTRAL, hand.openness()),
                    DetectorStatus::Failed => {
                        log::info!("[input] falling back to pointer input");
                        self.mode = InputMode::Pointer;
                    }
                }
            }
        }
        let bundle = self.pointer.update(&self.pointer_state, self.viewport);
        (bundle, OPENNESS_RESTING)
    }

    pub fn shutdown(&mut self) {
        if let Some(hand) = self.hand.as_mut() {
            hand.release();
        }
    }
}
