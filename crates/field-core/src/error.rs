use thiserror::Error;

/// Construction-time errors. Nothing on the per-frame path returns these;
/// bad runtime input degrades to neutral values instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FieldError {
    #[error("sample count must be at least 1")]
    EmptySampleSet,
    #[error("expected {expected} hand landmarks, got {got}")]
    LandmarkCount { expected: usize, got: usize },
    #[error("landmark {index} has a non-finite coordinate")]
    NonFiniteLandmark { index: usize },
    #[error("hit zone `{id}` has invalid radius {radius}")]
    InvalidZoneRadius { id: String, radius: f32 },
}

pub type Result<T> = std::result::Result<T, FieldError>;
