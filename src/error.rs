use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("hand detector setup failed: {0}")]
    DetectorSetup(String),
    #[error("hand detector setup thread went away before reporting")]
    DetectorDisconnected,
    #[error(transparent)]
    Field(#[from] field_core::FieldError),
}
