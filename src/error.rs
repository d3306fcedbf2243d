use thiserror::Error;

pub type Result<T> = std::result::Result<T, OverlayError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum OverlayError {
    #[error("expected 0 or {expected} landmarks, got {actual}")]
    LandmarkCount { expected: usize, actual: usize },

    #[error("invalid image size {width}x{height}")]
    InvalidImageSize { width: u32, height: u32 },

    #[error("rgba buffer has {actual} bytes, need {expected}")]
    BufferSize { expected: usize, actual: usize },
}
