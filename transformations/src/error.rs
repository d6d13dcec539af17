use std::path::PathBuf;

use thiserror::Error;

use crate::device::Device;

#[derive(Error, Debug)]
pub enum TransformationError {
    #[error("Unknown model variant: {0}")]
    UnknownModel(String),

    #[error("Device not supported by this backend: {0}")]
    UnsupportedDevice(Device),

    #[error("Weights not found at {}", path.display())]
    MissingWeights { path: PathBuf },

    #[error("Invalid weights at {}: {reason}", path.display())]
    InvalidWeights { path: PathBuf, reason: String },

    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Processing error: {0}")]
    ProcessingError(String),
}

pub type Result<T> = std::result::Result<T, TransformationError>;
