use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("No image payload at position {index}")]
    MissingImage { index: usize },

    #[error("Image decoding error: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Transformation error: {0}")]
    Transformation(#[from] transformations::TransformationError),

    #[error("Image encoding error: {0}")]
    Encode(String),

    #[error("Inference panicked: {0}")]
    Panicked(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Upload exceeds the {limit} byte limit")]
    PayloadTooLarge { limit: usize },

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Multipart error: {0}")]
    Multipart(String),
}

// Stored as text so the error stays `Send`; some multipart errors wrap a non-`Send` cause.
impl From<actix_multipart::MultipartError> for AdapterError {
    fn from(err: actix_multipart::MultipartError) -> Self {
        AdapterError::Multipart(err.to_string())
    }
}

/// Coarse origin of a failure, used when reporting diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Input,
    Backend,
    Unknown,
}

impl ErrorClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorClass::Input => "input",
            ErrorClass::Backend => "backend",
            ErrorClass::Unknown => "unknown",
        }
    }
}

impl AdapterError {
    pub fn class(&self) -> ErrorClass {
        use transformations::TransformationError as T;

        match self {
            Self::MissingImage { .. }
            | Self::ImageDecode(_)
            | Self::InvalidParameter { .. }
            | Self::InvalidInput(_)
            | Self::PayloadTooLarge { .. }
            | Self::Multipart(_) => ErrorClass::Input,
            Self::Transformation(T::UnknownModel(_) | T::InvalidInput(_)) => ErrorClass::Input,
            Self::Transformation(_) | Self::Encode(_) => ErrorClass::Backend,
            Self::Panicked(_) | Self::Internal(_) => ErrorClass::Unknown,
        }
    }
}

impl ResponseError for AdapterError {
    fn error_response(&self) -> HttpResponse {
        let (mut status, error_type) = match self {
            Self::InvalidInput(_) | Self::Multipart(_) => {
                (HttpResponse::BadRequest(), "invalid_request")
            }
            Self::PayloadTooLarge { .. } => (HttpResponse::PayloadTooLarge(), "payload_too_large"),
            Self::MissingImage { .. }
            | Self::ImageDecode(_)
            | Self::InvalidParameter { .. }
            | Self::Encode(_) => (HttpResponse::UnprocessableEntity(), "processing_error"),
            Self::Transformation(_) => {
                (HttpResponse::InternalServerError(), "transformation_error")
            }
            Self::Panicked(_) | Self::Internal(_) => {
                (HttpResponse::InternalServerError(), "internal_error")
            }
        };

        status.json(serde_json::json!({
            "error": error_type,
            "message": self.to_string()
        }))
    }
}

pub type Result<T> = std::result::Result<T, AdapterError>;
