//! Error types for vcardqr.
//!
//! Request-level failures ([`ValidationError`], [`EncodingError`]) are recoverable and end up in
//! the `{success: false, error}` response body. [`Error`] collects them together with the
//! codec, configuration and I/O failures of the surrounding service.

use thiserror::Error;

use crate::vcard::RequiredField;

/// Convenience type alias for results in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// A required contact field was missing, empty or whitespace-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in {}", .0.label())]
    MissingField(RequiredField),
}

impl ValidationError {
    /// Returns the field that failed validation.
    pub fn field(&self) -> RequiredField {
        match self {
            Self::MissingField(field) => *field,
        }
    }
}

/// The payload does not fit in any supported QR version.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("data length = {bytes} bytes, max capacity = {capacity} bytes")]
    DataTooLong { bytes: usize, capacity: usize },
}

/// Crate-level error type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
