//! Error types for the conformance fixtures
//!
//! The fixtures distinguish three kinds of failure:
//!
//! - an unsupported configuration ([`ConformanceError::NotSupported`]), which is
//!   reported as "not supported" rather than as a failure,
//! - an API-level failure or an image mismatch, which fails the current test
//!   case only,
//! - an internal consistency failure, which is a panic and never an error value.

use thiserror::Error;

#[cfg(feature = "tracing")]
use tracing::{debug, error, warn};

/// Result type for conformance operations
pub type ConformanceResult<T> = Result<T, ConformanceError>;

/// Errors that can end a single test case
#[derive(Error, Debug)]
pub enum ConformanceError {
    /// A required extension or capability is missing
    #[error("Not supported: {reason}")]
    NotSupported { reason: String },

    /// A graphics API call reported an error
    #[error("{call} failed: {detail}")]
    Api { call: String, detail: String },

    /// The observed image does not match the reference
    #[error("Image mismatch for {subject}: {details}")]
    Mismatch { subject: String, details: String },

    /// Failed to write a debug image
    #[error("Image encoding failed")]
    Image(#[from] image::ImageError),

    /// IO error while writing debug output
    #[error("IO operation failed")]
    Io(#[from] std::io::Error),

    /// Error raised by an API backend that has no closer mapping
    #[error("Backend error")]
    Backend(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ConformanceError {
    /// Create a not-supported error
    pub fn not_supported(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        #[cfg(feature = "tracing")]
        debug!("Not supported: {}", reason);
        Self::NotSupported { reason }
    }

    /// Create an API failure error
    pub fn api(call: impl Into<String>, detail: impl Into<String>) -> Self {
        let call = call.into();
        let detail = detail.into();
        #[cfg(feature = "tracing")]
        error!("{} failed: {}", call, detail);
        Self::Api { call, detail }
    }

    /// Create an image mismatch error
    pub fn mismatch(subject: impl Into<String>, details: impl Into<String>) -> Self {
        let subject = subject.into();
        let details = details.into();
        #[cfg(feature = "tracing")]
        warn!("Image mismatch for {}: {}", subject, details);
        Self::Mismatch { subject, details }
    }

    /// Whether this error means the case should be skipped rather than failed
    pub fn is_not_supported(&self) -> bool {
        matches!(self, Self::NotSupported { .. })
    }
}

/// Trait for converting backend errors into [`ConformanceError`]
pub trait IntoConformanceError {
    fn into_conformance_error(self) -> ConformanceError;
}

impl<E> IntoConformanceError for E
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn into_conformance_error(self) -> ConformanceError {
        ConformanceError::Backend(Box::new(self))
    }
}
