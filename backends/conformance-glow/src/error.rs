//! Error types for the GL/EGL fixtures

use conformance::ConformanceError;
use thiserror::Error;

use crate::egl::{self, EGLint};
use crate::functions::error_name;

/// Errors raised while creating or importing GL client buffers
#[derive(Error, Debug)]
pub enum GlError {
    /// A GL call left an error code behind
    #[error("{call} failed with {}", error_name(*.code))]
    Call { call: &'static str, code: u32 },

    /// Object creation returned no name
    #[error("Failed to create {0}")]
    CreateObject(String),

    /// `eglCreateImageKHR` reported an error or returned no image
    #[error("eglCreateImageKHR returned no image ({})", egl::error_name(*.code))]
    ImageImport { code: EGLint },

    /// Surface creation through the platform layer failed
    #[error("{call} failed with {}", egl::error_name(*.code))]
    Surface { call: &'static str, code: EGLint },

    /// Missing extension or unsupported operation
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// No texture format for a GL format/type or internal format
    #[error("Unknown format {format:#06x}, type {ty:#06x}")]
    UnknownFormat { format: u32, ty: u32 },

    /// A framebuffer used for clears or readback is not complete
    #[error("Framebuffer incomplete: status {status:#06x}")]
    IncompleteFramebuffer { status: u32 },
}

/// Result type for GL fixture operations
pub type GlResult<T> = Result<T, GlError>;

impl From<GlError> for ConformanceError {
    fn from(err: GlError) -> Self {
        match err {
            GlError::Unsupported(reason) => ConformanceError::not_supported(reason),
            GlError::IncompleteFramebuffer { status } => ConformanceError::not_supported(format!(
                "framebuffer incomplete (status {status:#06x})"
            )),
            GlError::Call { call, .. } | GlError::Surface { call, .. } => {
                ConformanceError::api(call, err.to_string())
            }
            GlError::ImageImport { .. } => {
                ConformanceError::api("eglCreateImageKHR", err.to_string())
            }
            GlError::CreateObject(_) | GlError::UnknownFormat { .. } => {
                ConformanceError::api("gl", err.to_string())
            }
        }
    }
}
