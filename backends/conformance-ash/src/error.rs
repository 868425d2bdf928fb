//! Error types for the Vulkan buffer fixtures.

use ash::vk;
use conformance::ConformanceError;
use thiserror::Error;

use crate::MemoryRequirement;

/// Result type for buffer fixture operations.
pub type BufferResult<T> = Result<T, BufferError>;

/// Errors that can occur while creating buffers, memory or descriptors.
#[derive(Debug, Error)]
pub enum BufferError {
    /// Vulkan API error.
    #[error("Vulkan error: {0}")]
    Vulkan(#[from] vk::Result),

    /// No memory type satisfies both the resource and the requirement.
    #[error("No memory type in {type_bits:#x} satisfies {requirement:?}")]
    NoCompatibleMemoryType {
        type_bits: u32,
        requirement: MemoryRequirement,
    },

    /// Host access was requested on memory that is not mapped.
    #[error("Allocation is not host visible")]
    NotHostVisible,
}

impl From<BufferError> for ConformanceError {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::NoCompatibleMemoryType { .. } => {
                ConformanceError::not_supported(err.to_string())
            }
            BufferError::Vulkan(_) | BufferError::NotHostVisible => {
                ConformanceError::api("vulkan", err.to_string())
            }
        }
    }
}
