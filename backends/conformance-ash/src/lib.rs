//! Vulkan buffer fixtures for the graphics conformance suite.
//!
//! Host-written uniform buffers, a result storage buffer and the descriptor
//! set tying them together for a compute shader. All device access goes
//! through [`DeviceInterface`], implemented for `ash::Device` by
//! [`VulkanDevice`], so the fixtures can also run against a software device.

mod allocator;
mod buffer_compute;
mod device;
mod error;
mod result_buffer;
mod unique;

pub use allocator::*;
pub use buffer_compute::*;
pub use device::*;
pub use error::*;
pub use result_buffer::*;
pub use unique::*;

// Re-export ash so callers use the same version.
pub use ash;
