use ash::vk;
use conformance::Vec4;

use crate::{BoundBuffer, BufferResult, MemoryRequirement, TestContext};

/// Number of `Vec4` results a compute case writes
pub const RESULT_COUNT: usize = 4;

/// Size of the result storage buffer in bytes
pub const RESULT_DATA_SIZE: vk::DeviceSize =
    (RESULT_COUNT * std::mem::size_of::<Vec4>()) as vk::DeviceSize;

/// Value every result starts out as, so unwritten slots stand out
pub const RESULT_CLEAR_VALUE: Vec4 = Vec4::splat(-1.0);

/// Host-visible storage buffer that a compute case writes its results to
#[derive(Debug)]
pub struct ComputeInstanceResultBuffer<'d> {
    buffer: BoundBuffer<'d>,
}

impl<'d> ComputeInstanceResultBuffer<'d> {
    pub fn new(ctx: &TestContext<'d>) -> BufferResult<Self> {
        let mut buffer = BoundBuffer::new(
            ctx,
            RESULT_DATA_SIZE,
            vk::BufferUsageFlags::STORAGE_BUFFER,
            MemoryRequirement::HOST_VISIBLE,
        )?;

        let host = &mut buffer.allocation_mut().host_slice_mut()?[..RESULT_DATA_SIZE as usize];
        host.copy_from_slice(bytemuck::bytes_of(&[RESULT_CLEAR_VALUE; RESULT_COUNT]));
        buffer.allocation().flush()?;

        Ok(Self { buffer })
    }

    pub fn buffer(&self) -> vk::Buffer {
        self.buffer.buffer()
    }

    /// Invalidate the mapping and read the results
    pub fn read_back(&self) -> BufferResult<[Vec4; RESULT_COUNT]> {
        let allocation = self.buffer.allocation();
        allocation.invalidate()?;
        let bytes = &allocation.host_slice()?[..RESULT_DATA_SIZE as usize];
        Ok(bytemuck::pod_read_unaligned(bytes))
    }
}
