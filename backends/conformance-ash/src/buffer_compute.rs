//! Buffers and descriptors for buffer-backed compute cases
//!
//! A case reads two colors from a uniform buffer at an arbitrary offset and
//! writes them to a
//! [`ComputeInstanceResultBuffer`](crate::ComputeInstanceResultBuffer).
//! Everything around the colors is filled with a sentinel byte so reads from
//! the wrong offset are visible.

use ash::vk;
use conformance::Vec4;

use crate::unique::{PooledDescriptorSet, Unique};
use crate::{
    Allocation, Allocator, BufferResult, DeviceInterface, MemoryRequirement, RESULT_DATA_SIZE,
};

/// Byte written around the color data
pub const SENTINEL: u8 = 0x5A;

/// Size of the two colors a uniform view covers
pub const COLOR_DATA_SIZE: vk::DeviceSize = std::mem::size_of::<[Vec4; 2]>() as vk::DeviceSize;

/// Device and allocator used by a case
pub struct TestContext<'d> {
    device: &'d dyn DeviceInterface,
    allocator: Allocator<'d>,
}

impl<'d> TestContext<'d> {
    pub fn new(device: &'d dyn DeviceInterface) -> Self {
        Self {
            device,
            allocator: Allocator::new(device),
        }
    }

    pub fn device(&self) -> &'d dyn DeviceInterface {
        self.device
    }

    pub fn allocator(&self) -> &Allocator<'d> {
        &self.allocator
    }
}

impl std::fmt::Debug for TestContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestContext")
            .field("allocator", &self.allocator)
            .finish()
    }
}

/// A buffer bound to its own memory
///
/// The buffer is destroyed before the memory is freed.
#[derive(Debug)]
pub struct BoundBuffer<'d> {
    buffer: Unique<'d, vk::Buffer>,
    allocation: Allocation<'d>,
    size: vk::DeviceSize,
}

impl<'d> BoundBuffer<'d> {
    /// Create a `size`-byte buffer for `usage` and bind fresh memory to it
    pub fn new(
        ctx: &TestContext<'d>,
        size: vk::DeviceSize,
        usage: vk::BufferUsageFlags,
        requirement: MemoryRequirement,
    ) -> BufferResult<Self> {
        let device = ctx.device();
        let create_info = vk::BufferCreateInfo::default()
            .size(size)
            .usage(usage)
            .sharing_mode(vk::SharingMode::EXCLUSIVE);
        let buffer = Unique::new(device, device.create_buffer(&create_info)?);

        let requirements = device.get_buffer_memory_requirements(buffer.get());
        let allocation = ctx.allocator().allocate(requirements, requirement)?;
        device.bind_buffer_memory(buffer.get(), allocation.memory(), allocation.offset())?;

        Ok(Self {
            buffer,
            allocation,
            size,
        })
    }

    pub fn buffer(&self) -> vk::Buffer {
        self.buffer.get()
    }

    pub fn allocation(&self) -> &Allocation<'d> {
        &self.allocation
    }

    pub fn allocation_mut(&mut self) -> &mut Allocation<'d> {
        &mut self.allocation
    }

    /// Size requested for the buffer, which may be less than the allocation
    pub fn size(&self) -> vk::DeviceSize {
        self.size
    }
}

/// Create a host-visible uniform buffer holding `color1` and `color2` at `offset`
///
/// Bytes outside the colors are set to [`SENTINEL`], and the whole buffer is
/// flushed before returning.
///
/// # Panics
///
/// Panics if the two colors do not fit between `offset` and `buffer_size`.
pub fn create_color_data_buffer<'d>(
    ctx: &TestContext<'d>,
    offset: u32,
    buffer_size: u32,
    color1: Vec4,
    color2: Vec4,
) -> BufferResult<BoundBuffer<'d>> {
    assert!(
        u64::from(offset) + COLOR_DATA_SIZE <= u64::from(buffer_size),
        "color data at offset {offset} does not fit in a {buffer_size} byte buffer"
    );

    let mut buffer = BoundBuffer::new(
        ctx,
        vk::DeviceSize::from(buffer_size),
        vk::BufferUsageFlags::UNIFORM_BUFFER,
        MemoryRequirement::HOST_VISIBLE,
    )?;

    let host = &mut buffer.allocation_mut().host_slice_mut()?[..buffer_size as usize];
    let (head, rest) = host.split_at_mut(offset as usize);
    let (colors, tail) = rest.split_at_mut(COLOR_DATA_SIZE as usize);
    head.fill(SENTINEL);
    colors.copy_from_slice(bytemuck::bytes_of(&[color1, color2]));
    tail.fill(SENTINEL);

    buffer.allocation().flush()?;
    log::debug!(
        "Created color data buffer {:?} ({buffer_size} bytes, colors at {offset})",
        buffer.buffer()
    );
    Ok(buffer)
}

/// Layout with the result storage buffer at binding 0 and a color view at binding 1
pub fn create_descriptor_set_layout<'d>(
    ctx: &TestContext<'d>,
) -> BufferResult<Unique<'d, vk::DescriptorSetLayout>> {
    let bindings = [
        vk::DescriptorSetLayoutBinding::default()
            .binding(0)
            .descriptor_type(vk::DescriptorType::STORAGE_BUFFER)
            .descriptor_count(1)
            .stage_flags(vk::ShaderStageFlags::COMPUTE),
        vk::DescriptorSetLayoutBinding::default()
            .binding(1)
            .descriptor_type(vk::DescriptorType::UNIFORM_BUFFER)
            .descriptor_count(1)
            .stage_flags(vk::ShaderStageFlags::COMPUTE),
    ];
    let create_info = vk::DescriptorSetLayoutCreateInfo::default().bindings(&bindings);
    let device = ctx.device();
    Ok(Unique::new(device, device.create_descriptor_set_layout(&create_info)?))
}

/// Pool for exactly one set of [`create_descriptor_set_layout`]'s layout
pub fn create_descriptor_pool<'d>(
    ctx: &TestContext<'d>,
) -> BufferResult<Unique<'d, vk::DescriptorPool>> {
    let sizes = [
        vk::DescriptorPoolSize {
            ty: vk::DescriptorType::STORAGE_BUFFER,
            descriptor_count: 1,
        },
        vk::DescriptorPoolSize {
            ty: vk::DescriptorType::UNIFORM_BUFFER,
            descriptor_count: 1,
        },
    ];
    let create_info = vk::DescriptorPoolCreateInfo::default()
        .pool_sizes(&sizes)
        .max_sets(1)
        .flags(vk::DescriptorPoolCreateFlags::FREE_DESCRIPTOR_SET);
    let device = ctx.device();
    Ok(Unique::new(device, device.create_descriptor_pool(&create_info)?))
}

/// Allocate a set and point it at the result buffer and the color view at `offset`
pub fn create_descriptor_set<'d>(
    ctx: &TestContext<'d>,
    pool: vk::DescriptorPool,
    layout: vk::DescriptorSetLayout,
    view: vk::Buffer,
    offset: u32,
    result: vk::Buffer,
) -> BufferResult<Unique<'d, PooledDescriptorSet>> {
    let device = ctx.device();
    let set = {
        let set_layouts = [layout];
        let allocate_info = vk::DescriptorSetAllocateInfo::default()
            .descriptor_pool(pool)
            .set_layouts(&set_layouts);
        device.allocate_descriptor_sets(&allocate_info)?[0]
    };
    let set = Unique::new(device, PooledDescriptorSet { pool, set });

    let result_info = [vk::DescriptorBufferInfo {
        buffer: result,
        offset: 0,
        range: RESULT_DATA_SIZE,
    }];
    let color_info = [vk::DescriptorBufferInfo {
        buffer: view,
        offset: vk::DeviceSize::from(offset),
        range: COLOR_DATA_SIZE,
    }];
    let writes = [
        vk::WriteDescriptorSet::default()
            .dst_set(set.get().set)
            .dst_binding(0)
            .descriptor_type(vk::DescriptorType::STORAGE_BUFFER)
            .buffer_info(&result_info),
        vk::WriteDescriptorSet::default()
            .dst_set(set.get().set)
            .dst_binding(1)
            .descriptor_type(vk::DescriptorType::UNIFORM_BUFFER)
            .buffer_info(&color_info),
    ];
    device.update_descriptor_sets(&writes, &[]);

    Ok(set)
}
