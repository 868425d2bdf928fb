//! Device memory for the buffer fixtures
//!
//! One `vkAllocateMemory` per allocation. Host-visible allocations are mapped
//! for their whole lifetime; host writes reach the device only through
//! [`Allocation::flush`], and device writes reach the host only through
//! [`Allocation::invalidate`].

use std::ptr::NonNull;

use ash::vk;
use bitflags::bitflags;

use crate::{BufferError, BufferResult, DeviceInterface};

bitflags! {
    /// Properties an allocation must have beyond what the resource requires
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MemoryRequirement: u32 {
        const HOST_VISIBLE = 1 << 0;
        const COHERENT = 1 << 1;
        const LAZILY_ALLOCATED = 1 << 2;
    }
}

impl MemoryRequirement {
    pub fn property_flags(self) -> vk::MemoryPropertyFlags {
        let mut flags = vk::MemoryPropertyFlags::empty();
        if self.contains(Self::HOST_VISIBLE) {
            flags |= vk::MemoryPropertyFlags::HOST_VISIBLE;
        }
        if self.contains(Self::COHERENT) {
            flags |= vk::MemoryPropertyFlags::HOST_COHERENT;
        }
        if self.contains(Self::LAZILY_ALLOCATED) {
            flags |= vk::MemoryPropertyFlags::LAZILY_ALLOCATED;
        }
        flags
    }
}

/// First memory type allowed by `type_bits` that has all of `required`
pub fn find_memory_type(
    properties: &vk::PhysicalDeviceMemoryProperties,
    type_bits: u32,
    required: vk::MemoryPropertyFlags,
) -> Option<u32> {
    (0..properties.memory_type_count).find(|&index| {
        type_bits & (1 << index) != 0
            && properties.memory_types[index as usize]
                .property_flags
                .contains(required)
    })
}

/// Allocates device memory for a [`DeviceInterface`]
pub struct Allocator<'d> {
    device: &'d dyn DeviceInterface,
    memory_properties: vk::PhysicalDeviceMemoryProperties,
}

impl<'d> Allocator<'d> {
    pub fn new(device: &'d dyn DeviceInterface) -> Self {
        Self {
            device,
            memory_properties: device.memory_properties(),
        }
    }

    pub fn allocate(
        &self,
        requirements: vk::MemoryRequirements,
        requirement: MemoryRequirement,
    ) -> BufferResult<Allocation<'d>> {
        let memory_type_index = find_memory_type(
            &self.memory_properties,
            requirements.memory_type_bits,
            requirement.property_flags(),
        )
        .ok_or(BufferError::NoCompatibleMemoryType {
            type_bits: requirements.memory_type_bits,
            requirement,
        })?;

        let allocate_info = vk::MemoryAllocateInfo::default()
            .allocation_size(requirements.size)
            .memory_type_index(memory_type_index);
        let memory = self.device.allocate_memory(&allocate_info)?;
        let mut allocation = Allocation {
            device: self.device,
            memory,
            offset: 0,
            size: requirements.size,
            host_ptr: None,
        };

        if requirement.contains(MemoryRequirement::HOST_VISIBLE) {
            // A failed map frees the memory through the allocation's Drop
            let ptr = self
                .device
                .map_memory(memory, 0, vk::WHOLE_SIZE)?
                .cast::<u8>();
            allocation.host_ptr = Some(NonNull::new(ptr).ok_or(BufferError::NotHostVisible)?);
        }

        log::debug!(
            "Allocated {} bytes of memory type {memory_type_index} ({requirement:?})",
            requirements.size
        );
        Ok(allocation)
    }
}

impl std::fmt::Debug for Allocator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Allocator")
            .field("memory_type_count", &self.memory_properties.memory_type_count)
            .finish()
    }
}

/// A device memory block, mapped when host visible
pub struct Allocation<'d> {
    device: &'d dyn DeviceInterface,
    memory: vk::DeviceMemory,
    offset: vk::DeviceSize,
    size: vk::DeviceSize,
    host_ptr: Option<NonNull<u8>>,
}

impl Allocation<'_> {
    pub fn memory(&self) -> vk::DeviceMemory {
        self.memory
    }

    /// Offset of this allocation within [`memory`](Self::memory)
    pub fn offset(&self) -> vk::DeviceSize {
        self.offset
    }

    pub fn size(&self) -> vk::DeviceSize {
        self.size
    }

    pub fn is_host_visible(&self) -> bool {
        self.host_ptr.is_some()
    }

    pub fn host_slice(&self) -> BufferResult<&[u8]> {
        let ptr = self.host_ptr.ok_or(BufferError::NotHostVisible)?;
        // Mapped for `size` bytes until Drop
        Ok(unsafe { std::slice::from_raw_parts(ptr.as_ptr(), self.size as usize) })
    }

    pub fn host_slice_mut(&mut self) -> BufferResult<&mut [u8]> {
        let ptr = self.host_ptr.ok_or(BufferError::NotHostVisible)?;
        Ok(unsafe { std::slice::from_raw_parts_mut(ptr.as_ptr(), self.size as usize) })
    }

    /// The mapped range from the start of this allocation to the end of its memory
    ///
    /// `WHOLE_SIZE` keeps the range valid whatever the device's
    /// `nonCoherentAtomSize` is, since every allocation owns its memory object.
    fn mapped_range(&self) -> BufferResult<vk::MappedMemoryRange<'static>> {
        if self.host_ptr.is_none() {
            return Err(BufferError::NotHostVisible);
        }
        Ok(vk::MappedMemoryRange::default()
            .memory(self.memory)
            .offset(self.offset)
            .size(vk::WHOLE_SIZE))
    }

    /// Make host writes to the mapping visible to the device
    pub fn flush(&self) -> BufferResult<()> {
        self.device.flush_mapped_memory_ranges(&[self.mapped_range()?])?;
        Ok(())
    }

    /// Make device writes visible through the mapping
    pub fn invalidate(&self) -> BufferResult<()> {
        self.device.invalidate_mapped_memory_ranges(&[self.mapped_range()?])?;
        Ok(())
    }
}

impl Drop for Allocation<'_> {
    fn drop(&mut self) {
        if self.host_ptr.is_some() {
            self.device.unmap_memory(self.memory);
        }
        log::debug!("Freeing memory {:?}", self.memory);
        self.device.free_memory(self.memory);
    }
}

impl std::fmt::Debug for Allocation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Allocation")
            .field("memory", &self.memory)
            .field("offset", &self.offset)
            .field("size", &self.size)
            .field("host_visible", &self.is_host_visible())
            .finish()
    }
}
