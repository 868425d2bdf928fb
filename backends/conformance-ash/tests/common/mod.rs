//! Software Vulkan device for the integration tests
//!
//! Every memory object has a device copy and a host mapping. Flushes copy
//! host to device and invalidations copy device to host, so a missing flush
//! shows up as stale device data.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::ffi::c_void;

use conformance_ash::DeviceInterface;
use conformance_ash::ash::prelude::VkResult;
use conformance_ash::ash::vk::{self, Handle};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Debug)]
struct Memory {
    type_index: u32,
    device: Vec<u8>,
    host: Vec<u8>,
    mapped: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferRecord {
    pub size: vk::DeviceSize,
    pub usage: vk::BufferUsageFlags,
    pub bound: Option<(vk::DeviceMemory, vk::DeviceSize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutBinding {
    pub binding: u32,
    pub ty: vk::DescriptorType,
    pub count: u32,
    pub stages: vk::ShaderStageFlags,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolRecord {
    pub sizes: Vec<(vk::DescriptorType, u32)>,
    pub max_sets: u32,
    pub flags: vk::DescriptorPoolCreateFlags,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRecord {
    pub set: vk::DescriptorSet,
    pub binding: u32,
    pub ty: vk::DescriptorType,
    pub buffers: Vec<(vk::Buffer, vk::DeviceSize, vk::DeviceSize)>,
}

#[derive(Debug, Default)]
struct State {
    buffers: HashMap<u64, BufferRecord>,
    memories: HashMap<u64, Memory>,
    layouts: HashMap<u64, Vec<LayoutBinding>>,
    pools: HashMap<u64, PoolRecord>,
    sets: HashMap<u64, vk::DescriptorPool>,
    set_layouts: HashMap<u64, vk::DescriptorSetLayout>,
    writes: Vec<WriteRecord>,
    update_calls: usize,
    flushes: Vec<(vk::DeviceMemory, vk::DeviceSize, vk::DeviceSize)>,
}

/// Software device with three memory types: device local, host visible,
/// and host visible + coherent
#[derive(Debug)]
pub struct FakeDevice {
    state: RefCell<State>,
    next_handle: Cell<u64>,
    properties: vk::PhysicalDeviceMemoryProperties,
    /// Memory requirement sizes are rounded up to this
    pub alignment: vk::DeviceSize,
    /// Types allowed for buffers
    pub buffer_type_bits: Cell<u32>,
    /// `nonCoherentAtomSize`, which mapped ranges must respect
    pub non_coherent_atom_size: vk::DeviceSize,
}

impl FakeDevice {
    pub fn new() -> Self {
        let mut properties = vk::PhysicalDeviceMemoryProperties {
            memory_type_count: 3,
            memory_heap_count: 1,
            ..Default::default()
        };
        properties.memory_types[0].property_flags = vk::MemoryPropertyFlags::DEVICE_LOCAL;
        properties.memory_types[1].property_flags = vk::MemoryPropertyFlags::HOST_VISIBLE;
        properties.memory_types[2].property_flags =
            vk::MemoryPropertyFlags::HOST_VISIBLE | vk::MemoryPropertyFlags::HOST_COHERENT;
        Self {
            state: RefCell::default(),
            next_handle: Cell::new(0x100),
            properties,
            alignment: 256,
            buffer_type_bits: Cell::new(0b111),
            non_coherent_atom_size: 64,
        }
    }

    fn handle(&self) -> u64 {
        let handle = self.next_handle.get();
        self.next_handle.set(handle + 1);
        handle
    }

    pub fn live_buffers(&self) -> usize {
        self.state.borrow().buffers.len()
    }

    pub fn live_memories(&self) -> usize {
        self.state.borrow().memories.len()
    }

    pub fn live_layouts(&self) -> usize {
        self.state.borrow().layouts.len()
    }

    pub fn live_pools(&self) -> usize {
        self.state.borrow().pools.len()
    }

    pub fn live_sets(&self) -> usize {
        self.state.borrow().sets.len()
    }

    pub fn buffer(&self, buffer: vk::Buffer) -> Option<BufferRecord> {
        self.state.borrow().buffers.get(&buffer.as_raw()).cloned()
    }

    /// Contents of `memory` as the device sees them
    pub fn device_bytes(&self, memory: vk::DeviceMemory) -> Vec<u8> {
        self.state.borrow().memories[&memory.as_raw()].device.clone()
    }

    /// Contents of a buffer as the device sees them
    pub fn buffer_device_bytes(&self, buffer: vk::Buffer) -> Vec<u8> {
        let state = self.state.borrow();
        let record = &state.buffers[&buffer.as_raw()];
        let (memory, offset) = record.bound.expect("buffer has no memory");
        let start = offset as usize;
        state.memories[&memory.as_raw()].device[start..start + record.size as usize].to_vec()
    }

    /// Write into a buffer from the device side, as a shader would
    pub fn device_write(&self, buffer: vk::Buffer, offset: usize, data: &[u8]) {
        let mut state = self.state.borrow_mut();
        let (memory, base) = state.buffers[&buffer.as_raw()].bound.expect("buffer has no memory");
        let start = base as usize + offset;
        state.memories.get_mut(&memory.as_raw()).expect("memory").device[start..start + data.len()]
            .copy_from_slice(data);
    }

    pub fn memory_type(&self, memory: vk::DeviceMemory) -> u32 {
        self.state.borrow().memories[&memory.as_raw()].type_index
    }

    pub fn flushes(&self) -> Vec<(vk::DeviceMemory, vk::DeviceSize, vk::DeviceSize)> {
        self.state.borrow().flushes.clone()
    }

    pub fn layout(&self, layout: vk::DescriptorSetLayout) -> Vec<LayoutBinding> {
        self.state.borrow().layouts[&layout.as_raw()].clone()
    }

    pub fn pool(&self, pool: vk::DescriptorPool) -> PoolRecord {
        self.state.borrow().pools[&pool.as_raw()].clone()
    }

    pub fn writes(&self) -> Vec<WriteRecord> {
        self.state.borrow().writes.clone()
    }

    pub fn update_calls(&self) -> usize {
        self.state.borrow().update_calls
    }

    /// Byte range of a flush or invalidation, validated like the
    /// `VkMappedMemoryRange` rules
    fn mapped_bounds(
        &self,
        memory: &Memory,
        range: &vk::MappedMemoryRange<'_>,
    ) -> VkResult<(usize, usize)> {
        let atom = self.non_coherent_atom_size;
        let len = memory.host.len() as vk::DeviceSize;
        let end = if range.size == vk::WHOLE_SIZE {
            len
        } else {
            range.offset + range.size
        };
        let size_ok = range.size == vk::WHOLE_SIZE || range.size % atom == 0 || end == len;
        if !memory.mapped || range.offset % atom != 0 || !size_ok || end > len {
            return Err(vk::Result::ERROR_VALIDATION_FAILED_EXT);
        }
        Ok((range.offset as usize, end as usize))
    }
}

impl DeviceInterface for FakeDevice {
    fn memory_properties(&self) -> vk::PhysicalDeviceMemoryProperties {
        self.properties
    }

    fn create_buffer(&self, create_info: &vk::BufferCreateInfo<'_>) -> VkResult<vk::Buffer> {
        if create_info.size == 0 {
            return Err(vk::Result::ERROR_VALIDATION_FAILED_EXT);
        }
        let handle = self.handle();
        self.state.borrow_mut().buffers.insert(
            handle,
            BufferRecord {
                size: create_info.size,
                usage: create_info.usage,
                bound: None,
            },
        );
        Ok(vk::Buffer::from_raw(handle))
    }

    fn destroy_buffer(&self, buffer: vk::Buffer) {
        self.state.borrow_mut().buffers.remove(&buffer.as_raw());
    }

    fn get_buffer_memory_requirements(&self, buffer: vk::Buffer) -> vk::MemoryRequirements {
        let size = self.state.borrow().buffers[&buffer.as_raw()].size;
        vk::MemoryRequirements {
            size: size.div_ceil(self.alignment) * self.alignment,
            alignment: self.alignment,
            memory_type_bits: self.buffer_type_bits.get(),
        }
    }

    fn bind_buffer_memory(
        &self,
        buffer: vk::Buffer,
        memory: vk::DeviceMemory,
        offset: vk::DeviceSize,
    ) -> VkResult<()> {
        let mut state = self.state.borrow_mut();
        if !state.memories.contains_key(&memory.as_raw()) {
            return Err(vk::Result::ERROR_VALIDATION_FAILED_EXT);
        }
        let record = state
            .buffers
            .get_mut(&buffer.as_raw())
            .ok_or(vk::Result::ERROR_VALIDATION_FAILED_EXT)?;
        if record.bound.is_some() {
            return Err(vk::Result::ERROR_VALIDATION_FAILED_EXT);
        }
        record.bound = Some((memory, offset));
        Ok(())
    }

    fn allocate_memory(
        &self,
        allocate_info: &vk::MemoryAllocateInfo<'_>,
    ) -> VkResult<vk::DeviceMemory> {
        if allocate_info.memory_type_index >= self.properties.memory_type_count {
            return Err(vk::Result::ERROR_VALIDATION_FAILED_EXT);
        }
        let size = allocate_info.allocation_size as usize;
        let handle = self.handle();
        self.state.borrow_mut().memories.insert(
            handle,
            Memory {
                type_index: allocate_info.memory_type_index,
                // Uninitialized device memory
                device: vec![0xCD; size],
                host: vec![0xCD; size],
                mapped: false,
            },
        );
        Ok(vk::DeviceMemory::from_raw(handle))
    }

    fn free_memory(&self, memory: vk::DeviceMemory) {
        let removed = self.state.borrow_mut().memories.remove(&memory.as_raw());
        assert!(
            removed.is_some_and(|m| !m.mapped),
            "memory {memory:?} freed while mapped or twice"
        );
    }

    fn map_memory(
        &self,
        memory: vk::DeviceMemory,
        offset: vk::DeviceSize,
        size: vk::DeviceSize,
    ) -> VkResult<*mut c_void> {
        let mut state = self.state.borrow_mut();
        let flags = {
            let entry = state
                .memories
                .get(&memory.as_raw())
                .ok_or(vk::Result::ERROR_MEMORY_MAP_FAILED)?;
            self.properties.memory_types[entry.type_index as usize].property_flags
        };
        if !flags.contains(vk::MemoryPropertyFlags::HOST_VISIBLE) {
            return Err(vk::Result::ERROR_MEMORY_MAP_FAILED);
        }
        let entry = state
            .memories
            .get_mut(&memory.as_raw())
            .ok_or(vk::Result::ERROR_MEMORY_MAP_FAILED)?;
        if entry.mapped || (size != vk::WHOLE_SIZE && offset + size > entry.host.len() as u64) {
            return Err(vk::Result::ERROR_MEMORY_MAP_FAILED);
        }
        entry.mapped = true;
        entry.host.copy_from_slice(&entry.device);
        Ok(entry.host[offset as usize..].as_mut_ptr().cast())
    }

    fn unmap_memory(&self, memory: vk::DeviceMemory) {
        if let Some(entry) = self.state.borrow_mut().memories.get_mut(&memory.as_raw()) {
            entry.mapped = false;
        }
    }

    fn flush_mapped_memory_ranges(&self, ranges: &[vk::MappedMemoryRange<'_>]) -> VkResult<()> {
        let mut state = self.state.borrow_mut();
        for range in ranges {
            let entry = state
                .memories
                .get_mut(&range.memory.as_raw())
                .ok_or(vk::Result::ERROR_VALIDATION_FAILED_EXT)?;
            let (start, end) = self.mapped_bounds(entry, range)?;
            let host = entry.host[start..end].to_vec();
            entry.device[start..end].copy_from_slice(&host);
            state.flushes.push((range.memory, range.offset, range.size));
        }
        Ok(())
    }

    fn invalidate_mapped_memory_ranges(
        &self,
        ranges: &[vk::MappedMemoryRange<'_>],
    ) -> VkResult<()> {
        let mut state = self.state.borrow_mut();
        for range in ranges {
            let entry = state
                .memories
                .get_mut(&range.memory.as_raw())
                .ok_or(vk::Result::ERROR_VALIDATION_FAILED_EXT)?;
            let (start, end) = self.mapped_bounds(entry, range)?;
            let device = entry.device[start..end].to_vec();
            entry.host[start..end].copy_from_slice(&device);
        }
        Ok(())
    }

    fn create_descriptor_set_layout(
        &self,
        create_info: &vk::DescriptorSetLayoutCreateInfo<'_>,
    ) -> VkResult<vk::DescriptorSetLayout> {
        let bindings = unsafe {
            std::slice::from_raw_parts(create_info.p_bindings, create_info.binding_count as usize)
        }
        .iter()
        .map(|b| LayoutBinding {
            binding: b.binding,
            ty: b.descriptor_type,
            count: b.descriptor_count,
            stages: b.stage_flags,
        })
        .collect();
        let handle = self.handle();
        self.state.borrow_mut().layouts.insert(handle, bindings);
        Ok(vk::DescriptorSetLayout::from_raw(handle))
    }

    fn destroy_descriptor_set_layout(&self, layout: vk::DescriptorSetLayout) {
        self.state.borrow_mut().layouts.remove(&layout.as_raw());
    }

    fn create_descriptor_pool(
        &self,
        create_info: &vk::DescriptorPoolCreateInfo<'_>,
    ) -> VkResult<vk::DescriptorPool> {
        let sizes = unsafe {
            std::slice::from_raw_parts(
                create_info.p_pool_sizes,
                create_info.pool_size_count as usize,
            )
        }
        .iter()
        .map(|s| (s.ty, s.descriptor_count))
        .collect();
        let handle = self.handle();
        self.state.borrow_mut().pools.insert(
            handle,
            PoolRecord {
                sizes,
                max_sets: create_info.max_sets,
                flags: create_info.flags,
            },
        );
        Ok(vk::DescriptorPool::from_raw(handle))
    }

    fn destroy_descriptor_pool(&self, pool: vk::DescriptorPool) {
        let mut state = self.state.borrow_mut();
        state.pools.remove(&pool.as_raw());
        // Destroying a pool frees its sets
        state.sets.retain(|_, owner| *owner != pool);
    }

    fn allocate_descriptor_sets(
        &self,
        allocate_info: &vk::DescriptorSetAllocateInfo<'_>,
    ) -> VkResult<Vec<vk::DescriptorSet>> {
        let pool = allocate_info.descriptor_pool;
        let count = allocate_info.descriptor_set_count as usize;
        let max_sets = match self.state.borrow().pools.get(&pool.as_raw()) {
            Some(record) => record.max_sets as usize,
            None => return Err(vk::Result::ERROR_VALIDATION_FAILED_EXT),
        };
        let in_use = self.state.borrow().sets.values().filter(|p| **p == pool).count();
        if in_use + count > max_sets {
            return Err(vk::Result::ERROR_OUT_OF_POOL_MEMORY);
        }
        let layouts = unsafe { std::slice::from_raw_parts(allocate_info.p_set_layouts, count) };
        let sets: Vec<_> = (0..count)
            .map(|_| vk::DescriptorSet::from_raw(self.handle()))
            .collect();
        let mut state = self.state.borrow_mut();
        for (set, layout) in sets.iter().zip(layouts) {
            state.sets.insert(set.as_raw(), pool);
            state.set_layouts.insert(set.as_raw(), *layout);
        }
        Ok(sets)
    }

    fn free_descriptor_sets(
        &self,
        pool: vk::DescriptorPool,
        sets: &[vk::DescriptorSet],
    ) -> VkResult<()> {
        let mut state = self.state.borrow_mut();
        let freeable = state
            .pools
            .get(&pool.as_raw())
            .is_some_and(|p| p.flags.contains(vk::DescriptorPoolCreateFlags::FREE_DESCRIPTOR_SET));
        if !freeable {
            return Err(vk::Result::ERROR_VALIDATION_FAILED_EXT);
        }
        for set in sets {
            state.sets.remove(&set.as_raw());
        }
        Ok(())
    }

    fn update_descriptor_sets(
        &self,
        writes: &[vk::WriteDescriptorSet<'_>],
        copies: &[vk::CopyDescriptorSet<'_>],
    ) {
        assert!(copies.is_empty(), "descriptor copies are not modeled");
        let mut state = self.state.borrow_mut();
        state.update_calls += 1;
        for write in writes {
            // Writes past a binding's descriptor count are not modeled
            let layout = state.set_layouts[&write.dst_set.as_raw()];
            let capacity = state.layouts[&layout.as_raw()]
                .iter()
                .find(|b| b.binding == write.dst_binding)
                .map_or(0, |b| b.count);
            assert!(
                write.dst_array_element + write.descriptor_count <= capacity,
                "write of {} descriptors at binding {} exceeds its count of {capacity}",
                write.descriptor_count,
                write.dst_binding
            );
            let infos = unsafe {
                std::slice::from_raw_parts(write.p_buffer_info, write.descriptor_count as usize)
            };
            state.writes.push(WriteRecord {
                set: write.dst_set,
                binding: write.dst_binding,
                ty: write.descriptor_type,
                buffers: infos.iter().map(|i| (i.buffer, i.offset, i.range)).collect(),
            });
        }
    }
}
