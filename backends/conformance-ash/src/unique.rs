//! Owned Vulkan handles

use ash::vk;

use crate::DeviceInterface;

/// A handle that knows how to destroy itself.
pub trait DeviceObject: Copy + std::fmt::Debug {
    fn destroy(self, device: &dyn DeviceInterface);
}

impl DeviceObject for vk::Buffer {
    fn destroy(self, device: &dyn DeviceInterface) {
        device.destroy_buffer(self);
    }
}

impl DeviceObject for vk::DescriptorSetLayout {
    fn destroy(self, device: &dyn DeviceInterface) {
        device.destroy_descriptor_set_layout(self);
    }
}

impl DeviceObject for vk::DescriptorPool {
    fn destroy(self, device: &dyn DeviceInterface) {
        device.destroy_descriptor_pool(self);
    }
}

/// A descriptor set together with the pool it was allocated from
///
/// The pool must have been created with `FREE_DESCRIPTOR_SET`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PooledDescriptorSet {
    pub pool: vk::DescriptorPool,
    pub set: vk::DescriptorSet,
}

impl DeviceObject for PooledDescriptorSet {
    fn destroy(self, device: &dyn DeviceInterface) {
        if let Err(err) = device.free_descriptor_sets(self.pool, &[self.set]) {
            log::warn!("vkFreeDescriptorSets failed for {:?}: {err}", self.set);
        }
    }
}

/// Destroys the wrapped handle on drop
pub struct Unique<'d, T: DeviceObject> {
    device: &'d dyn DeviceInterface,
    handle: T,
}

impl<'d, T: DeviceObject> Unique<'d, T> {
    pub fn new(device: &'d dyn DeviceInterface, handle: T) -> Self {
        Self { device, handle }
    }

    pub fn get(&self) -> T {
        self.handle
    }
}

impl<T: DeviceObject> Drop for Unique<'_, T> {
    fn drop(&mut self) {
        log::debug!("Destroying {:?}", self.handle);
        self.handle.destroy(self.device);
    }
}

impl<T: DeviceObject> std::fmt::Debug for Unique<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Unique").field(&self.handle).finish()
    }
}
