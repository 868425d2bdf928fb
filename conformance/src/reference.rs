//! CPU-side reference images
//!
//! A [`ReferenceImage`] mirrors what a GPU object should contain once it has
//! been initialized. Producers write it once; afterwards it is only read for
//! comparison.

use std::path::Path;

use crate::{ConformanceResult, TextureFormat, Vec4};

/// A tightly packed 2D image in a [`TextureFormat`]
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceImage {
    format: TextureFormat,
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Default for ReferenceImage {
    fn default() -> Self {
        Self::new(TextureFormat::RGBA8, 0, 0)
    }
}

impl ReferenceImage {
    /// Allocate a zero-filled image
    pub fn new(format: TextureFormat, width: u32, height: u32) -> Self {
        let len = format.pixel_size() * width as usize * height as usize;
        Self {
            format,
            width,
            height,
            data: vec![0; len],
        }
    }

    /// Wrap existing pixel data; returns `None` when the length does not match
    pub fn from_data(
        format: TextureFormat,
        width: u32,
        height: u32,
        data: Vec<u8>,
    ) -> Option<Self> {
        (data.len() == format.pixel_size() * width as usize * height as usize).then_some(Self {
            format,
            width,
            height,
            data,
        })
    }

    pub fn format(&self) -> TextureFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn row_pitch(&self) -> usize {
        self.format.pixel_size() * self.width as usize
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    fn pixel_range(&self, x: u32, y: u32) -> std::ops::Range<usize> {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} image",
            self.width,
            self.height
        );
        let size = self.format.pixel_size();
        let start = y as usize * self.row_pitch() + x as usize * size;
        start..start + size
    }

    pub fn pixel(&self, x: u32, y: u32) -> Vec4 {
        self.format.decode(&self.data[self.pixel_range(x, y)])
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, value: Vec4) {
        let range = self.pixel_range(x, y);
        self.format.encode(&mut self.data[range], value);
    }

    /// Depth value at (x, y); only meaningful for depth formats
    pub fn depth(&self, x: u32, y: u32) -> f32 {
        debug_assert!(self.format.is_depth());
        self.pixel(x, y).x
    }

    /// Stencil value at (x, y); only meaningful for stencil formats
    pub fn stencil(&self, x: u32, y: u32) -> u32 {
        debug_assert!(self.format.is_stencil());
        self.pixel(x, y).x as u32
    }

    /// Fill with a gradient that runs between `min` and `max` across the four corners
    ///
    /// With `s` and `t` the normalized pixel center coordinates, red follows
    /// `(s + t) / 2`, green `(s + 1 - t) / 2`, blue `(1 - s + t) / 2` and alpha
    /// `(2 - s - t) / 2`, so every corner carries a distinct color.
    pub fn fill_with_component_gradients(&mut self, min: Vec4, max: Vec4) {
        let (width, height) = (self.width as f32, self.height as f32);
        for y in 0..self.height {
            for x in 0..self.width {
                let s = (x as f32 + 0.5) / width;
                let t = (y as f32 + 0.5) / height;
                let weights = Vec4::new(
                    (s + t) * 0.5,
                    (s + (1.0 - t)) * 0.5,
                    ((1.0 - s) + t) * 0.5,
                    ((1.0 - s) + (1.0 - t)) * 0.5,
                );
                self.set_pixel(x, y, Vec4::lerp(min, max, weights));
            }
        }
    }

    fn fill_encoded(&mut self, value: Vec4) {
        let size = self.format.pixel_size();
        if size == 0 || self.data.is_empty() {
            return;
        }
        let mut pixel = vec![0u8; size];
        self.format.encode(&mut pixel, value);
        for chunk in self.data.chunks_exact_mut(size) {
            chunk.copy_from_slice(&pixel);
        }
    }

    /// Clear every pixel to `color`, quantized by the image format
    pub fn clear(&mut self, color: Vec4) {
        debug_assert!(self.format.is_color());
        self.fill_encoded(color);
    }

    pub fn clear_depth(&mut self, depth: f32) {
        debug_assert!(self.format.is_depth());
        self.fill_encoded(Vec4::new(depth, 0.0, 0.0, 1.0));
    }

    /// Clear the stencil to `value`, masked to the stencil bit depth
    pub fn clear_stencil(&mut self, value: i32) {
        debug_assert!(self.format.is_stencil());
        let masked = (value as u32) & 0xFF;
        self.fill_encoded(Vec4::new(masked as f32, 0.0, 0.0, 1.0));
    }

    /// Convert to 8-bit RGBA for viewing
    ///
    /// Depth is mapped to gray; stencil values are written as gray levels.
    pub fn to_rgba8(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            let value = self.pixel(x, y);
            let rgba = if self.format.is_depth() {
                Vec4::new(value.x, value.x, value.x, 1.0)
            } else if self.format.is_stencil() {
                let gray = value.x / 255.0;
                Vec4::new(gray, gray, gray, 1.0)
            } else {
                value
            };
            image::Rgba(rgba.to_array().map(|v| crate::format::quantize_unorm(v, 8) as u8))
        })
    }

    /// Write the image as PNG
    pub fn save_png(&self, path: impl AsRef<Path>) -> ConformanceResult<()> {
        self.to_rgba8()
            .save_with_format(path.as_ref(), image::ImageFormat::Png)?;
        Ok(())
    }
}
