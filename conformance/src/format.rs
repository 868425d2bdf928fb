//! Pixel formats and single-pixel encoding
//!
//! A [`TextureFormat`] pairs a [`ChannelOrder`] with a [`ChannelType`], in the
//! same way client-side transfer formats pair a format enum with a type enum.
//! Packed types store their channels in native-endian 16-bit words with the
//! first channel in the most significant bits.

use crate::Vec4;

/// Which channels a pixel carries and in what order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ChannelOrder {
    R,
    RG,
    RGB,
    RGBA,
    /// Depth only
    D,
    /// Stencil only
    S,
}

impl ChannelOrder {
    pub fn channel_count(self) -> usize {
        match self {
            ChannelOrder::R | ChannelOrder::D | ChannelOrder::S => 1,
            ChannelOrder::RG => 2,
            ChannelOrder::RGB => 3,
            ChannelOrder::RGBA => 4,
        }
    }
}

/// How each channel (or the packed pixel) is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ChannelType {
    UnormInt8,
    UnormShort565,
    UnormShort4444,
    UnormShort5551,
    UnormInt16,
    UnsignedInt8,
    Float,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TextureFormat {
    pub order: ChannelOrder,
    pub ty: ChannelType,
}

impl TextureFormat {
    pub const RGBA8: Self = Self::new(ChannelOrder::RGBA, ChannelType::UnormInt8);
    pub const RGB8: Self = Self::new(ChannelOrder::RGB, ChannelType::UnormInt8);
    pub const RGBA4: Self = Self::new(ChannelOrder::RGBA, ChannelType::UnormShort4444);
    pub const RGB5_A1: Self = Self::new(ChannelOrder::RGBA, ChannelType::UnormShort5551);
    pub const RGB565: Self = Self::new(ChannelOrder::RGB, ChannelType::UnormShort565);
    pub const DEPTH16: Self = Self::new(ChannelOrder::D, ChannelType::UnormInt16);
    pub const STENCIL8: Self = Self::new(ChannelOrder::S, ChannelType::UnsignedInt8);

    pub const fn new(order: ChannelOrder, ty: ChannelType) -> Self {
        Self { order, ty }
    }

    /// Whether this order/type combination describes a real pixel layout
    pub fn is_valid(self) -> bool {
        use ChannelOrder::*;
        use ChannelType::*;
        match (self.order, self.ty) {
            (RGB, UnormShort565) => true,
            (RGBA, UnormShort4444 | UnormShort5551) => true,
            (_, UnormShort565 | UnormShort4444 | UnormShort5551) => false,
            (D, UnormInt16 | Float) => true,
            (D, _) => false,
            (S, UnsignedInt8) => true,
            (S, _) => false,
            (R | RG | RGB | RGBA, UnormInt8 | UnormInt16 | UnsignedInt8 | Float) => true,
        }
    }

    /// Size of one pixel in bytes
    pub fn pixel_size(self) -> usize {
        let channels = self.order.channel_count();
        match self.ty {
            ChannelType::UnormInt8 | ChannelType::UnsignedInt8 => channels,
            ChannelType::UnormShort565
            | ChannelType::UnormShort4444
            | ChannelType::UnormShort5551 => 2,
            ChannelType::UnormInt16 => channels * 2,
            ChannelType::Float => channels * 4,
        }
    }

    pub fn is_depth(self) -> bool {
        self.order == ChannelOrder::D
    }

    pub fn is_stencil(self) -> bool {
        self.order == ChannelOrder::S
    }

    pub fn is_color(self) -> bool {
        !self.is_depth() && !self.is_stencil()
    }

    /// Whether any channel is stored as floating point
    pub fn is_float(self) -> bool {
        self.ty == ChannelType::Float
    }

    /// Whether channels hold plain integers instead of normalized values
    pub fn is_integer(self) -> bool {
        self.ty == ChannelType::UnsignedInt8
    }

    /// Which RGBA components are stored; missing components decode to (0, 0, 0, 1)
    pub fn channel_mask(self) -> [bool; 4] {
        match self.order {
            ChannelOrder::R | ChannelOrder::D | ChannelOrder::S => [true, false, false, false],
            ChannelOrder::RG => [true, true, false, false],
            ChannelOrder::RGB => [true, true, true, false],
            ChannelOrder::RGBA => [true, true, true, true],
        }
    }

    /// Bits per RGBA component for normalized formats, 0 for absent or non-normalized channels
    pub fn channel_bits(self) -> [u32; 4] {
        let mask = self.channel_mask();
        let per_channel = |bits: u32| mask.map(|present| if present { bits } else { 0 });
        match self.ty {
            ChannelType::UnormInt8 => per_channel(8),
            ChannelType::UnormInt16 => per_channel(16),
            ChannelType::UnormShort565 => [5, 6, 5, 0],
            ChannelType::UnormShort4444 => [4, 4, 4, 4],
            ChannelType::UnormShort5551 => [5, 5, 5, 1],
            ChannelType::UnsignedInt8 | ChannelType::Float => [0; 4],
        }
    }

    /// Write one pixel into `dst`, which must be exactly [`pixel_size`](Self::pixel_size) bytes
    ///
    /// Normalized channels are clamped to `[0, 1]` and rounded to nearest.
    /// Depth and stencil values are taken from `value.x`.
    pub fn encode(self, dst: &mut [u8], value: Vec4) {
        debug_assert_eq!(dst.len(), self.pixel_size());
        let values = value.to_array();
        let count = self.order.channel_count();
        match self.ty {
            ChannelType::UnormInt8 => {
                for (byte, v) in dst.iter_mut().zip(&values[..count]) {
                    *byte = quantize_unorm(*v, 8) as u8;
                }
            }
            ChannelType::UnormInt16 => {
                for (chunk, v) in dst.chunks_exact_mut(2).zip(&values[..count]) {
                    chunk.copy_from_slice(&(quantize_unorm(*v, 16) as u16).to_ne_bytes());
                }
            }
            ChannelType::UnsignedInt8 => {
                for (byte, v) in dst.iter_mut().zip(&values[..count]) {
                    *byte = v.round().clamp(0.0, 255.0) as u8;
                }
            }
            ChannelType::Float => {
                for (chunk, v) in dst.chunks_exact_mut(4).zip(&values[..count]) {
                    chunk.copy_from_slice(&v.to_ne_bytes());
                }
            }
            ChannelType::UnormShort565
            | ChannelType::UnormShort4444
            | ChannelType::UnormShort5551 => {
                let packed = pack(self.channel_bits(), values);
                dst.copy_from_slice(&packed.to_ne_bytes());
            }
        }
    }

    /// Read one pixel from `src`, which must be exactly [`pixel_size`](Self::pixel_size) bytes
    pub fn decode(self, src: &[u8]) -> Vec4 {
        debug_assert_eq!(src.len(), self.pixel_size());
        let mut values = [0.0, 0.0, 0.0, 1.0];
        let count = self.order.channel_count();
        match self.ty {
            ChannelType::UnormInt8 => {
                for (v, byte) in values[..count].iter_mut().zip(src) {
                    *v = dequantize_unorm(u32::from(*byte), 8);
                }
            }
            ChannelType::UnormInt16 => {
                for (v, chunk) in values[..count].iter_mut().zip(src.chunks_exact(2)) {
                    let raw = u16::from_ne_bytes([chunk[0], chunk[1]]);
                    *v = dequantize_unorm(u32::from(raw), 16);
                }
            }
            ChannelType::UnsignedInt8 => {
                for (v, byte) in values[..count].iter_mut().zip(src) {
                    *v = f32::from(*byte);
                }
            }
            ChannelType::Float => {
                for (v, chunk) in values[..count].iter_mut().zip(src.chunks_exact(4)) {
                    *v = f32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
                }
            }
            ChannelType::UnormShort565
            | ChannelType::UnormShort4444
            | ChannelType::UnormShort5551 => {
                let packed = u16::from_ne_bytes([src[0], src[1]]);
                let unpacked = unpack(self.channel_bits(), packed);
                values[..count].copy_from_slice(&unpacked[..count]);
            }
        }
        Vec4::from_array(values)
    }
}

impl std::fmt::Display for TextureFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}/{:?}", self.order, self.ty)
    }
}

/// Round a normalized value to the nearest step of a `bits`-wide unsigned integer
pub fn quantize_unorm(value: f32, bits: u32) -> u32 {
    let max = ((1u64 << bits) - 1) as f32;
    (value.clamp(0.0, 1.0) * max).round() as u32
}

pub fn dequantize_unorm(raw: u32, bits: u32) -> f32 {
    let max = ((1u64 << bits) - 1) as f32;
    raw as f32 / max
}

fn pack(bits: [u32; 4], values: [f32; 4]) -> u16 {
    let mut packed = 0u32;
    for (b, v) in bits.iter().zip(values) {
        if *b == 0 {
            continue;
        }
        packed = (packed << b) | quantize_unorm(v, *b);
    }
    packed as u16
}

fn unpack(bits: [u32; 4], packed: u16) -> [f32; 4] {
    let mut values = [0.0; 4];
    let mut shift: u32 = bits.iter().sum();
    for (v, b) in values.iter_mut().zip(bits) {
        if b == 0 {
            continue;
        }
        shift -= b;
        let raw = (u32::from(packed) >> shift) & ((1 << b) - 1);
        *v = dequantize_unorm(raw, b);
    }
    values
}
