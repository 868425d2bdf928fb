//! GL format enums to [`TextureFormat`]

use conformance::{ChannelOrder, ChannelType, TextureFormat};

use crate::{GlError, GlResult};

/// Texture format of client data uploaded with `format`/`ty`
pub fn map_transfer_format(format: u32, ty: u32) -> GlResult<TextureFormat> {
    use ChannelOrder as O;
    use ChannelType as T;

    let mapped = match (format, ty) {
        (glow::RGBA, glow::UNSIGNED_BYTE) => TextureFormat::RGBA8,
        (glow::RGB, glow::UNSIGNED_BYTE) => TextureFormat::RGB8,
        (glow::RG, glow::UNSIGNED_BYTE) => TextureFormat::new(O::RG, T::UnormInt8),
        (glow::RED, glow::UNSIGNED_BYTE) => TextureFormat::new(O::R, T::UnormInt8),
        (glow::RGBA, glow::UNSIGNED_SHORT_4_4_4_4) => TextureFormat::RGBA4,
        (glow::RGBA, glow::UNSIGNED_SHORT_5_5_5_1) => TextureFormat::RGB5_A1,
        (glow::RGB, glow::UNSIGNED_SHORT_5_6_5) => TextureFormat::RGB565,
        (glow::RGBA, glow::FLOAT) => TextureFormat::new(O::RGBA, T::Float),
        (glow::RGB, glow::FLOAT) => TextureFormat::new(O::RGB, T::Float),
        (glow::RED, glow::FLOAT) => TextureFormat::new(O::R, T::Float),
        (glow::DEPTH_COMPONENT, glow::UNSIGNED_SHORT) => TextureFormat::DEPTH16,
        (glow::DEPTH_COMPONENT, glow::FLOAT) => TextureFormat::new(O::D, T::Float),
        (glow::STENCIL_INDEX, glow::UNSIGNED_BYTE) => TextureFormat::STENCIL8,
        _ => return Err(GlError::UnknownFormat { format, ty }),
    };
    Ok(mapped)
}

/// Texture format of storage allocated with a sized internal format
pub fn map_internal_format(internal_format: u32) -> GlResult<TextureFormat> {
    use ChannelOrder as O;
    use ChannelType as T;

    let mapped = match internal_format {
        glow::RGBA8 => TextureFormat::RGBA8,
        glow::RGB8 => TextureFormat::RGB8,
        glow::RG8 => TextureFormat::new(O::RG, T::UnormInt8),
        glow::R8 => TextureFormat::new(O::R, T::UnormInt8),
        glow::RGBA4 => TextureFormat::RGBA4,
        glow::RGB5_A1 => TextureFormat::RGB5_A1,
        glow::RGB565 => TextureFormat::RGB565,
        glow::DEPTH_COMPONENT16 => TextureFormat::DEPTH16,
        glow::STENCIL_INDEX8 => TextureFormat::STENCIL8,
        glow::RGBA32F => TextureFormat::new(O::RGBA, T::Float),
        _ => {
            return Err(GlError::UnknownFormat {
                format: internal_format,
                ty: 0,
            });
        }
    };
    Ok(mapped)
}

/// Format/type pair for uploading or reading back data in `format`
pub fn transfer_format_for(format: TextureFormat) -> Option<(u32, u32)> {
    use ChannelOrder as O;
    use ChannelType as T;

    let pair = match (format.order, format.ty) {
        (O::RGBA, T::UnormInt8) => (glow::RGBA, glow::UNSIGNED_BYTE),
        (O::RGB, T::UnormInt8) => (glow::RGB, glow::UNSIGNED_BYTE),
        (O::RG, T::UnormInt8) => (glow::RG, glow::UNSIGNED_BYTE),
        (O::R, T::UnormInt8) => (glow::RED, glow::UNSIGNED_BYTE),
        (O::RGBA, T::UnormShort4444) => (glow::RGBA, glow::UNSIGNED_SHORT_4_4_4_4),
        (O::RGBA, T::UnormShort5551) => (glow::RGBA, glow::UNSIGNED_SHORT_5_5_5_1),
        (O::RGB, T::UnormShort565) => (glow::RGB, glow::UNSIGNED_SHORT_5_6_5),
        (O::RGBA, T::Float) => (glow::RGBA, glow::FLOAT),
        (O::RGB, T::Float) => (glow::RGB, glow::FLOAT),
        (O::R, T::Float) => (glow::RED, glow::FLOAT),
        (O::D, T::UnormInt16) => (glow::DEPTH_COMPONENT, glow::UNSIGNED_SHORT),
        (O::D, T::Float) => (glow::DEPTH_COMPONENT, glow::FLOAT),
        (O::S, T::UnsignedInt8) => (glow::STENCIL_INDEX, glow::UNSIGNED_BYTE),
        _ => return None,
    };
    Some(pair)
}

/// Lowercase enum name used in case names, e.g. `rgba` or `unsigned_short_5_6_5`
pub fn enum_name(value: u32) -> String {
    let name = match value {
        glow::RGBA => "rgba",
        glow::RGB => "rgb",
        glow::RG => "rg",
        glow::RED => "red",
        glow::DEPTH_COMPONENT => "depth_component",
        glow::STENCIL_INDEX => "stencil_index",
        glow::UNSIGNED_BYTE => "unsigned_byte",
        glow::UNSIGNED_SHORT => "unsigned_short",
        glow::UNSIGNED_SHORT_4_4_4_4 => "unsigned_short_4_4_4_4",
        glow::UNSIGNED_SHORT_5_5_5_1 => "unsigned_short_5_5_5_1",
        glow::UNSIGNED_SHORT_5_6_5 => "unsigned_short_5_6_5",
        glow::FLOAT => "float",
        glow::RGBA8 => "rgba8",
        glow::RGB8 => "rgb8",
        glow::RG8 => "rg8",
        glow::R8 => "r8",
        glow::RGBA4 => "rgba4",
        glow::RGB5_A1 => "rgb5_a1",
        glow::RGB565 => "rgb565",
        glow::DEPTH_COMPONENT16 => "depth_component16",
        glow::STENCIL_INDEX8 => "stencil_index8",
        glow::RGBA32F => "rgba32f",
        other => return format!("{other:#06x}"),
    };
    name.to_string()
}
