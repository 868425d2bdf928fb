//! Image sources: producers of GL client buffers and their reference images
//!
//! Each [`ImageSource`] creates exactly one texture or renderbuffer, fills it
//! with known content when a reference image is requested, and knows which
//! EGL target and attributes import that object as an `EGLImageKHR`.

use conformance::{ReferenceImage, Vec4};

use crate::binding::ScopedBinding;
use crate::egl::{
    self, AttribMap, EGL_GL_TEXTURE_LEVEL_KHR, EGL_SUCCESS, EGLClientBuffer, EGLContext,
    EGLDisplay, EGLImageKHR, EGLenum, ImageFunctions,
};
use crate::formats::{enum_name, map_internal_format, map_transfer_format};
use crate::objects::{Framebuffer, Renderbuffer, Texture};
use crate::{ClientBuffer, GlError, GlFunctions, GlResult, gl_call};

pub const IMAGE_WIDTH: u32 = 64;
pub const IMAGE_HEIGHT: u32 = 64;

/// One face of a cube map texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl CubeFace {
    /// Faces in GL enum order
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
    ];

    fn index(self) -> u32 {
        self as u32
    }

    /// `TEXTURE_CUBE_MAP_POSITIVE_X` and following
    pub fn gl_target(self) -> u32 {
        glow::TEXTURE_CUBE_MAP_POSITIVE_X + self.index()
    }

    /// `EGL_GL_TEXTURE_CUBE_MAP_POSITIVE_X_KHR` and following
    pub fn egl_target(self) -> EGLenum {
        egl::EGL_GL_TEXTURE_CUBE_MAP_POSITIVE_X_KHR + self.index()
    }

    pub fn name(self) -> &'static str {
        match self {
            CubeFace::PositiveX => "positive_x",
            CubeFace::NegativeX => "negative_x",
            CubeFace::PositiveY => "positive_y",
            CubeFace::NegativeY => "negative_y",
            CubeFace::PositiveZ => "positive_z",
            CubeFace::NegativeZ => "negative_z",
        }
    }
}

/// Value written by the clear that initializes a renderbuffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClearValue {
    Stencil(i32),
    Depth(f32),
    Color(Vec4),
}

impl ClearValue {
    /// Clear value used for a renderbuffer of `internal_format`
    ///
    /// # Panics
    ///
    /// Panics for formats outside the renderbuffer case table.
    pub fn for_renderbuffer_format(internal_format: u32) -> Self {
        match internal_format {
            glow::STENCIL_INDEX8 => ClearValue::Stencil(235),
            glow::DEPTH_COMPONENT16 => ClearValue::Depth(0.5),
            glow::RGBA4 => ClearValue::Color(Vec4::new(0.9, 0.5, 0.65, 1.0)),
            glow::RGB5_A1 => ClearValue::Color(Vec4::new(0.5, 0.7, 0.65, 1.0)),
            glow::RGB565 => ClearValue::Color(Vec4::new(0.2, 0.5, 0.65, 1.0)),
            other => unreachable!("no clear value for renderbuffer format {other:#06x}"),
        }
    }

    pub fn attachment(self) -> u32 {
        match self {
            ClearValue::Stencil(_) => glow::STENCIL_ATTACHMENT,
            ClearValue::Depth(_) => glow::DEPTH_ATTACHMENT,
            ClearValue::Color(_) => glow::COLOR_ATTACHMENT0,
        }
    }

    /// Attach `renderbuffer` to the bound framebuffer, clear it, and detach it again
    fn clear_renderbuffer<G: GlFunctions + ?Sized>(
        self,
        gl: &G,
        renderbuffer: u32,
    ) -> GlResult<()> {
        let attachment = self.attachment();
        gl_call!(
            gl,
            framebuffer_renderbuffer(
                glow::FRAMEBUFFER,
                attachment,
                glow::RENDERBUFFER,
                renderbuffer
            )
        )?;
        match self {
            ClearValue::Stencil(value) => {
                gl_call!(gl, clear_stencil(value))?;
                gl_call!(gl, clear(glow::STENCIL_BUFFER_BIT))?;
            }
            ClearValue::Depth(value) => {
                gl_call!(gl, clear_depth(value))?;
                gl_call!(gl, clear(glow::DEPTH_BUFFER_BIT))?;
            }
            ClearValue::Color(color) => {
                gl_call!(gl, clear_color(color.x, color.y, color.z, color.w))?;
                gl_call!(gl, clear(glow::COLOR_BUFFER_BIT))?;
            }
        }
        gl_call!(
            gl,
            framebuffer_renderbuffer(glow::FRAMEBUFFER, attachment, glow::RENDERBUFFER, 0)
        )
    }

    /// Apply the same clear to a reference image
    pub fn clear_reference(self, reference: &mut ReferenceImage) {
        match self {
            ClearValue::Stencil(value) => reference.clear_stencil(value),
            ClearValue::Depth(value) => reference.clear_depth(value),
            ClearValue::Color(color) => reference.clear(color),
        }
    }
}

/// How the GL object behind an EGL image is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// Level 0 of a 2D texture
    Texture2D {
        format: u32,
        ty: u32,
        /// Leave the default mipmap minification filter in place
        use_tex_level0: bool,
    },
    /// Level 0 of one face of a cube map; all six faces get storage
    CubeMapFace {
        face: CubeFace,
        format: u32,
        ty: u32,
        use_tex_level0: bool,
    },
    /// A 64x64 renderbuffer
    Renderbuffer { internal_format: u32 },
}

impl ImageSource {
    pub fn texture_2d(format: u32, ty: u32, use_tex_level0: bool) -> Self {
        ImageSource::Texture2D {
            format,
            ty,
            use_tex_level0,
        }
    }

    pub fn cube_map_face(face: CubeFace, format: u32, ty: u32, use_tex_level0: bool) -> Self {
        ImageSource::CubeMapFace {
            face,
            format,
            ty,
            use_tex_level0,
        }
    }

    pub fn renderbuffer(internal_format: u32) -> Self {
        ImageSource::Renderbuffer { internal_format }
    }

    /// EGL target passed to `eglCreateImageKHR`
    pub fn source(&self) -> EGLenum {
        match self {
            ImageSource::Texture2D { .. } => egl::EGL_GL_TEXTURE_2D_KHR,
            ImageSource::CubeMapFace { face, .. } => face.egl_target(),
            ImageSource::Renderbuffer { .. } => egl::EGL_GL_RENDERBUFFER_KHR,
        }
    }

    /// EGL extension that must be present to import this source
    pub fn required_extension(&self) -> &'static str {
        match self {
            ImageSource::Texture2D { .. } => "EGL_KHR_gl_texture_2D_image",
            ImageSource::CubeMapFace { .. } => "EGL_KHR_gl_texture_cubemap_image",
            ImageSource::Renderbuffer { .. } => "EGL_KHR_gl_renderbuffer_image",
        }
    }

    /// Attributes for `eglCreateImageKHR`; texture sources import level 0
    pub fn create_attribs(&self) -> AttribMap {
        let mut attribs = AttribMap::new();
        if self.is_texture() {
            attribs.insert(EGL_GL_TEXTURE_LEVEL_KHR, 0);
        }
        attribs
    }

    pub fn is_texture(&self) -> bool {
        !matches!(self, ImageSource::Renderbuffer { .. })
    }

    /// Target the texture object is bound to
    fn bind_target(&self) -> u32 {
        match self {
            ImageSource::Texture2D { .. } => glow::TEXTURE_2D,
            ImageSource::CubeMapFace { .. } => glow::TEXTURE_CUBE_MAP,
            ImageSource::Renderbuffer { .. } => glow::RENDERBUFFER,
        }
    }

    /// GL target of the image itself: the face for cube maps
    pub fn image_gl_target(&self) -> u32 {
        match self {
            ImageSource::CubeMapFace { face, .. } => face.gl_target(),
            other => other.bind_target(),
        }
    }

    /// Case name such as `texture_2d_rgba_unsigned_byte` or `renderbuffer_rgba4`
    pub fn name(&self) -> String {
        match self {
            ImageSource::Texture2D { format, ty, .. } => {
                format!("texture_2d_{}_{}", enum_name(*format), enum_name(*ty))
            }
            ImageSource::CubeMapFace {
                face, format, ty, ..
            } => format!(
                "cubemap_{}_{}_{}",
                face.name(),
                enum_name(*format),
                enum_name(*ty)
            ),
            ImageSource::Renderbuffer { internal_format } => {
                format!("renderbuffer_{}", enum_name(*internal_format))
            }
        }
    }

    /// Allocate the client buffer, optionally filling it and `reference` with matching content
    ///
    /// Bindings touched here are restored before returning, on error too.
    pub fn create_buffer<'gl, G: GlFunctions + ?Sized>(
        &self,
        gl: &'gl G,
        reference: Option<&mut ReferenceImage>,
    ) -> GlResult<ClientBuffer<'gl, G>> {
        match *self {
            ImageSource::Texture2D {
                format,
                ty,
                use_tex_level0,
            }
            | ImageSource::CubeMapFace {
                format,
                ty,
                use_tex_level0,
                ..
            } => self.create_texture_buffer(gl, format, ty, use_tex_level0, reference),
            ImageSource::Renderbuffer { internal_format } => {
                create_renderbuffer_buffer(gl, internal_format, reference)
            }
        }
    }

    fn create_texture_buffer<'gl, G: GlFunctions + ?Sized>(
        &self,
        gl: &'gl G,
        format: u32,
        ty: u32,
        use_tex_level0: bool,
        reference: Option<&mut ReferenceImage>,
    ) -> GlResult<ClientBuffer<'gl, G>> {
        let texture = Texture::new(gl)?;
        let target = self.bind_target();
        let binding = ScopedBinding::texture(gl, target, texture.name())?;
        let (width, height) = (IMAGE_WIDTH as i32, IMAGE_HEIGHT as i32);

        // Level 0 storage, on every face for cube maps
        let level0_targets: &[u32] = match self {
            ImageSource::CubeMapFace { .. } => &CUBE_FACE_TARGETS,
            _ => &[glow::TEXTURE_2D],
        };
        for &level_target in level0_targets {
            gl_call!(
                gl,
                tex_image_2d(level_target, 0, format as i32, width, height, format, ty, None)
            )?;
        }

        if !use_tex_level0 {
            // Linear minification makes the single-level texture complete
            gl_call!(
                gl,
                tex_parameter_i32(target, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32)
            )?;
        }

        if let Some(reference) = reference {
            let mut image =
                ReferenceImage::new(map_transfer_format(format, ty)?, IMAGE_WIDTH, IMAGE_HEIGHT);
            image.fill_with_component_gradients(Vec4::ZERO, Vec4::ONE);

            for (parameter, value) in [
                (glow::TEXTURE_MIN_FILTER, glow::LINEAR),
                (glow::TEXTURE_MAG_FILTER, glow::LINEAR),
                (glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE),
                (glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE),
            ] {
                gl_call!(gl, tex_parameter_i32(target, parameter, value as i32))?;
            }

            gl_call!(
                gl,
                tex_image_2d(
                    self.image_gl_target(),
                    0,
                    format as i32,
                    width,
                    height,
                    format,
                    ty,
                    Some(image.data())
                )
            )?;
            *reference = image;
        }

        binding.end();
        log::debug!("Created {} as texture {}", self, texture.name());
        Ok(ClientBuffer::from_texture(texture, IMAGE_WIDTH, IMAGE_HEIGHT))
    }

    /// Import `buffer` through `eglCreateImageKHR`
    ///
    /// Any EGL error fails the import; an image created alongside an error is
    /// destroyed before returning.
    pub fn create_image(
        &self,
        egl: &dyn ImageFunctions,
        display: EGLDisplay,
        context: EGLContext,
        buffer: EGLClientBuffer,
    ) -> GlResult<EGLImageKHR> {
        let attribs = self.create_attribs().to_vec();
        let image = egl.create_image(display, context, self.source(), buffer, &attribs);
        let code = egl.get_error();

        if code != EGL_SUCCESS || image.is_null() {
            if !image.is_null() {
                egl.destroy_image(display, image);
            }
            log::error!("eglCreateImageKHR failed for {}: {}", self, egl::error_name(code));
            return Err(GlError::ImageImport { code });
        }
        Ok(image)
    }
}

const CUBE_FACE_TARGETS: [u32; 6] = [
    glow::TEXTURE_CUBE_MAP_POSITIVE_X,
    glow::TEXTURE_CUBE_MAP_NEGATIVE_X,
    glow::TEXTURE_CUBE_MAP_POSITIVE_Y,
    glow::TEXTURE_CUBE_MAP_NEGATIVE_Y,
    glow::TEXTURE_CUBE_MAP_POSITIVE_Z,
    glow::TEXTURE_CUBE_MAP_NEGATIVE_Z,
];

fn create_renderbuffer_buffer<'gl, G: GlFunctions + ?Sized>(
    gl: &'gl G,
    internal_format: u32,
    reference: Option<&mut ReferenceImage>,
) -> GlResult<ClientBuffer<'gl, G>> {
    let renderbuffer = Renderbuffer::new(gl)?;
    let binding = ScopedBinding::renderbuffer(gl, renderbuffer.name())?;

    gl_call!(
        gl,
        renderbuffer_storage(
            glow::RENDERBUFFER,
            internal_format,
            IMAGE_WIDTH as i32,
            IMAGE_HEIGHT as i32
        )
    )?;

    if let Some(reference) = reference {
        let clear = ClearValue::for_renderbuffer_format(internal_format);
        let mut image = ReferenceImage::new(
            map_internal_format(internal_format)?,
            IMAGE_WIDTH,
            IMAGE_HEIGHT,
        );

        let framebuffer = Framebuffer::new(gl)?;
        let fbo_binding = ScopedBinding::framebuffer(gl, framebuffer.name())?;
        clear.clear_renderbuffer(gl, renderbuffer.name())?;
        fbo_binding.end();

        clear.clear_reference(&mut image);
        *reference = image;
    }

    binding.end();
    log::debug!(
        "Created renderbuffer {} ({})",
        renderbuffer.name(),
        enum_name(internal_format)
    );
    Ok(ClientBuffer::from_renderbuffer(
        renderbuffer,
        IMAGE_WIDTH,
        IMAGE_HEIGHT,
    ))
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageSource::Texture2D { format, ty, .. } => {
                write!(f, "texture_2d {}/{}", enum_name(*format), enum_name(*ty))
            }
            ImageSource::CubeMapFace {
                face, format, ty, ..
            } => write!(
                f,
                "cubemap {} {}/{}",
                face.name(),
                enum_name(*format),
                enum_name(*ty)
            ),
            ImageSource::Renderbuffer { internal_format } => {
                write!(f, "renderbuffer {}", enum_name(*internal_format))
            }
        }
    }
}
