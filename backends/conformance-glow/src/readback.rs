//! Reading back the content of an imported image

use conformance::{ReferenceImage, TextureFormat};

use crate::binding::ScopedBinding;
use crate::egl::EGLImageKHR;
use crate::formats::map_internal_format;
use crate::objects::{Framebuffer, Renderbuffer, Texture};
use crate::{GlError, GlFunctions, GlResult, ImageSource, SharedImage, check_error, gl_call};

/// Produces the observed pixels of a [`SharedImage`]
pub trait ImageReadback<G: GlFunctions + ?Sized> {
    fn read(&self, gl: &G, image: &SharedImage<'_, G>) -> GlResult<ReferenceImage>;
}

/// Reads an imported image through a new EGL image sibling
///
/// The image is bound to a fresh texture (`glEGLImageTargetTexture2DOES`) or
/// renderbuffer (`glEGLImageTargetRenderbufferStorageOES`), which is then
/// attached as `COLOR_ATTACHMENT0` of a temporary framebuffer and read with
/// `RGBA`/`UNSIGNED_BYTE`. The result is always an RGBA8 image. Depth and
/// stencil sources cannot be read this way and report
/// [`GlError::Unsupported`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FramebufferReadback;

impl<G: GlFunctions + ?Sized> ImageReadback<G> for FramebufferReadback {
    fn read(&self, gl: &G, image: &SharedImage<'_, G>) -> GlResult<ReferenceImage> {
        let source = image.source();
        if let ImageSource::Renderbuffer { internal_format } = *source {
            let format = map_internal_format(internal_format)?;
            if !format.is_color() {
                return Err(GlError::Unsupported(format!(
                    "framebuffer readback of {source}"
                )));
            }
        }

        let sibling = Sibling::bind(gl, source.is_texture(), image.image())?;
        let framebuffer = Framebuffer::new(gl)?;
        let binding = ScopedBinding::framebuffer(gl, framebuffer.name())?;
        sibling.attach(gl)?;

        let status = gl.check_framebuffer_status(glow::FRAMEBUFFER);
        if status != glow::FRAMEBUFFER_COMPLETE {
            return Err(GlError::IncompleteFramebuffer { status });
        }

        let (width, height) = (image.buffer().width(), image.buffer().height());
        let mut observed = ReferenceImage::new(TextureFormat::RGBA8, width, height);
        gl_call!(
            gl,
            read_pixels(
                0,
                0,
                width as i32,
                height as i32,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                observed.data_mut()
            )
        )?;

        binding.end();
        log::debug!("Read back {source} through EGL image {:?}", image.image());
        Ok(observed)
    }
}

/// GL object sharing storage with an EGL image
enum Sibling<'gl, G: GlFunctions + ?Sized> {
    Texture(Texture<'gl, G>),
    Renderbuffer(Renderbuffer<'gl, G>),
}

impl<'gl, G: GlFunctions + ?Sized> Sibling<'gl, G> {
    fn bind(gl: &'gl G, texture: bool, image: EGLImageKHR) -> GlResult<Self> {
        if texture {
            let texture = Texture::new(gl)?;
            let binding = ScopedBinding::texture(gl, glow::TEXTURE_2D, texture.name())?;
            gl.egl_image_target_texture_2d(glow::TEXTURE_2D, image)?;
            check_error(gl, "egl_image_target_texture_2d")?;
            binding.end();
            Ok(Sibling::Texture(texture))
        } else {
            let renderbuffer = Renderbuffer::new(gl)?;
            let binding = ScopedBinding::renderbuffer(gl, renderbuffer.name())?;
            gl.egl_image_target_renderbuffer_storage(glow::RENDERBUFFER, image)?;
            check_error(gl, "egl_image_target_renderbuffer_storage")?;
            binding.end();
            Ok(Sibling::Renderbuffer(renderbuffer))
        }
    }

    /// Attach to the bound framebuffer as `COLOR_ATTACHMENT0`
    fn attach(&self, gl: &G) -> GlResult<()> {
        match self {
            Sibling::Texture(texture) => gl_call!(
                gl,
                framebuffer_texture_2d(
                    glow::FRAMEBUFFER,
                    glow::COLOR_ATTACHMENT0,
                    glow::TEXTURE_2D,
                    texture.name(),
                    0
                )
            ),
            Sibling::Renderbuffer(renderbuffer) => gl_call!(
                gl,
                framebuffer_renderbuffer(
                    glow::FRAMEBUFFER,
                    glow::COLOR_ATTACHMENT0,
                    glow::RENDERBUFFER,
                    renderbuffer.name()
                )
            ),
        }
    }
}
