//! Client buffers and the images imported from them

use std::rc::Rc;

use crate::egl::{EGLClientBuffer, EGLContext, EGLDisplay, EGLImageKHR, ImageFunctions};
use crate::objects::{Renderbuffer, Texture};
use crate::{GlFunctions, GlResult, ImageSource};

enum ClientObject<'gl, G: GlFunctions + ?Sized> {
    Texture(Texture<'gl, G>),
    Renderbuffer(Renderbuffer<'gl, G>),
}

/// A texture or renderbuffer about to be imported as an EGL image
///
/// Owns its GL object and deletes it on drop.
pub struct ClientBuffer<'gl, G: GlFunctions + ?Sized> {
    object: ClientObject<'gl, G>,
    width: u32,
    height: u32,
}

impl<'gl, G: GlFunctions + ?Sized> ClientBuffer<'gl, G> {
    pub(crate) fn from_texture(texture: Texture<'gl, G>, width: u32, height: u32) -> Self {
        Self {
            object: ClientObject::Texture(texture),
            width,
            height,
        }
    }

    pub(crate) fn from_renderbuffer(
        renderbuffer: Renderbuffer<'gl, G>,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            object: ClientObject::Renderbuffer(renderbuffer),
            width,
            height,
        }
    }

    /// GL name of the owned object
    pub fn name(&self) -> u32 {
        match &self.object {
            ClientObject::Texture(texture) => texture.name(),
            ClientObject::Renderbuffer(renderbuffer) => renderbuffer.name(),
        }
    }

    pub fn is_texture(&self) -> bool {
        matches!(self.object, ClientObject::Texture(_))
    }

    pub fn is_renderbuffer(&self) -> bool {
        matches!(self.object, ClientObject::Renderbuffer(_))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The object name in the form `eglCreateImageKHR` expects
    pub fn egl_client_buffer(&self) -> EGLClientBuffer {
        std::ptr::without_provenance_mut(self.name() as usize)
    }
}

impl<G: GlFunctions + ?Sized> std::fmt::Debug for ClientBuffer<'_, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.is_texture() { "texture" } else { "renderbuffer" };
        f.debug_struct("ClientBuffer")
            .field("kind", &kind)
            .field("name", &self.name())
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// An EGL image sharing storage with a [`ClientBuffer`]
///
/// The image is destroyed when this is dropped. The client buffer lives on
/// for as long as any clone from [`client_buffer`](Self::client_buffer)
/// exists, so either side can be released first.
pub struct SharedImage<'a, G: GlFunctions + ?Sized> {
    egl: &'a dyn ImageFunctions,
    display: EGLDisplay,
    image: EGLImageKHR,
    source: ImageSource,
    buffer: Rc<ClientBuffer<'a, G>>,
}

impl<'a, G: GlFunctions + ?Sized> SharedImage<'a, G> {
    /// Import `buffer` as an EGL image, taking ownership of it
    pub fn import(
        source: &ImageSource,
        egl: &'a dyn ImageFunctions,
        display: EGLDisplay,
        context: EGLContext,
        buffer: ClientBuffer<'a, G>,
    ) -> GlResult<Self> {
        let image = source.create_image(egl, display, context, buffer.egl_client_buffer())?;
        log::debug!("Imported {} (GL name {}) as EGL image {:?}", source, buffer.name(), image);
        Ok(Self {
            egl,
            display,
            image,
            source: *source,
            buffer: Rc::new(buffer),
        })
    }

    pub fn image(&self) -> EGLImageKHR {
        self.image
    }

    pub fn display(&self) -> EGLDisplay {
        self.display
    }

    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    pub fn buffer(&self) -> &ClientBuffer<'a, G> {
        &self.buffer
    }

    /// Another owner of the client buffer, independent of this image
    pub fn client_buffer(&self) -> Rc<ClientBuffer<'a, G>> {
        Rc::clone(&self.buffer)
    }
}

impl<G: GlFunctions + ?Sized> Drop for SharedImage<'_, G> {
    fn drop(&mut self) {
        log::debug!("Destroying EGL image {:?}", self.image);
        if !self.egl.destroy_image(self.display, self.image) {
            log::warn!(
                "eglDestroyImageKHR failed for {:?} with {}",
                self.image,
                crate::egl::error_name(self.egl.get_error())
            );
        }
    }
}

impl<G: GlFunctions + ?Sized> std::fmt::Debug for SharedImage<'_, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedImage")
            .field("image", &self.image)
            .field("source", &self.source)
            .field("buffer", &self.buffer.name())
            .finish()
    }
}
