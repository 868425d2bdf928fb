//! The GL entry points used by the fixtures
//!
//! Object names are plain `u32` values with `0` meaning "no object", exactly
//! as GL itself reports them through `glGetIntegerv`. This keeps binding
//! backup and restore uniform across object kinds and lets tests substitute
//! a software implementation for a real context.

use crate::egl::EGLImageKHR;
use crate::{GlError, GlResult};

/// Narrow view of a GL or GLES context
///
/// Implementations do not check for errors; callers pair calls with
/// [`check_error`], usually through [`gl_call!`](crate::gl_call).
pub trait GlFunctions {
    fn create_texture(&self) -> GlResult<u32>;
    fn delete_texture(&self, texture: u32);
    fn bind_texture(&self, target: u32, texture: u32);
    #[allow(clippy::too_many_arguments)]
    fn tex_image_2d(
        &self,
        target: u32,
        level: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        format: u32,
        ty: u32,
        pixels: Option<&[u8]>,
    );
    fn tex_parameter_i32(&self, target: u32, parameter: u32, value: i32);

    fn create_renderbuffer(&self) -> GlResult<u32>;
    fn delete_renderbuffer(&self, renderbuffer: u32);
    fn bind_renderbuffer(&self, target: u32, renderbuffer: u32);
    fn renderbuffer_storage(&self, target: u32, internal_format: u32, width: i32, height: i32);

    fn create_framebuffer(&self) -> GlResult<u32>;
    fn delete_framebuffer(&self, framebuffer: u32);
    fn bind_framebuffer(&self, target: u32, framebuffer: u32);
    fn framebuffer_renderbuffer(
        &self,
        target: u32,
        attachment: u32,
        renderbuffer_target: u32,
        renderbuffer: u32,
    );
    fn framebuffer_texture_2d(
        &self,
        target: u32,
        attachment: u32,
        texture_target: u32,
        texture: u32,
        level: i32,
    );
    fn check_framebuffer_status(&self, target: u32) -> u32;

    /// `glEGLImageTargetTexture2DOES` on the texture bound to `target`
    ///
    /// Fails with [`GlError::Unsupported`] when the context cannot bind EGL
    /// images; GL errors are left for [`check_error`].
    fn egl_image_target_texture_2d(&self, target: u32, image: EGLImageKHR) -> GlResult<()>;
    /// `glEGLImageTargetRenderbufferStorageOES` on the bound renderbuffer
    fn egl_image_target_renderbuffer_storage(&self, target: u32, image: EGLImageKHR)
    -> GlResult<()>;

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32);
    fn clear_depth(&self, depth: f32);
    fn clear_stencil(&self, stencil: i32);
    fn clear(&self, mask: u32);

    #[allow(clippy::too_many_arguments)]
    fn read_pixels(
        &self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        format: u32,
        ty: u32,
        pixels: &mut [u8],
    );

    fn get_integer(&self, parameter: u32) -> i32;
    fn get_error(&self) -> u32;
}

/// Turn a pending GL error into [`GlError::Call`]
pub fn check_error<G: GlFunctions + ?Sized>(gl: &G, call: &'static str) -> GlResult<()> {
    match gl.get_error() {
        glow::NO_ERROR => Ok(()),
        code => Err(GlError::Call { call, code }),
    }
}

/// Call a [`GlFunctions`] method and check `glGetError` afterwards
///
/// Evaluates to `GlResult<T>` where `T` is the method's return type.
///
/// ```ignore
/// let filter = glow::LINEAR as i32;
/// gl_call!(gl, tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, filter))?;
/// ```
#[macro_export]
macro_rules! gl_call {
    ($gl:expr, $method:ident($($arg:expr),* $(,)?)) => {{
        let gl = $gl;
        let value = $crate::GlFunctions::$method(gl, $($arg),*);
        $crate::check_error(gl, stringify!($method)).map(|()| value)
    }};
}

pub fn error_name(code: u32) -> String {
    let name = match code {
        glow::NO_ERROR => "GL_NO_ERROR",
        glow::INVALID_ENUM => "GL_INVALID_ENUM",
        glow::INVALID_VALUE => "GL_INVALID_VALUE",
        glow::INVALID_OPERATION => "GL_INVALID_OPERATION",
        glow::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        glow::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        other => return format!("{other:#06x}"),
    };
    name.to_string()
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::NativeGl;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::ffi::{CStr, c_void};
    use std::num::NonZeroU32;

    use glow::HasContext;

    use super::GlFunctions;
    use crate::egl::EGLImageKHR;
    use crate::{GlError, GlResult};

    type ImageTargetFn = unsafe extern "system" fn(target: u32, image: EGLImageKHR);

    /// A `glow::Context` together with the `GL_OES_EGL_image` entry points
    ///
    /// glow does not load `glEGLImageTargetTexture2DOES` or
    /// `glEGLImageTargetRenderbufferStorageOES`, so they are resolved here
    /// through the same loader the context was created with.
    pub struct NativeGl {
        context: glow::Context,
        image_target_texture_2d: Option<ImageTargetFn>,
        image_target_renderbuffer_storage: Option<ImageTargetFn>,
    }

    impl NativeGl {
        /// Wrap `context` and load the EGL image entry points with `loader`
        ///
        /// # Safety
        ///
        /// `loader` must return null or a pointer to the named function of the
        /// GL implementation behind `context`, such as `eglGetProcAddress`.
        pub unsafe fn new<F>(context: glow::Context, mut loader: F) -> Self
        where
            F: FnMut(&CStr) -> *const c_void,
        {
            let mut load = |name: &CStr| {
                let ptr = loader(name);
                if ptr.is_null() {
                    log::warn!("{} is not available", name.to_string_lossy());
                    return None;
                }
                // SAFETY: the loader returned this symbol's entry point
                Some(unsafe { std::mem::transmute::<*const c_void, ImageTargetFn>(ptr) })
            };
            Self {
                image_target_texture_2d: load(c"glEGLImageTargetTexture2DOES"),
                image_target_renderbuffer_storage: load(c"glEGLImageTargetRenderbufferStorageOES"),
                context,
            }
        }
    }

    impl std::fmt::Debug for NativeGl {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("NativeGl")
                .field("image_target_texture_2d", &self.image_target_texture_2d.is_some())
                .field(
                    "image_target_renderbuffer_storage",
                    &self.image_target_renderbuffer_storage.is_some(),
                )
                .finish_non_exhaustive()
        }
    }

    fn image_target(entry: Option<ImageTargetFn>, name: &str) -> GlResult<ImageTargetFn> {
        entry.ok_or_else(|| GlError::Unsupported(format!("{name} is not available")))
    }

    fn texture(name: u32) -> Option<glow::NativeTexture> {
        NonZeroU32::new(name).map(glow::NativeTexture)
    }

    fn renderbuffer(name: u32) -> Option<glow::NativeRenderbuffer> {
        NonZeroU32::new(name).map(glow::NativeRenderbuffer)
    }

    fn framebuffer(name: u32) -> Option<glow::NativeFramebuffer> {
        NonZeroU32::new(name).map(glow::NativeFramebuffer)
    }

    // All calls assume the context is current on this thread, which the
    // caller guarantees for the lifetime of the borrow.
    impl GlFunctions for NativeGl {
        fn create_texture(&self) -> GlResult<u32> {
            unsafe { HasContext::create_texture(&self.context) }
                .map(|t| t.0.get())
                .map_err(|e| GlError::CreateObject(format!("texture: {e}")))
        }

        fn delete_texture(&self, name: u32) {
            if let Some(t) = texture(name) {
                unsafe { HasContext::delete_texture(&self.context, t) }
            }
        }

        fn bind_texture(&self, target: u32, name: u32) {
            unsafe { HasContext::bind_texture(&self.context, target, texture(name)) }
        }

        fn tex_image_2d(
            &self,
            target: u32,
            level: i32,
            internal_format: i32,
            width: i32,
            height: i32,
            format: u32,
            ty: u32,
            pixels: Option<&[u8]>,
        ) {
            unsafe {
                HasContext::tex_image_2d(
                    &self.context,
                    target,
                    level,
                    internal_format,
                    width,
                    height,
                    0,
                    format,
                    ty,
                    glow::PixelUnpackData::Slice(pixels),
                )
            }
        }

        fn tex_parameter_i32(&self, target: u32, parameter: u32, value: i32) {
            unsafe { HasContext::tex_parameter_i32(&self.context, target, parameter, value) }
        }

        fn create_renderbuffer(&self) -> GlResult<u32> {
            unsafe { HasContext::create_renderbuffer(&self.context) }
                .map(|r| r.0.get())
                .map_err(|e| GlError::CreateObject(format!("renderbuffer: {e}")))
        }

        fn delete_renderbuffer(&self, name: u32) {
            if let Some(r) = renderbuffer(name) {
                unsafe { HasContext::delete_renderbuffer(&self.context, r) }
            }
        }

        fn bind_renderbuffer(&self, target: u32, name: u32) {
            unsafe { HasContext::bind_renderbuffer(&self.context, target, renderbuffer(name)) }
        }

        fn renderbuffer_storage(&self, target: u32, internal_format: u32, width: i32, height: i32) {
            unsafe {
                HasContext::renderbuffer_storage(
                    &self.context,
                    target,
                    internal_format,
                    width,
                    height,
                )
            }
        }

        fn create_framebuffer(&self) -> GlResult<u32> {
            unsafe { HasContext::create_framebuffer(&self.context) }
                .map(|f| f.0.get())
                .map_err(|e| GlError::CreateObject(format!("framebuffer: {e}")))
        }

        fn delete_framebuffer(&self, name: u32) {
            if let Some(f) = framebuffer(name) {
                unsafe { HasContext::delete_framebuffer(&self.context, f) }
            }
        }

        fn bind_framebuffer(&self, target: u32, name: u32) {
            unsafe { HasContext::bind_framebuffer(&self.context, target, framebuffer(name)) }
        }

        fn framebuffer_renderbuffer(
            &self,
            target: u32,
            attachment: u32,
            renderbuffer_target: u32,
            name: u32,
        ) {
            unsafe {
                HasContext::framebuffer_renderbuffer(
                    &self.context,
                    target,
                    attachment,
                    renderbuffer_target,
                    renderbuffer(name),
                )
            }
        }

        fn framebuffer_texture_2d(
            &self,
            target: u32,
            attachment: u32,
            texture_target: u32,
            name: u32,
            level: i32,
        ) {
            unsafe {
                HasContext::framebuffer_texture_2d(
                    &self.context,
                    target,
                    attachment,
                    texture_target,
                    texture(name),
                    level,
                )
            }
        }

        fn check_framebuffer_status(&self, target: u32) -> u32 {
            unsafe { HasContext::check_framebuffer_status(&self.context, target) }
        }

        fn egl_image_target_texture_2d(&self, target: u32, image: EGLImageKHR) -> GlResult<()> {
            let entry = image_target(self.image_target_texture_2d, "glEGLImageTargetTexture2DOES")?;
            unsafe { entry(target, image) };
            Ok(())
        }

        fn egl_image_target_renderbuffer_storage(
            &self,
            target: u32,
            image: EGLImageKHR,
        ) -> GlResult<()> {
            let entry = image_target(
                self.image_target_renderbuffer_storage,
                "glEGLImageTargetRenderbufferStorageOES",
            )?;
            unsafe { entry(target, image) };
            Ok(())
        }

        fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
            unsafe { HasContext::clear_color(&self.context, red, green, blue, alpha) }
        }

        fn clear_depth(&self, depth: f32) {
            unsafe { HasContext::clear_depth_f32(&self.context, depth) }
        }

        fn clear_stencil(&self, stencil: i32) {
            unsafe { HasContext::clear_stencil(&self.context, stencil) }
        }

        fn clear(&self, mask: u32) {
            unsafe { HasContext::clear(&self.context, mask) }
        }

        fn read_pixels(
            &self,
            x: i32,
            y: i32,
            width: i32,
            height: i32,
            format: u32,
            ty: u32,
            pixels: &mut [u8],
        ) {
            unsafe {
                HasContext::read_pixels(
                    &self.context,
                    x,
                    y,
                    width,
                    height,
                    format,
                    ty,
                    glow::PixelPackData::Slice(Some(pixels)),
                )
            }
        }

        fn get_integer(&self, parameter: u32) -> i32 {
            unsafe { HasContext::get_parameter_i32(&self.context, parameter) }
        }

        fn get_error(&self) -> u32 {
            unsafe { HasContext::get_error(&self.context) }
        }
    }
}
