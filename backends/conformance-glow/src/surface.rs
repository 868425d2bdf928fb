//! Render surfaces for image cases
//!
//! Native window and pixmap acquisition belongs to the platform layer, which
//! plugs in through [`NativePlatform`]. This module only decides which kind
//! of surface a config supports and keeps the native object alive for as
//! long as its EGL surface.

use std::any::Any;

use crate::egl::{
    EGL_HEIGHT, EGL_NONE, EGL_PBUFFER_BIT, EGL_PIXMAP_BIT, EGL_WIDTH, EGL_WINDOW_BIT, EGLConfig,
    EGLDisplay, EGLSurface, EGLint,
};
use crate::{GlError, GlResult};

/// EGL surface creation as provided by a windowing platform
pub trait NativePlatform {
    /// `EGL_SURFACE_TYPE` of `config`
    fn surface_type_bits(&self, display: EGLDisplay, config: EGLConfig) -> EGLint;

    /// `eglCreatePbufferSurface`; `attribs` is `EGL_NONE` terminated
    fn create_pbuffer_surface(
        &self,
        display: EGLDisplay,
        config: EGLConfig,
        attribs: &[EGLint],
    ) -> GlResult<EGLSurface>;

    /// Create a native window and a window surface on it
    fn create_window_surface(
        &self,
        display: EGLDisplay,
        config: EGLConfig,
        width: u32,
        height: u32,
    ) -> GlResult<(EGLSurface, Box<dyn Any>)>;

    /// Create a native pixmap and a pixmap surface on it
    fn create_pixmap_surface(
        &self,
        display: EGLDisplay,
        config: EGLConfig,
        width: u32,
        height: u32,
    ) -> GlResult<(EGLSurface, Box<dyn Any>)>;

    /// `eglDestroySurface`
    fn destroy_surface(&self, display: EGLDisplay, surface: EGLSurface) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    Pbuffer,
    Window,
    Pixmap,
}

impl SurfaceKind {
    /// Preferred surface kind for `EGL_SURFACE_TYPE` bits: pbuffer, then window, then pixmap
    pub fn select(surface_type_bits: EGLint) -> Option<Self> {
        if surface_type_bits & EGL_PBUFFER_BIT != 0 {
            Some(SurfaceKind::Pbuffer)
        } else if surface_type_bits & EGL_WINDOW_BIT != 0 {
            Some(SurfaceKind::Window)
        } else if surface_type_bits & EGL_PIXMAP_BIT != 0 {
            Some(SurfaceKind::Pixmap)
        } else {
            None
        }
    }
}

/// An EGL surface plus the native window or pixmap it renders to
///
/// The surface is destroyed before the native object is released.
pub struct ManagedSurface<'p> {
    platform: &'p dyn NativePlatform,
    display: EGLDisplay,
    surface: EGLSurface,
    kind: SurfaceKind,
    native: Option<Box<dyn Any>>,
}

impl ManagedSurface<'_> {
    pub fn surface(&self) -> EGLSurface {
        self.surface
    }

    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }

    /// The native window or pixmap; `None` for pbuffers
    pub fn native(&self) -> Option<&dyn Any> {
        self.native.as_deref()
    }
}

impl Drop for ManagedSurface<'_> {
    fn drop(&mut self) {
        log::debug!("Destroying {:?} surface {:?}", self.kind, self.surface);
        if !self.platform.destroy_surface(self.display, self.surface) {
            log::warn!("eglDestroySurface failed for {:?}", self.surface);
        }
        // Native object goes after the surface
        self.native.take();
    }
}

impl std::fmt::Debug for ManagedSurface<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagedSurface")
            .field("surface", &self.surface)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Create a `width` x `height` surface of the best kind `config` supports
pub fn create_surface<'p>(
    platform: &'p dyn NativePlatform,
    display: EGLDisplay,
    config: EGLConfig,
    width: u32,
    height: u32,
) -> GlResult<ManagedSurface<'p>> {
    let bits = platform.surface_type_bits(display, config);
    let kind = SurfaceKind::select(bits).ok_or_else(|| {
        GlError::Unsupported(format!(
            "no valid surface types supported in config (EGL_SURFACE_TYPE {bits:#x})"
        ))
    })?;

    let (surface, native) = match kind {
        SurfaceKind::Pbuffer => {
            let attribs = [EGL_WIDTH, width as EGLint, EGL_HEIGHT, height as EGLint, EGL_NONE];
            (platform.create_pbuffer_surface(display, config, &attribs)?, None)
        }
        SurfaceKind::Window => {
            let (surface, window) = platform.create_window_surface(display, config, width, height)?;
            (surface, Some(window))
        }
        SurfaceKind::Pixmap => {
            let (surface, pixmap) = platform.create_pixmap_surface(display, config, width, height)?;
            (surface, Some(pixmap))
        }
    };

    log::debug!("Created {kind:?} surface {surface:?} ({width}x{height})");
    Ok(ManagedSurface {
        platform,
        display,
        surface,
        kind,
        native,
    })
}
