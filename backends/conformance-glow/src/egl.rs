//! EGL image-import entry points
//!
//! Only the handful of EGL types and enums the fixtures need are declared
//! here. The platform layer provides an [`ImageFunctions`] implementation
//! backed by its loaded `eglCreateImageKHR`/`eglDestroyImageKHR` pointers.

use std::collections::BTreeMap;
use std::ffi::c_void;

pub type EGLDisplay = *mut c_void;
pub type EGLContext = *mut c_void;
pub type EGLConfig = *mut c_void;
pub type EGLSurface = *mut c_void;
pub type EGLClientBuffer = *mut c_void;
pub type EGLImageKHR = *mut c_void;
pub type EGLenum = u32;
pub type EGLint = i32;

pub const EGL_NO_IMAGE_KHR: EGLImageKHR = std::ptr::null_mut();
pub const EGL_NO_SURFACE: EGLSurface = std::ptr::null_mut();

pub const EGL_SUCCESS: EGLint = 0x3000;
pub const EGL_NOT_INITIALIZED: EGLint = 0x3001;
pub const EGL_BAD_ACCESS: EGLint = 0x3002;
pub const EGL_BAD_ALLOC: EGLint = 0x3003;
pub const EGL_BAD_ATTRIBUTE: EGLint = 0x3004;
pub const EGL_BAD_CONFIG: EGLint = 0x3005;
pub const EGL_BAD_CONTEXT: EGLint = 0x3006;
pub const EGL_BAD_CURRENT_SURFACE: EGLint = 0x3007;
pub const EGL_BAD_DISPLAY: EGLint = 0x3008;
pub const EGL_BAD_MATCH: EGLint = 0x3009;
pub const EGL_BAD_NATIVE_PIXMAP: EGLint = 0x300A;
pub const EGL_BAD_NATIVE_WINDOW: EGLint = 0x300B;
pub const EGL_BAD_PARAMETER: EGLint = 0x300C;
pub const EGL_BAD_SURFACE: EGLint = 0x300D;

pub const EGL_NONE: EGLint = 0x3038;
pub const EGL_SURFACE_TYPE: EGLint = 0x3033;
pub const EGL_HEIGHT: EGLint = 0x3056;
pub const EGL_WIDTH: EGLint = 0x3057;

pub const EGL_PBUFFER_BIT: EGLint = 0x0001;
pub const EGL_PIXMAP_BIT: EGLint = 0x0002;
pub const EGL_WINDOW_BIT: EGLint = 0x0004;

pub const EGL_GL_TEXTURE_2D_KHR: EGLenum = 0x30B1;
pub const EGL_GL_TEXTURE_CUBE_MAP_POSITIVE_X_KHR: EGLenum = 0x30B3;
pub const EGL_GL_TEXTURE_CUBE_MAP_NEGATIVE_X_KHR: EGLenum = 0x30B4;
pub const EGL_GL_TEXTURE_CUBE_MAP_POSITIVE_Y_KHR: EGLenum = 0x30B5;
pub const EGL_GL_TEXTURE_CUBE_MAP_NEGATIVE_Y_KHR: EGLenum = 0x30B6;
pub const EGL_GL_TEXTURE_CUBE_MAP_POSITIVE_Z_KHR: EGLenum = 0x30B7;
pub const EGL_GL_TEXTURE_CUBE_MAP_NEGATIVE_Z_KHR: EGLenum = 0x30B8;
pub const EGL_GL_RENDERBUFFER_KHR: EGLenum = 0x30B9;
pub const EGL_GL_TEXTURE_LEVEL_KHR: EGLint = 0x30BC;

/// `EGL_KHR_image_base` entry points plus the queries the fixtures need
pub trait ImageFunctions {
    /// `eglCreateImageKHR`; `attribs` is `EGL_NONE` terminated
    fn create_image(
        &self,
        display: EGLDisplay,
        context: EGLContext,
        target: EGLenum,
        buffer: EGLClientBuffer,
        attribs: &[EGLint],
    ) -> EGLImageKHR;

    /// `eglDestroyImageKHR`
    fn destroy_image(&self, display: EGLDisplay, image: EGLImageKHR) -> bool;

    /// `eglGetError`
    fn get_error(&self) -> EGLint;

    /// `eglQueryString(display, EGL_EXTENSIONS)`
    fn query_extensions(&self, display: EGLDisplay) -> String;

    fn has_extension(&self, display: EGLDisplay, name: &str) -> bool {
        self.query_extensions(display)
            .split_whitespace()
            .any(|ext| ext == name)
    }
}

/// Ordered key/value attributes for `eglCreateImageKHR`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttribMap(BTreeMap<EGLint, EGLint>);

impl AttribMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: EGLint, value: EGLint) -> Option<EGLint> {
        self.0.insert(key, value)
    }

    pub fn get(&self, key: EGLint) -> Option<EGLint> {
        self.0.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Flatten into `key, value, ..., EGL_NONE`
    pub fn to_vec(&self) -> Vec<EGLint> {
        let mut attribs = Vec::with_capacity(self.0.len() * 2 + 1);
        for (key, value) in &self.0 {
            attribs.push(*key);
            attribs.push(*value);
        }
        attribs.push(EGL_NONE);
        attribs
    }
}

impl FromIterator<(EGLint, EGLint)> for AttribMap {
    fn from_iter<I: IntoIterator<Item = (EGLint, EGLint)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

pub fn error_name(code: EGLint) -> String {
    let name = match code {
        EGL_SUCCESS => "EGL_SUCCESS",
        EGL_NOT_INITIALIZED => "EGL_NOT_INITIALIZED",
        EGL_BAD_ACCESS => "EGL_BAD_ACCESS",
        EGL_BAD_ALLOC => "EGL_BAD_ALLOC",
        EGL_BAD_ATTRIBUTE => "EGL_BAD_ATTRIBUTE",
        EGL_BAD_CONFIG => "EGL_BAD_CONFIG",
        EGL_BAD_CONTEXT => "EGL_BAD_CONTEXT",
        EGL_BAD_CURRENT_SURFACE => "EGL_BAD_CURRENT_SURFACE",
        EGL_BAD_DISPLAY => "EGL_BAD_DISPLAY",
        EGL_BAD_MATCH => "EGL_BAD_MATCH",
        EGL_BAD_NATIVE_PIXMAP => "EGL_BAD_NATIVE_PIXMAP",
        EGL_BAD_NATIVE_WINDOW => "EGL_BAD_NATIVE_WINDOW",
        EGL_BAD_PARAMETER => "EGL_BAD_PARAMETER",
        EGL_BAD_SURFACE => "EGL_BAD_SURFACE",
        other => return format!("{other:#06x}"),
    };
    name.to_string()
}
