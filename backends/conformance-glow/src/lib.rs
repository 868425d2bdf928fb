//! GL/EGL fixtures for the graphics conformance suite
//!
//! This crate produces GL client buffers (2D textures, cube map faces and
//! renderbuffers) together with CPU reference images, imports them as EGL
//! images and checks that the imported content matches the reference.
//!
//! # Features
//!
//! - **Image sources**: [`ImageSource`] creates one client buffer and fills
//!   it with a deterministic pattern or clear value.
//! - **Shared ownership**: [`SharedImage`] owns the EGL image and shares the
//!   [`ClientBuffer`] behind it.
//! - **Binding discipline**: every bind goes through [`ScopedBinding`], which
//!   restores the previous binding on every exit path.
//! - **Cases**: [`create_image_source_group`] registers one case per source.
//!
//! GL access goes through [`GlFunctions`], implemented by [`NativeGl`] for a
//! `glow::Context` plus the `GL_OES_EGL_image` entry points. EGL access goes
//! through [`egl::ImageFunctions`], supplied by the platform.
//!
//! # Example
//!
//! ```rust,no_run
//! use conformance_glow::{ImageSource, NativeGl, glow};
//! use conformance::ReferenceImage;
//!
//! # fn run(gl: &NativeGl) -> conformance_glow::GlResult<()> {
//! let source = ImageSource::texture_2d(glow::RGBA, glow::UNSIGNED_BYTE, false);
//! let mut reference = ReferenceImage::default();
//! let buffer = source.create_buffer(gl, Some(&mut reference))?;
//! assert_eq!(reference.width(), buffer.width());
//! # Ok(())
//! # }
//! ```

// Re-export glow so callers use the same version.
pub use glow;

mod binding;
mod cases;
mod client_buffer;
pub mod egl;
mod error;
pub mod formats;
mod functions;
mod objects;
mod readback;
mod source;
pub mod surface;

pub use binding::*;
pub use cases::*;
pub use client_buffer::*;
pub use error::*;
pub use functions::*;
pub use objects::*;
pub use readback::*;
pub use source::*;
