//! Scoped object bindings
//!
//! Binding state is context-wide, and cases run back to back on the same
//! context. Every bind in the fixtures goes through a [`ScopedBinding`], which
//! records the object that was bound before and rebinds it when dropped, on
//! the error path included.

use crate::{GlError, GlFunctions, GlResult, check_error};

/// A GL binding point that a [`ScopedBinding`] can save and restore
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingPoint {
    /// A texture target such as `TEXTURE_2D` or `TEXTURE_CUBE_MAP`
    Texture(u32),
    Renderbuffer,
    Framebuffer,
}

impl BindingPoint {
    /// The `glGetIntegerv` query that reports the object bound here
    pub fn binding_query(self) -> GlResult<u32> {
        match self {
            BindingPoint::Texture(glow::TEXTURE_2D) => Ok(glow::TEXTURE_BINDING_2D),
            BindingPoint::Texture(glow::TEXTURE_CUBE_MAP) => Ok(glow::TEXTURE_BINDING_CUBE_MAP),
            BindingPoint::Texture(glow::TEXTURE_2D_ARRAY) => Ok(glow::TEXTURE_BINDING_2D_ARRAY),
            BindingPoint::Texture(glow::TEXTURE_3D) => Ok(glow::TEXTURE_BINDING_3D),
            BindingPoint::Texture(target) => Err(GlError::Unsupported(format!(
                "scoped binding for texture target {target:#06x}"
            ))),
            BindingPoint::Renderbuffer => Ok(glow::RENDERBUFFER_BINDING),
            BindingPoint::Framebuffer => Ok(glow::FRAMEBUFFER_BINDING),
        }
    }

    fn bind<G: GlFunctions + ?Sized>(self, gl: &G, name: u32) {
        match self {
            BindingPoint::Texture(target) => gl.bind_texture(target, name),
            BindingPoint::Renderbuffer => gl.bind_renderbuffer(glow::RENDERBUFFER, name),
            BindingPoint::Framebuffer => gl.bind_framebuffer(glow::FRAMEBUFFER, name),
        }
    }

    fn call_name(self) -> &'static str {
        match self {
            BindingPoint::Texture(_) => "bind_texture",
            BindingPoint::Renderbuffer => "bind_renderbuffer",
            BindingPoint::Framebuffer => "bind_framebuffer",
        }
    }
}

/// Keeps an object bound until dropped, then restores the previous binding
#[must_use = "the previous binding is restored as soon as the guard is dropped"]
pub struct ScopedBinding<'gl, G: GlFunctions + ?Sized> {
    gl: &'gl G,
    point: BindingPoint,
    name: u32,
    previous: u32,
}

impl<'gl, G: GlFunctions + ?Sized> ScopedBinding<'gl, G> {
    pub fn texture(gl: &'gl G, target: u32, texture: u32) -> GlResult<Self> {
        Self::new(gl, BindingPoint::Texture(target), texture)
    }

    pub fn renderbuffer(gl: &'gl G, renderbuffer: u32) -> GlResult<Self> {
        Self::new(gl, BindingPoint::Renderbuffer, renderbuffer)
    }

    pub fn framebuffer(gl: &'gl G, framebuffer: u32) -> GlResult<Self> {
        Self::new(gl, BindingPoint::Framebuffer, framebuffer)
    }

    /// Bind `name` at `point`, remembering what was bound before
    pub fn new(gl: &'gl G, point: BindingPoint, name: u32) -> GlResult<Self> {
        let previous = gl.get_integer(point.binding_query()?) as u32;
        point.bind(gl, name);
        // Constructed before checking so a failed bind is still undone.
        let guard = Self {
            gl,
            point,
            name,
            previous,
        };
        check_error(gl, point.call_name())?;
        Ok(guard)
    }

    pub fn point(&self) -> BindingPoint {
        self.point
    }

    pub fn name(&self) -> u32 {
        self.name
    }

    /// Object that will be rebound on drop
    pub fn previous(&self) -> u32 {
        self.previous
    }

    /// Restore the previous binding now
    pub fn end(self) {}
}

impl<G: GlFunctions + ?Sized> Drop for ScopedBinding<'_, G> {
    fn drop(&mut self) {
        self.point.bind(self.gl, self.previous);
    }
}

impl<G: GlFunctions + ?Sized> std::fmt::Debug for ScopedBinding<'_, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedBinding")
            .field("point", &self.point)
            .field("name", &self.name)
            .field("previous", &self.previous)
            .finish()
    }
}
