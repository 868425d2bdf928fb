//! Owned GL object names

use crate::{GlFunctions, GlResult};

macro_rules! gl_object {
    ($(#[$meta:meta])* $name:ident, $kind:literal, $create:ident, $delete:ident) => {
        $(#[$meta])*
        pub struct $name<'gl, G: GlFunctions + ?Sized> {
            gl: &'gl G,
            name: u32,
        }

        impl<'gl, G: GlFunctions + ?Sized> $name<'gl, G> {
            pub fn new(gl: &'gl G) -> GlResult<Self> {
                let name = gl.$create()?;
                log::debug!(concat!("Created ", $kind, " {}"), name);
                Ok(Self { gl, name })
            }

            pub fn name(&self) -> u32 {
                self.name
            }

            pub fn gl(&self) -> &'gl G {
                self.gl
            }
        }

        impl<G: GlFunctions + ?Sized> Drop for $name<'_, G> {
            fn drop(&mut self) {
                log::debug!(concat!("Deleting ", $kind, " {}"), self.name);
                self.gl.$delete(self.name);
            }
        }

        impl<G: GlFunctions + ?Sized> std::fmt::Debug for $name<'_, G> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.name).finish()
            }
        }
    };
}

gl_object!(
    /// Texture name deleted on drop
    Texture, "texture", create_texture, delete_texture
);
gl_object!(
    /// Renderbuffer name deleted on drop
    Renderbuffer, "renderbuffer", create_renderbuffer, delete_renderbuffer
);
gl_object!(
    /// Framebuffer name deleted on drop
    Framebuffer, "framebuffer", create_framebuffer, delete_framebuffer
);
