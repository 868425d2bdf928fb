//! Software GL and EGL used by the integration tests
//!
//! `SoftGl` keeps texture and renderbuffer contents as `ReferenceImage`s and
//! follows GL error semantics closely enough that binding leaks, bad enums
//! and incomplete framebuffers show up the way they would on a driver.
//!
//! `SoftEgl` shares the GL state: an EGL image refers to the storage of its
//! client buffer, and objects bound to the image with the `OES_EGL_image`
//! calls read and write that same storage.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use conformance::{ReferenceImage, TextureFormat, Vec4};
use conformance_glow::egl::{
    EGL_BAD_PARAMETER, EGL_GL_RENDERBUFFER_KHR, EGL_GL_TEXTURE_2D_KHR,
    EGL_GL_TEXTURE_CUBE_MAP_NEGATIVE_Z_KHR, EGL_GL_TEXTURE_CUBE_MAP_POSITIVE_X_KHR, EGL_SUCCESS,
    EGLClientBuffer, EGLContext, EGLDisplay, EGLImageKHR, EGLenum, EGLint, ImageFunctions,
};
use conformance_glow::formats::{map_internal_format, map_transfer_format};
use conformance_glow::{GlFunctions, GlResult, glow};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attachment {
    Texture { target: u32, name: u32 },
    Renderbuffer(u32),
}

#[derive(Debug, Default)]
struct SoftTexture {
    levels: HashMap<u32, ReferenceImage>,
    params: HashMap<u32, i32>,
}

#[derive(Debug, Clone, Copy)]
struct EglImage {
    /// Storage the image was created from, if it named a live object
    source: Option<Attachment>,
    /// Bind siblings to fresh storage instead of the source's
    blank: bool,
}

/// EGL image target and client buffer name to the storage they refer to
fn egl_source(target: EGLenum, name: u32) -> Option<Attachment> {
    match target {
        EGL_GL_TEXTURE_2D_KHR => Some(Attachment::Texture {
            target: glow::TEXTURE_2D,
            name,
        }),
        t if (EGL_GL_TEXTURE_CUBE_MAP_POSITIVE_X_KHR..=EGL_GL_TEXTURE_CUBE_MAP_NEGATIVE_Z_KHR)
            .contains(&t) =>
        {
            let face = t - EGL_GL_TEXTURE_CUBE_MAP_POSITIVE_X_KHR;
            Some(Attachment::Texture {
                target: glow::TEXTURE_CUBE_MAP_POSITIVE_X + face,
                name,
            })
        }
        EGL_GL_RENDERBUFFER_KHR => Some(Attachment::Renderbuffer(name)),
        _ => None,
    }
}

#[derive(Debug, Default)]
struct State {
    next_name: u32,
    textures: BTreeMap<u32, SoftTexture>,
    renderbuffers: BTreeMap<u32, Option<ReferenceImage>>,
    framebuffers: BTreeMap<u32, BTreeMap<u32, Attachment>>,
    /// Live EGL images by handle
    images: BTreeMap<usize, EglImage>,
    /// EGL image siblings and the storage they share
    siblings: HashMap<Attachment, Attachment>,
    texture_2d: u32,
    texture_cube_map: u32,
    renderbuffer: u32,
    framebuffer: u32,
    clear_color: Vec4,
    clear_depth: f32,
    clear_stencil: i32,
    error: u32,
    injected: HashMap<&'static str, u32>,
    calls: Vec<&'static str>,
}

impl State {
    fn record_error(&mut self, code: u32) {
        if self.error == glow::NO_ERROR {
            self.error = code;
        }
    }

    fn alloc_name(&mut self) -> u32 {
        self.next_name += 1;
        self.next_name
    }

    fn bound_texture(&self, image_target: u32) -> Option<u32> {
        let name = match image_target {
            glow::TEXTURE_2D => self.texture_2d,
            t if (glow::TEXTURE_CUBE_MAP_POSITIVE_X..=glow::TEXTURE_CUBE_MAP_NEGATIVE_Z)
                .contains(&t) =>
            {
                self.texture_cube_map
            }
            glow::TEXTURE_CUBE_MAP => self.texture_cube_map,
            _ => return None,
        };
        (name != 0).then_some(name)
    }

    fn resolve(&self, attachment: Attachment) -> Attachment {
        self.siblings.get(&attachment).copied().unwrap_or(attachment)
    }

    fn attachment_image(&self, attachment: Attachment) -> Option<&ReferenceImage> {
        match self.resolve(attachment) {
            Attachment::Texture { target, name } => self.textures.get(&name)?.levels.get(&target),
            Attachment::Renderbuffer(name) => self.renderbuffers.get(&name)?.as_ref(),
        }
    }

    fn attachment_image_mut(&mut self, attachment: Attachment) -> Option<&mut ReferenceImage> {
        match self.resolve(attachment) {
            Attachment::Texture { target, name } => {
                self.textures.get_mut(&name)?.levels.get_mut(&target)
            }
            Attachment::Renderbuffer(name) => self.renderbuffers.get_mut(&name)?.as_mut(),
        }
    }

    /// Make `sibling` share the storage behind `image`
    fn bind_sibling(&mut self, sibling: Attachment, image: EGLImageKHR) {
        let Some(egl_image) = self.images.get(&(image as usize)).copied() else {
            self.record_error(glow::INVALID_VALUE);
            return;
        };
        let source = egl_image
            .source
            .and_then(|source| self.attachment_image(source).map(|image| (source, image)));
        let Some((source, source_image)) = source else {
            self.record_error(glow::INVALID_OPERATION);
            return;
        };
        let blank = egl_image.blank.then(|| {
            ReferenceImage::new(source_image.format(), source_image.width(), source_image.height())
        });

        self.siblings.remove(&sibling);
        match blank {
            Some(storage) => match sibling {
                Attachment::Texture { target, name } => {
                    if let Some(texture) = self.textures.get_mut(&name) {
                        texture.levels.insert(target, storage);
                    }
                }
                Attachment::Renderbuffer(name) => {
                    self.renderbuffers.insert(name, Some(storage));
                }
            },
            None => {
                self.siblings.insert(sibling, source);
            }
        }
    }

    fn framebuffer_status(&self) -> u32 {
        let Some(attachments) = self.framebuffers.get(&self.framebuffer) else {
            return glow::FRAMEBUFFER_UNDEFINED;
        };
        if attachments.is_empty() {
            return glow::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT;
        }
        for (point, attachment) in attachments {
            let Some(image) = self.attachment_image(*attachment) else {
                return glow::FRAMEBUFFER_INCOMPLETE_ATTACHMENT;
            };
            let format = image.format();
            let renderable = match *point {
                glow::COLOR_ATTACHMENT0 => format.is_color(),
                glow::DEPTH_ATTACHMENT => format.is_depth(),
                glow::STENCIL_ATTACHMENT => format.is_stencil(),
                _ => false,
            };
            if !renderable {
                return glow::FRAMEBUFFER_INCOMPLETE_ATTACHMENT;
            }
        }
        glow::FRAMEBUFFER_COMPLETE
    }
}

/// Software GL context
#[derive(Debug, Default)]
pub struct SoftGl {
    state: Rc<RefCell<State>>,
    /// Invert every byte returned by `read_pixels`
    pub corrupt_readback: Cell<bool>,
}

impl SoftGl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next call named `call` raise `code`
    pub fn inject_error(&self, call: &'static str, code: u32) {
        self.state.borrow_mut().injected.insert(call, code);
    }

    fn enter(&self, call: &'static str) -> std::cell::RefMut<'_, State> {
        let mut state = self.state.borrow_mut();
        state.calls.push(call);
        if let Some(code) = state.injected.remove(call) {
            state.record_error(code);
        }
        state
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.state.borrow().calls.clone()
    }

    /// (TEXTURE_2D, TEXTURE_CUBE_MAP, RENDERBUFFER, FRAMEBUFFER) bindings
    pub fn bindings(&self) -> (u32, u32, u32, u32) {
        let state = self.state.borrow();
        (
            state.texture_2d,
            state.texture_cube_map,
            state.renderbuffer,
            state.framebuffer,
        )
    }

    pub fn live_textures(&self) -> usize {
        self.state.borrow().textures.len()
    }

    pub fn live_renderbuffers(&self) -> usize {
        self.state.borrow().renderbuffers.len()
    }

    pub fn live_framebuffers(&self) -> usize {
        self.state.borrow().framebuffers.len()
    }

    pub fn texture_image(&self, name: u32, image_target: u32) -> Option<ReferenceImage> {
        self.state
            .borrow()
            .textures
            .get(&name)?
            .levels
            .get(&image_target)
            .cloned()
    }

    pub fn texture_parameter(&self, name: u32, parameter: u32) -> Option<i32> {
        self.state
            .borrow()
            .textures
            .get(&name)?
            .params
            .get(&parameter)
            .copied()
    }

    pub fn renderbuffer_image(&self, name: u32) -> Option<ReferenceImage> {
        self.state.borrow().renderbuffers.get(&name)?.clone()
    }

    /// Bind directly, without going through `GlFunctions`
    pub fn set_bindings(
        &self,
        texture_2d: u32,
        texture_cube_map: u32,
        renderbuffer: u32,
        framebuffer: u32,
    ) {
        let mut state = self.state.borrow_mut();
        state.texture_2d = texture_2d;
        state.texture_cube_map = texture_cube_map;
        state.renderbuffer = renderbuffer;
        state.framebuffer = framebuffer;
    }
}

impl GlFunctions for SoftGl {
    fn create_texture(&self) -> GlResult<u32> {
        let mut state = self.enter("create_texture");
        let name = state.alloc_name();
        state.textures.insert(name, SoftTexture::default());
        Ok(name)
    }

    fn delete_texture(&self, texture: u32) {
        let mut state = self.enter("delete_texture");
        state.textures.remove(&texture);
        state.siblings.retain(|sibling, _| {
            !matches!(sibling, Attachment::Texture { name, .. } if *name == texture)
        });
        if state.texture_2d == texture {
            state.texture_2d = 0;
        }
        if state.texture_cube_map == texture {
            state.texture_cube_map = 0;
        }
    }

    fn bind_texture(&self, target: u32, texture: u32) {
        let mut state = self.enter("bind_texture");
        if texture != 0 && !state.textures.contains_key(&texture) {
            state.record_error(glow::INVALID_OPERATION);
            return;
        }
        match target {
            glow::TEXTURE_2D => state.texture_2d = texture,
            glow::TEXTURE_CUBE_MAP => state.texture_cube_map = texture,
            _ => state.record_error(glow::INVALID_ENUM),
        }
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
        let mut state = self.enter("tex_image_2d");
        let Some(name) = state.bound_texture(target) else {
            state.record_error(glow::INVALID_OPERATION);
            return;
        };
        if target == glow::TEXTURE_CUBE_MAP || level != 0 || internal_format as u32 != format {
            state.record_error(glow::INVALID_ENUM);
            return;
        }
        let Ok(texture_format) = map_transfer_format(format, ty) else {
            state.record_error(glow::INVALID_ENUM);
            return;
        };
        let (width, height) = (width as u32, height as u32);
        let image = match pixels {
            Some(data) => {
                match ReferenceImage::from_data(texture_format, width, height, data.to_vec()) {
                    Some(image) => image,
                    None => {
                        state.record_error(glow::INVALID_VALUE);
                        return;
                    }
                }
            }
            None => ReferenceImage::new(texture_format, width, height),
        };
        if let Some(texture) = state.textures.get_mut(&name) {
            texture.levels.insert(target, image);
        }
        state.siblings.remove(&Attachment::Texture { target, name });
    }

    fn tex_parameter_i32(&self, target: u32, parameter: u32, value: i32) {
        let mut state = self.enter("tex_parameter_i32");
        let Some(name) = state.bound_texture(target) else {
            state.record_error(glow::INVALID_OPERATION);
            return;
        };
        if let Some(texture) = state.textures.get_mut(&name) {
            texture.params.insert(parameter, value);
        }
    }

    fn create_renderbuffer(&self) -> GlResult<u32> {
        let mut state = self.enter("create_renderbuffer");
        let name = state.alloc_name();
        state.renderbuffers.insert(name, None);
        Ok(name)
    }

    fn delete_renderbuffer(&self, renderbuffer: u32) {
        let mut state = self.enter("delete_renderbuffer");
        state.renderbuffers.remove(&renderbuffer);
        state.siblings.remove(&Attachment::Renderbuffer(renderbuffer));
        if state.renderbuffer == renderbuffer {
            state.renderbuffer = 0;
        }
    }

    fn bind_renderbuffer(&self, target: u32, renderbuffer: u32) {
        let mut state = self.enter("bind_renderbuffer");
        if target != glow::RENDERBUFFER {
            state.record_error(glow::INVALID_ENUM);
        } else if renderbuffer != 0 && !state.renderbuffers.contains_key(&renderbuffer) {
            state.record_error(glow::INVALID_OPERATION);
        } else {
            state.renderbuffer = renderbuffer;
        }
    }

    fn renderbuffer_storage(&self, target: u32, internal_format: u32, width: i32, height: i32) {
        let mut state = self.enter("renderbuffer_storage");
        if target != glow::RENDERBUFFER {
            state.record_error(glow::INVALID_ENUM);
            return;
        }
        let bound = state.renderbuffer;
        if bound == 0 {
            state.record_error(glow::INVALID_OPERATION);
            return;
        }
        let Ok(format) = map_internal_format(internal_format) else {
            state.record_error(glow::INVALID_ENUM);
            return;
        };
        state
            .renderbuffers
            .insert(bound, Some(ReferenceImage::new(format, width as u32, height as u32)));
        state.siblings.remove(&Attachment::Renderbuffer(bound));
    }

    fn create_framebuffer(&self) -> GlResult<u32> {
        let mut state = self.enter("create_framebuffer");
        let name = state.alloc_name();
        state.framebuffers.insert(name, BTreeMap::new());
        Ok(name)
    }

    fn delete_framebuffer(&self, framebuffer: u32) {
        let mut state = self.enter("delete_framebuffer");
        state.framebuffers.remove(&framebuffer);
        if state.framebuffer == framebuffer {
            state.framebuffer = 0;
        }
    }

    fn bind_framebuffer(&self, target: u32, framebuffer: u32) {
        let mut state = self.enter("bind_framebuffer");
        if target != glow::FRAMEBUFFER {
            state.record_error(glow::INVALID_ENUM);
        } else if framebuffer != 0 && !state.framebuffers.contains_key(&framebuffer) {
            state.record_error(glow::INVALID_OPERATION);
        } else {
            state.framebuffer = framebuffer;
        }
    }

    fn framebuffer_renderbuffer(
        &self,
        target: u32,
        attachment: u32,
        renderbuffer_target: u32,
        renderbuffer: u32,
    ) {
        let mut state = self.enter("framebuffer_renderbuffer");
        if target != glow::FRAMEBUFFER || renderbuffer_target != glow::RENDERBUFFER {
            state.record_error(glow::INVALID_ENUM);
            return;
        }
        let bound = state.framebuffer;
        let Some(attachments) = state.framebuffers.get_mut(&bound) else {
            state.record_error(glow::INVALID_OPERATION);
            return;
        };
        if renderbuffer == 0 {
            attachments.remove(&attachment);
        } else {
            attachments.insert(attachment, Attachment::Renderbuffer(renderbuffer));
        }
    }

    fn framebuffer_texture_2d(
        &self,
        target: u32,
        attachment: u32,
        texture_target: u32,
        texture: u32,
        level: i32,
    ) {
        let mut state = self.enter("framebuffer_texture_2d");
        if target != glow::FRAMEBUFFER || level != 0 {
            state.record_error(glow::INVALID_ENUM);
            return;
        }
        let bound = state.framebuffer;
        let Some(attachments) = state.framebuffers.get_mut(&bound) else {
            state.record_error(glow::INVALID_OPERATION);
            return;
        };
        if texture == 0 {
            attachments.remove(&attachment);
        } else {
            attachments.insert(
                attachment,
                Attachment::Texture {
                    target: texture_target,
                    name: texture,
                },
            );
        }
    }

    fn check_framebuffer_status(&self, target: u32) -> u32 {
        let mut state = self.enter("check_framebuffer_status");
        if target != glow::FRAMEBUFFER {
            state.record_error(glow::INVALID_ENUM);
            return 0;
        }
        state.framebuffer_status()
    }

    fn egl_image_target_texture_2d(&self, target: u32, image: EGLImageKHR) -> GlResult<()> {
        let mut state = self.enter("egl_image_target_texture_2d");
        if target != glow::TEXTURE_2D {
            state.record_error(glow::INVALID_ENUM);
            return Ok(());
        }
        match state.bound_texture(target) {
            Some(name) => state.bind_sibling(Attachment::Texture { target, name }, image),
            None => state.record_error(glow::INVALID_OPERATION),
        }
        Ok(())
    }

    fn egl_image_target_renderbuffer_storage(
        &self,
        target: u32,
        image: EGLImageKHR,
    ) -> GlResult<()> {
        let mut state = self.enter("egl_image_target_renderbuffer_storage");
        if target != glow::RENDERBUFFER {
            state.record_error(glow::INVALID_ENUM);
            return Ok(());
        }
        match state.renderbuffer {
            0 => state.record_error(glow::INVALID_OPERATION),
            name => state.bind_sibling(Attachment::Renderbuffer(name), image),
        }
        Ok(())
    }

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.enter("clear_color").clear_color = Vec4::new(red, green, blue, alpha);
    }

    fn clear_depth(&self, depth: f32) {
        self.enter("clear_depth").clear_depth = depth;
    }

    fn clear_stencil(&self, stencil: i32) {
        self.enter("clear_stencil").clear_stencil = stencil;
    }

    fn clear(&self, mask: u32) {
        let mut state = self.enter("clear");
        if state.framebuffer_status() != glow::FRAMEBUFFER_COMPLETE {
            state.record_error(glow::INVALID_FRAMEBUFFER_OPERATION);
            return;
        }
        let attachments = state.framebuffers[&state.framebuffer].clone();
        let (color, depth, stencil) = (state.clear_color, state.clear_depth, state.clear_stencil);
        for (point, attachment) in attachments {
            let Some(image) = state.attachment_image_mut(attachment) else {
                continue;
            };
            match point {
                glow::COLOR_ATTACHMENT0 if mask & glow::COLOR_BUFFER_BIT != 0 => image.clear(color),
                glow::DEPTH_ATTACHMENT if mask & glow::DEPTH_BUFFER_BIT != 0 => {
                    image.clear_depth(depth)
                }
                glow::STENCIL_ATTACHMENT if mask & glow::STENCIL_BUFFER_BIT != 0 => {
                    image.clear_stencil(stencil)
                }
                _ => {}
            }
        }
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
        let mut state = self.enter("read_pixels");
        if format != glow::RGBA || ty != glow::UNSIGNED_BYTE {
            state.record_error(glow::INVALID_OPERATION);
            return;
        }
        if state.framebuffer_status() != glow::FRAMEBUFFER_COMPLETE {
            state.record_error(glow::INVALID_FRAMEBUFFER_OPERATION);
            return;
        }
        if pixels.len() != (width * height * 4) as usize {
            state.record_error(glow::INVALID_VALUE);
            return;
        }
        let attachment = state.framebuffers[&state.framebuffer]
            .get(&glow::COLOR_ATTACHMENT0)
            .copied();
        let source = attachment.and_then(|a| state.attachment_image(a)).cloned();
        let Some(source) = source else {
            state.record_error(glow::INVALID_OPERATION);
            return;
        };

        let mut observed = ReferenceImage::new(TextureFormat::RGBA8, width as u32, height as u32);
        for row in 0..height as u32 {
            for col in 0..width as u32 {
                observed.set_pixel(col, row, source.pixel(x as u32 + col, y as u32 + row));
            }
        }
        pixels.copy_from_slice(observed.data());
        if self.corrupt_readback.get() {
            pixels.iter_mut().for_each(|b| *b = !*b);
        }
    }

    fn get_integer(&self, parameter: u32) -> i32 {
        let mut state = self.enter("get_integer");
        let value = match parameter {
            glow::TEXTURE_BINDING_2D => state.texture_2d,
            glow::TEXTURE_BINDING_CUBE_MAP => state.texture_cube_map,
            glow::RENDERBUFFER_BINDING => state.renderbuffer,
            glow::FRAMEBUFFER_BINDING => state.framebuffer,
            _ => {
                state.record_error(glow::INVALID_ENUM);
                0
            }
        };
        value as i32
    }

    fn get_error(&self) -> u32 {
        let mut state = self.state.borrow_mut();
        std::mem::replace(&mut state.error, glow::NO_ERROR)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateImageCall {
    pub target: EGLenum,
    pub buffer: usize,
    pub attribs: Vec<EGLint>,
}

/// Software `EGL_KHR_image_base` on top of a [`SoftGl`]
#[derive(Debug)]
pub struct SoftEgl {
    extensions: String,
    gl: Rc<RefCell<State>>,
    next_image: Cell<usize>,
    created: RefCell<Vec<CreateImageCall>>,
    error: Cell<EGLint>,
    /// Fail every `create_image` with this error
    pub fail_with: Cell<Option<EGLint>>,
    /// Return a non-null image even when failing
    pub image_on_failure: Cell<bool>,
    /// Create images that do not carry the client buffer's content
    pub blank_images: Cell<bool>,
}

pub const ALL_IMAGE_EXTENSIONS: &str = "EGL_KHR_image_base EGL_KHR_gl_texture_2D_image \
     EGL_KHR_gl_texture_cubemap_image EGL_KHR_gl_renderbuffer_image";

impl SoftEgl {
    pub fn new(gl: &SoftGl, extensions: &str) -> Self {
        Self {
            extensions: extensions.to_string(),
            gl: Rc::clone(&gl.state),
            next_image: Cell::new(0x1000),
            created: RefCell::new(Vec::new()),
            error: Cell::new(EGL_SUCCESS),
            fail_with: Cell::new(None),
            image_on_failure: Cell::new(false),
            blank_images: Cell::new(false),
        }
    }

    pub fn with_all_extensions(gl: &SoftGl) -> Self {
        Self::new(gl, ALL_IMAGE_EXTENSIONS)
    }

    pub fn live_images(&self) -> usize {
        self.gl.borrow().images.len()
    }

    pub fn created(&self) -> Vec<CreateImageCall> {
        self.created.borrow().clone()
    }

    fn new_image(&self, source: Option<Attachment>) -> EGLImageKHR {
        let id = self.next_image.get();
        self.next_image.set(id + 1);
        let image = EglImage {
            source,
            blank: self.blank_images.get(),
        };
        self.gl.borrow_mut().images.insert(id, image);
        std::ptr::without_provenance_mut(id)
    }
}

impl ImageFunctions for SoftEgl {
    fn create_image(
        &self,
        _display: EGLDisplay,
        _context: EGLContext,
        target: EGLenum,
        buffer: EGLClientBuffer,
        attribs: &[EGLint],
    ) -> EGLImageKHR {
        self.created.borrow_mut().push(CreateImageCall {
            target,
            buffer: buffer as usize,
            attribs: attribs.to_vec(),
        });
        let source = egl_source(target, buffer as usize as u32);
        if let Some(code) = self.fail_with.get() {
            self.error.set(code);
            return if self.image_on_failure.get() {
                self.new_image(source)
            } else {
                std::ptr::null_mut()
            };
        }
        let exists = source.is_some_and(|s| self.gl.borrow().attachment_image(s).is_some());
        if !exists {
            self.error.set(EGL_BAD_PARAMETER);
            return std::ptr::null_mut();
        }
        self.new_image(source)
    }

    fn destroy_image(&self, _display: EGLDisplay, image: EGLImageKHR) -> bool {
        if self.gl.borrow_mut().images.remove(&(image as usize)).is_some() {
            true
        } else {
            self.error.set(EGL_BAD_PARAMETER);
            false
        }
    }

    fn get_error(&self) -> EGLint {
        self.error.replace(EGL_SUCCESS)
    }

    fn query_extensions(&self, _display: EGLDisplay) -> String {
        self.extensions.clone()
    }
}

pub fn no_display() -> EGLDisplay {
    std::ptr::null_mut()
}

pub fn no_context() -> EGLContext {
    std::ptr::null_mut()
}
