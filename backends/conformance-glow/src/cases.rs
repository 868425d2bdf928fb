//! Image-source conformance cases
//!
//! Every case drives one [`ImageSource`] end to end: extension check, buffer
//! creation with a reference image, import, readback and comparison.

use conformance::compare::dump_images;
use conformance::{
    CompareReport, ComparePolicy, ConformanceError, ConformanceResult, HarnessConfig,
    ReferenceImage, TestCase, TestCaseGroup, compare,
};

use crate::egl::{EGLContext, EGLDisplay, ImageFunctions};
use crate::readback::ImageReadback;
use crate::{CubeFace, GlFunctions, ImageSource, SharedImage};

/// Everything a case needs from the current context
pub struct ImageTestEnv<'a, G: GlFunctions + ?Sized> {
    pub gl: &'a G,
    pub egl: &'a dyn ImageFunctions,
    pub display: EGLDisplay,
    pub context: EGLContext,
    pub readback: &'a dyn ImageReadback<G>,
    pub config: HarnessConfig,
}

/// Run one image source through creation, import, readback and comparison
pub fn verify_image_source<G: GlFunctions + ?Sized>(
    env: &ImageTestEnv<'_, G>,
    source: &ImageSource,
) -> ConformanceResult<CompareReport> {
    let extension = source.required_extension();
    if !env.egl.has_extension(env.display, extension) {
        return Err(ConformanceError::not_supported(format!(
            "{extension} is required for {source}"
        )));
    }

    let mut reference = ReferenceImage::default();
    let buffer = source.create_buffer(env.gl, Some(&mut reference))?;
    let image = SharedImage::import(source, env.egl, env.display, env.context, buffer)?;
    let observed = env.readback.read(env.gl, &image)?;

    let policy = ComparePolicy::for_formats(reference.format(), observed.format());
    let report = compare(&reference, &observed, policy)?;
    if report.passed() {
        return Ok(report);
    }

    if let Some(dir) = &env.config.dump_dir {
        // A failed dump must not hide the mismatch itself
        if let Err(err) = dump_images(dir, &source.name(), &reference, &observed) {
            log::warn!("Could not write images for {source}: {err}");
        }
    }
    Err(ConformanceError::mismatch(source.to_string(), report.summary()))
}

/// A registered case for one image source
pub struct ImageSourceCase<'a, G: GlFunctions + ?Sized> {
    name: String,
    description: String,
    source: ImageSource,
    env: &'a ImageTestEnv<'a, G>,
}

impl<'a, G: GlFunctions + ?Sized> ImageSourceCase<'a, G> {
    pub fn new(env: &'a ImageTestEnv<'a, G>, source: ImageSource) -> Self {
        Self {
            name: source.name(),
            description: format!("Import {source} as an EGL image and compare its content"),
            source,
            env,
        }
    }

    pub fn source(&self) -> &ImageSource {
        &self.source
    }
}

impl<G: GlFunctions + ?Sized> TestCase for ImageSourceCase<'_, G> {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn iterate(&mut self) -> ConformanceResult<()> {
        let report = verify_image_source(self.env, &self.source)?;
        log::debug!("{}: {}", self.name, report.summary());
        Ok(())
    }
}

const TEXTURE_FORMATS: [(u32, u32); 5] = [
    (glow::RGBA, glow::UNSIGNED_BYTE),
    (glow::RGB, glow::UNSIGNED_BYTE),
    (glow::RGBA, glow::UNSIGNED_SHORT_4_4_4_4),
    (glow::RGBA, glow::UNSIGNED_SHORT_5_5_5_1),
    (glow::RGB, glow::UNSIGNED_SHORT_5_6_5),
];

const CUBE_MAP_FORMATS: [(u32, u32); 2] = [
    (glow::RGBA, glow::UNSIGNED_BYTE),
    (glow::RGB, glow::UNSIGNED_BYTE),
];

const RENDERBUFFER_FORMATS: [u32; 5] = [
    glow::RGBA4,
    glow::RGB5_A1,
    glow::RGB565,
    glow::DEPTH_COMPONENT16,
    glow::STENCIL_INDEX8,
];

/// Every image source the group covers, in registration order
pub fn image_sources() -> Vec<ImageSource> {
    let textures = TEXTURE_FORMATS
        .iter()
        .map(|&(format, ty)| ImageSource::texture_2d(format, ty, false));
    let cube_faces = CubeFace::ALL.iter().flat_map(|&face| {
        CUBE_MAP_FORMATS
            .iter()
            .map(move |&(format, ty)| ImageSource::cube_map_face(face, format, ty, false))
    });
    let renderbuffers = RENDERBUFFER_FORMATS
        .iter()
        .map(|&format| ImageSource::renderbuffer(format));

    textures.chain(cube_faces).chain(renderbuffers).collect()
}

/// Build the `image_source` group with one case per image source
pub fn create_image_source_group<'a, G: GlFunctions + ?Sized>(
    env: &'a ImageTestEnv<'a, G>,
) -> TestCaseGroup<'a> {
    let mut group = TestCaseGroup::new("image_source", "EGLImage sources from GL objects");
    for source in image_sources() {
        group.add_case(ImageSourceCase::new(env, source));
    }
    group
}
