//! Mustpass run parameters for the OpenGL ES 3.x conformance package
//!
//! Each row selects one parameterized run: the context API, which case list
//! to run, the seed and the default surface size. The first-config table adds
//! the framebuffer-config rows that only need to pass on the first EGL config.

use crate::ApiType;

/// Directory that holds the case lists, relative to the data root
pub const MUSTPASS_DIR: &str = "gl_cts/data/mustpass/gles/khronos_mustpass/3.2.2.x/";

/// Screen rotation used when a run does not ask for one
pub const ROTATION_UNSPECIFIED: &str = "unspecified";

/// Surface dimension meaning "use the platform default"
pub const SURFACE_SIZE_UNSPECIFIED: i32 = -1;

/// One parameterized run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RunParams {
    pub api: ApiType,
    /// Name of the case list, e.g. `khr-master`
    pub config_name: &'static str,
    /// EGL config name; `None` runs on every config
    pub gl_config_name: Option<&'static str>,
    pub screen_rotation: &'static str,
    pub base_seed: i32,
    /// Framebuffer config such as `rgba8888d24s8`
    pub fbo_config: Option<&'static str>,
    pub surface_width: i32,
    pub surface_height: i32,
}

impl RunParams {
    const fn new(
        api: ApiType,
        config_name: &'static str,
        base_seed: i32,
        fbo_config: Option<&'static str>,
        surface_width: i32,
        surface_height: i32,
    ) -> Self {
        Self {
            api,
            config_name,
            gl_config_name: None,
            screen_rotation: ROTATION_UNSPECIFIED,
            base_seed,
            fbo_config,
            surface_width,
            surface_height,
        }
    }

    /// Surface width, or `None` when the platform default applies
    pub fn width(&self) -> Option<u32> {
        u32::try_from(self.surface_width).ok()
    }

    /// Surface height, or `None` when the platform default applies
    pub fn height(&self) -> Option<u32> {
        u32::try_from(self.surface_height).ok()
    }

    /// Path of the case list file for this run inside [`MUSTPASS_DIR`]
    pub fn case_list_path(&self) -> String {
        format!(
            "{MUSTPASS_DIR}gles{}{}-{}.txt",
            self.api.major,
            if self.api.major >= 3 {
                self.api.minor.to_string()
            } else {
                String::new()
            },
            self.config_name
        )
    }
}

const FBO: Option<&str> = Some("rgba8888d24s8");
const UNSET: i32 = SURFACE_SIZE_UNSPECIFIED;

/// Runs that must pass on the first EGL config
pub const ES3X_FIRST_CFG: &[RunParams] = &[
    RunParams::new(ApiType::es(2, 0), "khr-master", 1, None, 64, 64),
    RunParams::new(ApiType::es(2, 0), "deqp-master", 1, None, 64, 64),
    RunParams::new(ApiType::es(2, 0), "gtf-master", 1, None, 64, 64),
    RunParams::new(ApiType::es(2, 0), "gtf-master", 2, None, 113, 47),
    RunParams::new(ApiType::es(2, 0), "gtf-master", 3, FBO, 64, UNSET),
    RunParams::new(ApiType::es(2, 0), "gtf-master", 3, FBO, UNSET, 64),
    RunParams::new(ApiType::es(2, 0), "gtf-egl", 1, None, 64, 64),
    RunParams::new(ApiType::es(2, 0), "gtf-egl", 2, None, 113, 47),
    RunParams::new(ApiType::es(3, 0), "khr-master", 1, None, 64, 64),
    RunParams::new(ApiType::es(3, 0), "deqp-master", 1, None, 64, 64),
    RunParams::new(ApiType::es(3, 0), "gtf-master", 1, None, 64, 64),
    RunParams::new(ApiType::es(3, 0), "gtf-master", 2, None, 113, 47),
    RunParams::new(ApiType::es(3, 0), "gtf-master", 3, FBO, 64, UNSET),
    RunParams::new(ApiType::es(3, 0), "gtf-master", 3, FBO, UNSET, 64),
    RunParams::new(ApiType::es(3, 1), "khr-master", 1, None, 64, 64),
    RunParams::new(ApiType::es(3, 1), "deqp-master", 1, None, 64, 64),
    RunParams::new(ApiType::es(3, 1), "gtf-master", 1, None, 64, 64),
    RunParams::new(ApiType::es(3, 1), "gtf-master", 2, None, 113, 47),
    RunParams::new(ApiType::es(3, 1), "gtf-master", 3, FBO, 64, UNSET),
    RunParams::new(ApiType::es(3, 1), "gtf-master", 3, FBO, UNSET, 64),
    RunParams::new(ApiType::es(3, 2), "khr-master", 1, None, 64, 64),
    RunParams::new(ApiType::es(3, 2), "khr-master", 2, None, 113, 47),
    RunParams::new(ApiType::es(3, 2), "khr-master", 3, FBO, 64, UNSET),
    RunParams::new(ApiType::es(3, 2), "khr-master", 3, FBO, UNSET, 64),
];

/// Runs that must pass on every other EGL config
pub const ES3X_OTHER_CFG: &[RunParams] = &[
    RunParams::new(ApiType::es(2, 0), "khr-master", 1, None, 64, 64),
    RunParams::new(ApiType::es(2, 0), "deqp-master", 1, None, 64, 64),
    RunParams::new(ApiType::es(2, 0), "gtf-master", 1, None, 64, 64),
    RunParams::new(ApiType::es(2, 0), "gtf-master", 2, None, 113, 47),
    RunParams::new(ApiType::es(3, 0), "khr-master", 1, None, 64, 64),
    RunParams::new(ApiType::es(3, 0), "deqp-master", 1, None, 64, 64),
    RunParams::new(ApiType::es(3, 0), "gtf-master", 1, None, 64, 64),
    RunParams::new(ApiType::es(3, 0), "gtf-master", 2, None, 113, 47),
    RunParams::new(ApiType::es(3, 1), "khr-master", 1, None, 64, 64),
    RunParams::new(ApiType::es(3, 1), "deqp-master", 1, None, 64, 64),
    RunParams::new(ApiType::es(3, 1), "gtf-master", 1, None, 64, 64),
    RunParams::new(ApiType::es(3, 1), "gtf-master", 2, None, 113, 47),
    RunParams::new(ApiType::es(3, 2), "khr-master", 1, None, 64, 64),
    RunParams::new(ApiType::es(3, 2), "khr-master", 2, None, 113, 47),
];

/// Rows of `table` that a context of type `context` can run
pub fn runs_for(
    table: &'static [RunParams],
    context: ApiType,
) -> impl Iterator<Item = &'static RunParams> {
    table.iter().filter(move |params| context.supports(params.api))
}
