//! Harness configuration

use std::path::PathBuf;

/// Environment variable naming the directory for failure images
pub const DUMP_DIR_ENV: &str = "CONFORMANCE_DUMP_DIR";

/// Options shared by every test case in a run
#[derive(Debug, Clone, Default)]
pub struct HarnessConfig {
    /// When set, failing image comparisons write both images here as PNG.
    pub dump_dir: Option<PathBuf>,
    /// Log passing cases at info level instead of debug.
    pub log_passes: bool,
}

impl HarnessConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration with `dump_dir` taken from `CONFORMANCE_DUMP_DIR`
    pub fn from_env() -> Self {
        let dump_dir = std::env::var_os(DUMP_DIR_ENV)
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);
        Self {
            dump_dir,
            ..Self::default()
        }
    }

    pub fn with_dump_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dump_dir = Some(dir.into());
        self
    }

    pub fn with_log_passes(mut self, log_passes: bool) -> Self {
        self.log_passes = log_passes;
        self
    }
}
