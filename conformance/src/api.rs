//! Graphics API type and version detection

/// API family of a context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Profile {
    /// OpenGL ES
    Es,
    /// Desktop OpenGL core profile
    Core,
    /// Desktop OpenGL compatibility profile
    Compatibility,
}

/// API family plus version, e.g. OpenGL ES 3.2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ApiType {
    pub major: u32,
    pub minor: u32,
    pub profile: Profile,
}

impl ApiType {
    pub const fn es(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            profile: Profile::Es,
        }
    }

    pub const fn core(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            profile: Profile::Core,
        }
    }

    pub const fn compatibility(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            profile: Profile::Compatibility,
        }
    }

    /// Parse a `GL_VERSION` string
    ///
    /// Examples:
    /// - `"4.6.0 NVIDIA 460.89"` is desktop GL 4.6
    /// - `"OpenGL ES 3.2 Mesa 23.0"` is ES 3.2
    /// - `"WebGL 2.0 (OpenGL ES 3.0 Chromium)"` is ES 3.0
    pub fn parse(version_string: &str) -> Self {
        let is_es = version_string.contains("OpenGL ES") || version_string.contains("WebGL");

        if is_es {
            // The ES version follows the "OpenGL ES" prefix; WebGL strings carry
            // it in parentheses, so search from the prefix when present.
            let tail = version_string
                .find("OpenGL ES")
                .map(|pos| &version_string[pos + "OpenGL ES".len()..])
                .unwrap_or(version_string);
            let (major, minor) = if version_string.starts_with("WebGL 1.0") {
                (2, 0)
            } else {
                Self::parse_version_numbers(tail).unwrap_or((2, 0))
            };
            Self::es(major, minor)
        } else {
            let (major, minor) = Self::parse_version_numbers(version_string).unwrap_or((2, 1));
            if version_string.contains("Compatibility") {
                Self::compatibility(major, minor)
            } else {
                Self::core(major, minor)
            }
        }
    }

    fn parse_version_numbers(version_string: &str) -> Option<(u32, u32)> {
        // Look for the first word shaped like "3.2" or "4.6.0"
        for word in version_string.split_whitespace() {
            let Some((major_str, rest)) = word.split_once('.') else {
                continue;
            };
            let minor_str = rest.split('.').next().unwrap_or(rest);
            if let (Ok(major), Ok(minor)) = (major_str.parse::<u32>(), minor_str.parse::<u32>()) {
                return Some((major, minor));
            }
        }
        None
    }

    pub fn is_es(self) -> bool {
        self.profile == Profile::Es
    }

    /// Whether a context of type `self` can run tests written for `required`
    pub fn supports(self, required: ApiType) -> bool {
        self.is_es() == required.is_es()
            && (self.major, self.minor) >= (required.major, required.minor)
    }
}

impl std::fmt::Display for ApiType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.profile {
            Profile::Es => write!(f, "ES {}.{}", self.major, self.minor),
            Profile::Core => write!(f, "GL {}.{} core", self.major, self.minor),
            Profile::Compatibility => write!(f, "GL {}.{} compatibility", self.major, self.minor),
        }
    }
}
