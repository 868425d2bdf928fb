//! Reference-versus-observed image comparison
//!
//! The tolerance is a policy picked per format class rather than one global
//! threshold: normalized and integer formats compare exactly at the coarser
//! of the two channel depths, float formats compare within a per-channel
//! threshold.

use std::path::{Path, PathBuf};

use crate::{ConformanceError, ConformanceResult, ReferenceImage, TextureFormat, Vec4};

const FLOAT_THRESHOLD: f32 = 1.0e-3;

/// How two pixel values are judged equal
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComparePolicy {
    /// Values must match exactly after quantizing both sides to the coarser
    /// normalized channel depth
    Exact,
    /// Per-channel absolute difference must not exceed the threshold
    Threshold(Vec4),
}

impl ComparePolicy {
    /// Pick the policy for comparing an image in `reference` format with one
    /// read back as `observed`
    pub fn for_formats(reference: TextureFormat, observed: TextureFormat) -> Self {
        if !reference.is_float() && !observed.is_float() {
            return Self::Exact;
        }

        let ref_bits = reference.channel_bits();
        let obs_bits = observed.channel_bits();
        let mut threshold = [FLOAT_THRESHOLD; 4];
        for (i, t) in threshold.iter_mut().enumerate() {
            let bits = coarser_bits(ref_bits[i], obs_bits[i]);
            if bits != 0 {
                *t = 1.0 / ((1u64 << bits) - 1) as f32;
            }
        }
        Self::Threshold(Vec4::from_array(threshold))
    }

    fn channel_equal(&self, channel: usize, bits: u32, reference: f32, observed: f32) -> bool {
        match self {
            ComparePolicy::Exact if bits != 0 => {
                crate::format::quantize_unorm(reference, bits)
                    == crate::format::quantize_unorm(observed, bits)
            }
            ComparePolicy::Exact => reference == observed,
            ComparePolicy::Threshold(threshold) => {
                (reference - observed).abs() <= threshold.to_array()[channel]
            }
        }
    }
}

/// Zero means "not normalized"; otherwise the smaller depth wins
fn coarser_bits(a: u32, b: u32) -> u32 {
    match (a, b) {
        (0, b) => b,
        (a, 0) => a,
        (a, b) => a.min(b),
    }
}

/// First pixel that failed the comparison
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelMismatch {
    pub x: u32,
    pub y: u32,
    pub reference: Vec4,
    pub observed: Vec4,
}

/// Outcome of [`compare`]
#[derive(Debug, Clone)]
pub struct CompareReport {
    pub width: u32,
    pub height: u32,
    pub policy: ComparePolicy,
    pub mismatched_pixels: usize,
    pub first_mismatch: Option<PixelMismatch>,
    /// Largest per-channel difference over the compared channels
    pub max_difference: Vec4,
}

impl CompareReport {
    pub fn passed(&self) -> bool {
        self.mismatched_pixels == 0
    }

    pub fn summary(&self) -> String {
        match &self.first_mismatch {
            None => format!(
                "{}x{} image matches ({:?}), max difference {}",
                self.width, self.height, self.policy, self.max_difference
            ),
            Some(m) => format!(
                "{} of {} pixels differ ({:?}); first at ({}, {}): expected {}, got {}",
                self.mismatched_pixels,
                self.width as usize * self.height as usize,
                self.policy,
                m.x,
                m.y,
                m.reference,
                m.observed
            ),
        }
    }

    /// Turn a failed report into a mismatch error naming `subject`
    pub fn into_result(self, subject: impl Into<String>) -> ConformanceResult<Self> {
        if self.passed() {
            Ok(self)
        } else {
            Err(ConformanceError::mismatch(subject, self.summary()))
        }
    }
}

/// Compare `observed` against `reference` pixel by pixel
///
/// Only the channels stored by the reference format are compared. A size
/// mismatch is reported as an error rather than as a pixel difference.
pub fn compare(
    reference: &ReferenceImage,
    observed: &ReferenceImage,
    policy: ComparePolicy,
) -> ConformanceResult<CompareReport> {
    if reference.width() != observed.width() || reference.height() != observed.height() {
        return Err(ConformanceError::mismatch(
            "image size",
            format!(
                "reference is {}x{}, observed is {}x{}",
                reference.width(),
                reference.height(),
                observed.width(),
                observed.height()
            ),
        ));
    }

    let mask = reference.format().channel_mask();
    let ref_bits = reference.format().channel_bits();
    let obs_bits = observed.format().channel_bits();

    let mut report = CompareReport {
        width: reference.width(),
        height: reference.height(),
        policy,
        mismatched_pixels: 0,
        first_mismatch: None,
        max_difference: Vec4::ZERO,
    };

    for y in 0..reference.height() {
        for x in 0..reference.width() {
            let expected = reference.pixel(x, y);
            let actual = observed.pixel(x, y);
            let (e, a) = (expected.to_array(), actual.to_array());

            let mut equal = true;
            let mut diff = [0.0; 4];
            for channel in 0..4 {
                if !mask[channel] {
                    continue;
                }
                diff[channel] = (e[channel] - a[channel]).abs();
                let bits = coarser_bits(ref_bits[channel], obs_bits[channel]);
                equal &= policy.channel_equal(channel, bits, e[channel], a[channel]);
            }
            report.max_difference = report.max_difference.max(Vec4::from_array(diff));

            if !equal {
                report.mismatched_pixels += 1;
                report.first_mismatch.get_or_insert(PixelMismatch {
                    x,
                    y,
                    reference: expected,
                    observed: actual,
                });
            }
        }
    }

    log::debug!("compare: {}", report.summary());
    Ok(report)
}

/// Write the reference and observed images as `<name>.reference.png` and `<name>.observed.png`
pub fn dump_images(
    dir: &Path,
    name: &str,
    reference: &ReferenceImage,
    observed: &ReferenceImage,
) -> ConformanceResult<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(dir)?;
    let reference_path = dir.join(format!("{name}.reference.png"));
    let observed_path = dir.join(format!("{name}.observed.png"));
    reference.save_png(&reference_path)?;
    observed.save_png(&observed_path)?;
    log::info!(
        "Wrote reference image to {:?} and observed image to {:?}",
        reference_path,
        observed_path
    );
    Ok((reference_path, observed_path))
}
