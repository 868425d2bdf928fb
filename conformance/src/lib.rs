//! Core of the graphics conformance fixtures
//!
//! This crate holds everything that does not talk to a graphics API directly:
//!
//! - **Pixel formats**: [`TextureFormat`] describes a channel order and channel
//!   type and knows how to encode and decode a single pixel.
//! - **Reference images**: [`ReferenceImage`] is the CPU-side copy of what a
//!   GPU object is expected to contain after initialization.
//! - **Comparison**: [`compare`] checks an observed image against a reference
//!   under a [`ComparePolicy`] chosen per format class.
//! - **Test running**: [`TestCaseGroup`] and [`TestRunner`] walk a tree of test
//!   cases and keep going when a single case fails.
//! - **Run parameters**: [`mustpass`] holds the fixed configuration tables that
//!   select which runs must pass.
//!
//! The API-specific fixtures live in the `conformance-glow` (GL/EGL) and
//! `conformance-ash` (Vulkan) crates.
//!
//! # Example
//!
//! ```rust
//! use conformance::{ComparePolicy, ReferenceImage, TextureFormat, Vec4, compare};
//!
//! let mut reference = ReferenceImage::new(TextureFormat::RGBA8, 64, 64);
//! reference.fill_with_component_gradients(Vec4::ZERO, Vec4::ONE);
//!
//! let observed = reference.clone();
//! let report = compare(&reference, &observed, ComparePolicy::Exact).unwrap();
//! assert!(report.passed());
//! ```

pub mod api;
pub mod compare;
pub mod config;
mod error;
pub mod format;
#[cfg(feature = "tracing")]
pub mod logging;
mod math;
pub mod mustpass;
pub mod reference;
pub mod runner;

pub use api::{ApiType, Profile};
pub use compare::{CompareReport, ComparePolicy, PixelMismatch, compare};
pub use config::HarnessConfig;
pub use error::*;
pub use format::{ChannelOrder, ChannelType, TextureFormat};
pub use math::Vec4;
pub use reference::ReferenceImage;
pub use runner::{CaseResult, RunSummary, TestCase, TestCaseGroup, TestNode, TestRunner, TestStatus};
