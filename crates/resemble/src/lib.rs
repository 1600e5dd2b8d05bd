//! Pixel-level image comparison.
//!
//! Two images are loaded concurrently, padded to a common size, then scanned
//! pixel by pixel under a configurable tolerance. The result carries the
//! mismatch percentage, the bounding box of differences, and a painted diff
//! image.

pub mod compare;
pub mod error;
pub mod sink;
pub mod source;

pub use compare::analysis::ImageAnalysis;
pub use compare::metrics::ComparisonResult;
pub use compare::pixel::{ImageBuffer, Pixel};
pub use compare::settings::ComparisonConfig;
pub use compare::tolerance::TolerancePreset;
pub use compare::transform::{ErrorColor, ErrorTransform};
pub use compare::{Comparison, ComparisonOutcome, analyze, compare, compare_buffers};
pub use error::LoadError;
pub use sink::DiffImage;
pub use source::ImageSource;
