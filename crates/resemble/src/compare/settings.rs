use tracing::warn;

use super::tolerance::{ToleranceMode, TolerancePreset};
use super::transform::{ErrorColor, ErrorColorOverride, ErrorTransform};

/// Default edge length above which anti-aliasing runs subsample.
pub const DEFAULT_LARGE_IMAGE_THRESHOLD: u32 = 1200;

/// How the diff image is painted and how large images are handled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputSettings {
    pub error_color: ErrorColor,
    pub error_type: ErrorTransform,
    /// Multiplier on the alpha of non-error output pixels, `0.0..=1.0`.
    pub transparency: f64,
    /// Width or height above which anti-aliasing runs subsample; 0 disables.
    pub large_image_threshold: u32,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            error_color: ErrorColor::default(),
            error_type: ErrorTransform::default(),
            transparency: 1.0,
            large_image_threshold: DEFAULT_LARGE_IMAGE_THRESHOLD,
        }
    }
}

impl OutputSettings {
    /// Select a transform by name. Unknown names keep the current transform.
    pub fn set_error_type(&mut self, name: &str) {
        match name.parse() {
            Ok(t) => self.error_type = t,
            Err(e) => warn!(current = %self.error_type, "{e}; keeping current transform"),
        }
    }

    /// Overlay the given channels onto the current error color.
    pub fn set_error_color(&mut self, color: &ErrorColorOverride) {
        self.error_color.merge(color);
    }

    /// Non-finite values are ignored.
    pub fn set_transparency(&mut self, transparency: f64) {
        if transparency.is_finite() {
            self.transparency = transparency;
        }
    }
}

/// Everything one comparison reads. Passed by value into each run, so
/// concurrent comparisons never share settings.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ComparisonConfig {
    pub tolerance: ToleranceMode,
    pub output: OutputSettings,
}

impl ComparisonConfig {
    pub fn with_preset(preset: TolerancePreset) -> Self {
        Self {
            tolerance: ToleranceMode::from_preset(preset),
            output: OutputSettings::default(),
        }
    }

    pub fn apply_preset(&mut self, preset: TolerancePreset) -> &mut Self {
        self.tolerance.apply(preset);
        self
    }
}
