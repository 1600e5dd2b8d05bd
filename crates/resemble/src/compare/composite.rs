use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::debug;

use super::antialias::is_antialiased;
use super::pixel::{ImageBuffer, Pixel};
use super::settings::ComparisonConfig;
use super::similarity::{is_pixel_brightness_similar, is_rgb_similar};
use super::transform::to_channel;

/// Grid spacing used to subsample large images.
pub const LARGE_IMAGE_STRIDE: u32 = 6;

/// Tightest rectangle around every mismatched pixel, inclusive.
///
/// Starts inverted (`left = width`, `top = height`, `right = bottom = 0`) and
/// only grows on a mismatch, so a clean comparison reports an empty,
/// inverted box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiffBounds {
    pub top: u32,
    pub left: u32,
    pub bottom: u32,
    pub right: u32,
}

impl DiffBounds {
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            top: height,
            left: width,
            bottom: 0,
            right: 0,
        }
    }

    /// True while no pixel has been included.
    pub fn is_empty(&self) -> bool {
        self.left > self.right || self.top > self.bottom
    }

    fn include(&mut self, x: u32, y: u32) {
        self.left = self.left.min(x);
        self.right = self.right.max(x);
        self.top = self.top.min(y);
        self.bottom = self.bottom.max(y);
    }
}

/// Output of one compositor pass.
pub struct CompositeOutcome {
    pub diff: ImageBuffer,
    pub mismatch_count: u64,
    pub bounds: DiffBounds,
    pub elapsed: Duration,
}

enum Verdict {
    Copy,
    Grayscale,
    Error,
}

/// Scan two equally sized images and paint the diff buffer.
///
/// Inputs are expected to be normalized to the same dimensions; the scan
/// covers the first image's extent and treats any pixel missing from either
/// side as a match.
pub fn composite(one: &ImageBuffer, two: &ImageBuffer, config: &ComparisonConfig) -> CompositeOutcome {
    let (width, height) = one.dimensions();
    let tolerance = &config.tolerance.profile;
    let output = &config.output;
    let ignore_antialiasing = config.tolerance.ignore_antialiasing;
    let ignore_colors = config.tolerance.ignore_colors;

    let skip = (output.large_image_threshold > 0
        && ignore_antialiasing
        && (width > output.large_image_threshold || height > output.large_image_threshold))
        .then_some(LARGE_IMAGE_STRIDE);

    debug!(
        width,
        height,
        ignore_antialiasing,
        ignore_colors,
        error_type = %output.error_type,
        stride = skip.unwrap_or(1),
        "compositing"
    );

    let mut diff = ImageBuffer::transparent(width, height);
    let mut mismatch_count = 0u64;
    let mut bounds = DiffBounds::empty(width, height);
    let start = Instant::now();

    for y in 0..height {
        for x in 0..width {
            // Sparse grid: only pixels on a stride multiple in both axes are compared.
            if let Some(stride) = skip
                && (y % stride != 0 || x % stride != 0)
            {
                continue;
            }

            let (Some(p1), Some(p2)) = (
                one.pixel(i64::from(x), i64::from(y)),
                two.pixel(i64::from(x), i64::from(y)),
            ) else {
                continue;
            };

            let verdict = if ignore_colors {
                brightness_verdict(&p1, &p2, config)
            } else if is_rgb_similar(&p1, &p2, tolerance) {
                Verdict::Copy
            } else if ignore_antialiasing
                && (is_antialiased(&p1, one, x, y, tolerance)
                    || is_antialiased(&p2, two, x, y, tolerance))
            {
                brightness_verdict(&p1, &p2, config)
            } else {
                Verdict::Error
            };

            let out = match verdict {
                Verdict::Copy => Pixel::new(p2.r, p2.g, p2.b, fade(p2.a, output.transparency)),
                Verdict::Grayscale => {
                    let lum = to_channel(p2.brightness());
                    Pixel::new(lum, lum, lum, fade(p2.a, output.transparency))
                }
                Verdict::Error => {
                    mismatch_count += 1;
                    bounds.include(x, y);
                    output.error_type.apply(&p1, &p2, &output.error_color)
                }
            };
            diff.put_pixel(x, y, out);
        }
    }

    let elapsed = start.elapsed();
    debug!(mismatch_count, elapsed_ms = elapsed.as_millis() as u64, "composite done");

    CompositeOutcome {
        diff,
        mismatch_count,
        bounds,
        elapsed,
    }
}

fn brightness_verdict(p1: &Pixel, p2: &Pixel, config: &ComparisonConfig) -> Verdict {
    if is_pixel_brightness_similar(p1, p2, &config.tolerance.profile) {
        Verdict::Grayscale
    } else {
        Verdict::Error
    }
}

fn fade(alpha: u8, transparency: f64) -> u8 {
    to_channel(f64::from(alpha) * transparency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::tolerance::TolerancePreset;
    use crate::compare::transform::{ErrorColor, ErrorTransform};

    const WHITE: Pixel = Pixel::new(255, 255, 255, 255);
    const BLACK: Pixel = Pixel::new(0, 0, 0, 255);
    const RED: Pixel = Pixel::new(255, 0, 0, 255);

    fn strict() -> ComparisonConfig {
        ComparisonConfig::with_preset(TolerancePreset::IgnoreNothing)
    }

    #[test]
    fn identical_images_copy_second() {
        let a = ImageBuffer::filled(2, 2, RED);
        let out = composite(&a, &a, &ComparisonConfig::default());
        assert_eq!(out.mismatch_count, 0);
        assert_eq!(out.diff, a);
        assert!(out.bounds.is_empty());
        assert_eq!(out.bounds, DiffBounds::empty(2, 2));
    }

    #[test]
    fn similar_pixel_copies_second_image() {
        let a = ImageBuffer::filled(1, 1, Pixel::new(100, 100, 100, 255));
        let b = ImageBuffer::filled(1, 1, Pixel::new(110, 90, 105, 250));
        let out = composite(&a, &b, &ComparisonConfig::default());
        assert_eq!(out.mismatch_count, 0);
        assert_eq!(out.diff.pixel(0, 0), Some(Pixel::new(110, 90, 105, 250)));
    }

    #[test]
    fn mismatch_paints_error_color() {
        let a = ImageBuffer::filled(1, 1, WHITE);
        let b = ImageBuffer::filled(1, 1, BLACK);
        let out = composite(&a, &b, &strict());
        assert_eq!(out.mismatch_count, 1);
        assert_eq!(out.diff.pixel(0, 0), Some(Pixel::new(255, 0, 255, 255)));
        assert_eq!(
            out.bounds,
            DiffBounds {
                top: 0,
                left: 0,
                bottom: 0,
                right: 0
            }
        );
    }

    #[test]
    fn bounds_enclose_all_mismatches() {
        let a = ImageBuffer::filled(10, 8, WHITE);
        let mut b = a.clone();
        b.put_pixel(2, 5, BLACK);
        b.put_pixel(7, 1, BLACK);
        let out = composite(&a, &b, &strict());
        assert_eq!(out.mismatch_count, 2);
        assert_eq!(
            out.bounds,
            DiffBounds {
                top: 1,
                left: 2,
                bottom: 5,
                right: 7
            }
        );
    }

    #[test]
    fn transparency_fades_matching_pixels_only() {
        let a = ImageBuffer::filled(2, 1, WHITE);
        let mut b = a.clone();
        b.put_pixel(1, 0, BLACK);
        let mut config = strict();
        config.output.transparency = 0.5;
        let out = composite(&a, &b, &config);
        assert_eq!(out.diff.pixel(0, 0), Some(Pixel::new(255, 255, 255, 128)));
        assert_eq!(out.diff.pixel(1, 0), Some(Pixel::new(255, 0, 255, 255)));
    }

    #[test]
    fn brightness_only_mode_ignores_hue() {
        // Same brightness, different colors.
        let a = ImageBuffer::filled(1, 1, Pixel::new(100, 100, 100, 255));
        let b = ImageBuffer::filled(1, 1, Pixel::new(110, 95, 104, 255));
        let config = ComparisonConfig::with_preset(TolerancePreset::IgnoreColors);
        let out = composite(&a, &b, &config);
        assert_eq!(out.mismatch_count, 0);
        let lum = to_channel(Pixel::new(110, 95, 104, 255).brightness());
        assert_eq!(out.diff.pixel(0, 0), Some(Pixel::new(lum, lum, lum, 255)));
    }

    #[test]
    fn transparency_fades_grayscale_pixels() {
        let a = ImageBuffer::filled(1, 1, Pixel::new(100, 100, 100, 255));
        let b = ImageBuffer::filled(1, 1, Pixel::new(110, 95, 104, 250));
        let mut config = ComparisonConfig::with_preset(TolerancePreset::IgnoreColors);
        config.output.transparency = 0.5;
        let out = composite(&a, &b, &config);
        assert_eq!(out.mismatch_count, 0);
        let lum = to_channel(Pixel::new(110, 95, 104, 250).brightness());
        assert_eq!(out.diff.pixel(0, 0), Some(Pixel::new(lum, lum, lum, 125)));
    }

    #[test]
    fn brightness_only_mode_flags_brightness_change() {
        let a = ImageBuffer::filled(1, 1, WHITE);
        let b = ImageBuffer::filled(1, 1, BLACK);
        let config = ComparisonConfig::with_preset(TolerancePreset::IgnoreColors);
        assert_eq!(composite(&a, &b, &config).mismatch_count, 1);
    }

    #[test]
    fn error_transform_is_taken_from_config() {
        let a = ImageBuffer::filled(1, 1, WHITE);
        let b = ImageBuffer::filled(1, 1, BLACK);
        let mut config = strict();
        config.output.error_type = ErrorTransform::Movement;
        config.output.error_color = ErrorColor {
            red: 0,
            green: 255,
            blue: 0,
            alpha: 255,
        };
        let out = composite(&a, &b, &config);
        assert_eq!(out.diff.pixel(0, 0), Some(Pixel::new(0, 128, 0, 255)));
    }

    /// Black/white split with a one-pixel edge column that differs slightly
    /// between the two images.
    fn edge_pair() -> (ImageBuffer, ImageBuffer) {
        let mut a = ImageBuffer::filled(10, 10, WHITE);
        for y in 0..10 {
            for x in 0..5 {
                a.put_pixel(x, y, BLACK);
            }
        }
        let mut b = a.clone();
        for y in 0..10 {
            b.put_pixel(5, y, Pixel::new(210, 210, 210, 255));
        }
        (a, b)
    }

    #[test]
    fn antialiased_edge_is_suppressed() {
        let (a, b) = edge_pair();
        let strict_count = composite(&a, &b, &strict()).mismatch_count;
        let aa = ComparisonConfig::with_preset(TolerancePreset::IgnoreAntialiasing);
        let out = composite(&a, &b, &aa);
        assert_eq!(strict_count, 10);
        assert!(out.mismatch_count < strict_count);
        assert_eq!(out.mismatch_count, 0);
        // Suppressed pixels are drawn in grayscale from the second image.
        assert_eq!(out.diff.pixel(5, 3), Some(Pixel::new(210, 210, 210, 255)));
    }

    #[test]
    fn antialiased_pixel_in_second_image_is_suppressed() {
        // Flat white baseline; the candidate has one isolated light-grey pixel.
        let grey = Pixel::new(200, 200, 200, 255);
        let a = ImageBuffer::filled(10, 10, WHITE);
        let mut b = a.clone();
        b.put_pixel(5, 5, grey);

        let aa = ComparisonConfig::with_preset(TolerancePreset::IgnoreAntialiasing);
        let tolerance = &aa.tolerance.profile;
        assert!(!is_antialiased(&WHITE, &a, 5, 5, tolerance));
        assert!(is_antialiased(&grey, &b, 5, 5, tolerance));

        assert_eq!(composite(&a, &b, &strict()).mismatch_count, 1);
        let out = composite(&a, &b, &aa);
        assert_eq!(out.mismatch_count, 0);
        assert_eq!(out.diff.pixel(5, 5), Some(grey));
    }

    #[test]
    fn antialiasing_does_not_hide_brightness_jumps() {
        let (a, mut b) = edge_pair();
        for y in 0..10 {
            b.put_pixel(5, y, BLACK);
        }
        let aa = ComparisonConfig::with_preset(TolerancePreset::IgnoreAntialiasing);
        assert_eq!(composite(&a, &b, &aa).mismatch_count, 10);
    }

    #[test]
    fn large_images_are_subsampled_with_antialiasing() {
        let a = ImageBuffer::filled(13, 13, WHITE);
        let b = ImageBuffer::filled(13, 13, BLACK);
        let mut config = ComparisonConfig::with_preset(TolerancePreset::IgnoreAntialiasing);
        config.output.large_image_threshold = 12;
        let out = composite(&a, &b, &config);
        // Only the {0, 6, 12} x {0, 6, 12} grid is compared.
        assert_eq!(out.mismatch_count, 9);
        let error = Pixel::new(255, 0, 255, 255);
        for (x, y) in [(0, 0), (6, 6), (12, 0), (12, 12)] {
            assert_eq!(out.diff.pixel(x, y), Some(error), "({x}, {y})");
        }
        for (x, y) in [(1, 1), (6, 1), (1, 6), (11, 12)] {
            assert_eq!(out.diff.pixel(x, y), Some(Pixel::default()), "({x}, {y})");
        }
        assert_eq!(
            out.bounds,
            DiffBounds {
                top: 0,
                left: 0,
                bottom: 12,
                right: 12
            }
        );

        config.output.large_image_threshold = 0;
        assert_eq!(composite(&a, &b, &config).mismatch_count, 169);
    }

    #[test]
    fn large_images_are_not_subsampled_without_antialiasing() {
        let a = ImageBuffer::filled(13, 2, WHITE);
        let b = ImageBuffer::filled(13, 2, BLACK);
        let mut config = strict();
        config.output.large_image_threshold = 12;
        assert_eq!(composite(&a, &b, &config).mismatch_count, 26);
    }

    #[test]
    fn absent_pixels_are_skipped() {
        let a = ImageBuffer::filled(2, 1, WHITE);
        let b = ImageBuffer::from_raw(2, 1, vec![0, 0, 0, 255]);
        let out = composite(&a, &b, &strict());
        assert_eq!(out.mismatch_count, 1);
        assert_eq!(out.diff.pixel(1, 0), Some(Pixel::default()));
    }

    #[test]
    fn classification_is_symmetric() {
        let (a, b) = edge_pair();
        for preset in [TolerancePreset::Default, TolerancePreset::IgnoreNothing] {
            let config = ComparisonConfig::with_preset(preset);
            assert_eq!(
                composite(&a, &b, &config).mismatch_count,
                composite(&b, &a, &config).mismatch_count
            );
        }
    }
}
