use super::pixel::{ImageBuffer, Pixel};
use super::similarity::{is_contrasting, is_rgb_same};
use super::tolerance::ToleranceProfile;

/// Neighbor hue gap that counts as a different hue.
const HUE_DELTA: f64 = 0.3;

/// Radius of the neighborhood window (1 = 3x3).
const DISTANCE: i64 = 1;

/// Decide whether `source` at `(x, y)` in `image` looks like edge smoothing
/// rather than a real change.
///
/// Neighbors outside the image are absent; the scan never wraps to the
/// adjacent row or column. A pixel is anti-aliased when more than one
/// neighbor is high-contrast or has a different hue, or when fewer than two
/// neighbors share its exact RGB.
pub fn is_antialiased(
    source: &Pixel,
    image: &ImageBuffer,
    x: u32,
    y: u32,
    tolerance: &ToleranceProfile,
) -> bool {
    let source_hue = source.hue();
    let mut high_contrast = 0u32;
    let mut different_hue = 0u32;
    let mut equivalent = 0u32;

    for dx in -DISTANCE..=DISTANCE {
        for dy in -DISTANCE..=DISTANCE {
            if dx == 0 && dy == 0 {
                continue;
            }

            let Some(neighbor) = image.pixel(i64::from(x) + dx, i64::from(y) + dy) else {
                continue;
            };

            if is_contrasting(source, &neighbor, tolerance) {
                high_contrast += 1;
            }
            if is_rgb_same(source, &neighbor) {
                equivalent += 1;
            }
            if (neighbor.hue() - source_hue).abs() > HUE_DELTA {
                different_hue += 1;
            }

            if different_hue > 1 || high_contrast > 1 {
                return true;
            }
        }
    }

    equivalent < 2
}
