use super::pixel::Pixel;
use super::tolerance::ToleranceProfile;

/// Two channel values are similar when equal or strictly closer than
/// `tolerance`. A non-finite value is missing data and never similar.
pub fn is_color_similar(a: f64, b: f64, tolerance: u8) -> bool {
    if !a.is_finite() || !b.is_finite() {
        return false;
    }
    a == b || (a - b).abs() < f64::from(tolerance)
}

/// All four channels within their tolerance.
pub fn is_rgb_similar(p1: &Pixel, p2: &Pixel, t: &ToleranceProfile) -> bool {
    is_color_similar(f64::from(p1.r), f64::from(p2.r), t.red)
        && is_color_similar(f64::from(p1.g), f64::from(p2.g), t.green)
        && is_color_similar(f64::from(p1.b), f64::from(p2.b), t.blue)
        && is_color_similar(f64::from(p1.a), f64::from(p2.a), t.alpha)
}

/// Exact red/green/blue equality. Alpha is not considered.
pub fn is_rgb_same(p1: &Pixel, p2: &Pixel) -> bool {
    p1.r == p2.r && p1.g == p2.g && p1.b == p2.b
}

/// Alpha within tolerance and brightness within `min_brightness`.
pub fn is_pixel_brightness_similar(p1: &Pixel, p2: &Pixel, t: &ToleranceProfile) -> bool {
    let alpha = is_color_similar(f64::from(p1.a), f64::from(p2.a), t.alpha);
    let brightness = is_color_similar(p1.brightness(), p2.brightness(), t.min_brightness);
    alpha && brightness
}

/// Brightness gap strictly above `max_brightness`.
pub fn is_contrasting(p1: &Pixel, p2: &Pixel, t: &ToleranceProfile) -> bool {
    (p1.brightness() - p2.brightness()).abs() > f64::from(t.max_brightness)
}
