use serde::Serialize;

use super::pixel::{CHANNELS, ImageBuffer, Pixel};

/// Average color of one image, each channel as a floored percentage of full
/// scale. Alpha is ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImageAnalysis {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
    pub brightness: u32,
}

pub fn analyze_buffer(image: &ImageBuffer) -> ImageAnalysis {
    let mut count = 0u64;
    let (mut red, mut green, mut blue, mut brightness) = (0.0f64, 0.0f64, 0.0f64, 0.0f64);

    let expected = image.pixel_count() as usize * CHANNELS;
    let data = &image.as_raw()[..expected.min(image.as_raw().len())];
    for px in data.chunks_exact(CHANNELS) {
        let p = Pixel::new(px[0], px[1], px[2], px[3]);
        red += percent(f64::from(p.r));
        green += percent(f64::from(p.g));
        blue += percent(f64::from(p.b));
        brightness += percent(p.brightness());
        count += 1;
    }

    if count == 0 {
        return ImageAnalysis::default();
    }

    let avg = |total: f64| (total / count as f64).floor() as u32;
    ImageAnalysis {
        red: avg(red),
        green: avg(green),
        blue: avg(blue),
        brightness: avg(brightness),
    }
}

fn percent(v: f64) -> f64 {
    v / 255.0 * 100.0
}
