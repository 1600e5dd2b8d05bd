use std::time::Duration;

use resemble::{ComparisonResult, ImageAnalysis};

pub fn format_duration(d: Duration) -> String {
    let ms = d.as_millis();
    if ms < 1000 {
        format!("{ms}ms")
    } else {
        format!("{:.1}s", d.as_secs_f64())
    }
}

fn detail(result: &ComparisonResult) -> String {
    let mut detail = format!("{}% mismatch", result.mismatch_display());
    if result.mismatch_count > 0 {
        detail.push_str(&format!(", {} px", result.mismatch_count));
    }
    if !result.is_same_dimensions {
        let d = result.dimension_difference;
        detail.push_str(&format!(", size differs by {:+}x{:+}", d.width, d.height));
    }
    detail
}

/// Print a single comparison result line.
pub fn print_line(name: &str, result: &ComparisonResult, passed: bool, elapsed: Duration) {
    let time_suffix = format!("  \x1b[2m{}\x1b[0m", format_duration(elapsed));
    let detail = detail(result);
    if passed {
        println!("  \x1b[32mPASS\x1b[0m  {name}  ({detail}){time_suffix}");
    } else {
        println!("  \x1b[31mFAIL\x1b[0m  {name}  ({detail}){time_suffix}");
    }
}

/// Print an error line (no timing available).
pub fn print_error_line(name: &str, msg: &str) {
    println!("  \x1b[31m ERR\x1b[0m  {name}  ({msg})");
}

/// Print where the diff went and the bounding box of the differences.
pub fn print_diff_location(path: &str, result: &ComparisonResult) {
    let b = result.diff_bounds;
    if b.is_empty() {
        println!("        diff: {path}");
    } else {
        println!(
            "        diff: {path}  \x1b[2m(changes within x {}..={}, y {}..={})\x1b[0m",
            b.left, b.right, b.top, b.bottom
        );
    }
}

pub fn print_analysis(name: &str, analysis: &ImageAnalysis) {
    println!("{name}");
    println!("  red:        {:>3}%", analysis.red);
    println!("  green:      {:>3}%", analysis.green);
    println!("  blue:       {:>3}%", analysis.blue);
    println!("  brightness: {:>3}%", analysis.brightness);
}

#[cfg(test)]
mod tests {
    use resemble::{ComparisonConfig, ImageBuffer, Pixel, compare_buffers};

    use super::*;

    #[test]
    fn durations() {
        assert_eq!(format_duration(Duration::from_millis(42)), "42ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
    }

    #[test]
    fn detail_mentions_pixels_and_size() {
        let a = ImageBuffer::filled(2, 1, Pixel::new(0, 0, 0, 255));
        let b = ImageBuffer::filled(1, 1, Pixel::new(0, 0, 0, 255));
        let r = compare_buffers(&a, &b, &ComparisonConfig::default());
        assert_eq!(detail(&r), "50.00% mismatch, 1 px, size differs by +1x+0");

        let same = compare_buffers(&b, &b, &ComparisonConfig::default());
        assert_eq!(detail(&same), "0.00% mismatch");
    }
}
