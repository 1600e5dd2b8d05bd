use resemble::compare::settings::OutputSettings;
use resemble::compare::transform::ErrorColorOverride;
use serde::{Deserialize, Serialize};

/// Parse `R,G,B` or `R,G,B,A`.
fn parse_error_color(s: &str) -> Result<ErrorColorOverride, String> {
    let channels = s
        .split(',')
        .map(|c| {
            c.trim()
                .parse::<u8>()
                .map_err(|e| format!("invalid channel '{}': {e}", c.trim()))
        })
        .collect::<Result<Vec<u8>, String>>()?;

    match channels[..] {
        [red, green, blue] => Ok(ErrorColorOverride {
            red: Some(red),
            green: Some(green),
            blue: Some(blue),
            alpha: None,
        }),
        [red, green, blue, alpha] => Ok(ErrorColorOverride {
            red: Some(red),
            green: Some(green),
            blue: Some(blue),
            alpha: Some(alpha),
        }),
        _ => Err(format!(
            "expected R,G,B or R,G,B,A, got {} values",
            channels.len()
        )),
    }
}

/// How the diff image is painted.
///
/// All fields are `Option`; `None` means "keep the lower layer's value".
/// Serves both TOML deserialization (`[output]`) and CLI argument parsing.
#[derive(Clone, Debug, Default, clap::Args, Serialize, Deserialize)]
pub struct OutputArgs {
    /// Mismatch color as R,G,B or R,G,B,A (default 255,0,255,255)
    #[arg(long, value_parser = parse_error_color)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_color: Option<ErrorColorOverride>,

    /// flat | movement | flatDifferenceIntensity | movementDifferenceIntensity
    #[arg(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,

    /// Alpha multiplier for pixels that match (0.0 hides them, 1.0 keeps them)
    #[arg(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transparency: Option<f64>,

    /// Side length above which anti-aliasing mode samples a sparse grid (0 disables)
    #[arg(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large_image_threshold: Option<u32>,
}

impl OutputArgs {
    /// Overlay non-None fields from `other` onto self.
    pub fn merge(&mut self, other: &OutputArgs) {
        if let Some(color) = &other.error_color {
            let mut merged = self.error_color.unwrap_or_default();
            for (dst, src) in [
                (&mut merged.red, color.red),
                (&mut merged.green, color.green),
                (&mut merged.blue, color.blue),
                (&mut merged.alpha, color.alpha),
            ] {
                if src.is_some() {
                    *dst = src;
                }
            }
            self.error_color = Some(merged);
        }
        if other.error_type.is_some() {
            self.error_type = other.error_type.clone();
        }
        if other.transparency.is_some() {
            self.transparency = other.transparency;
        }
        if other.large_image_threshold.is_some() {
            self.large_image_threshold = other.large_image_threshold;
        }
    }

    pub fn apply_to(&self, settings: &mut OutputSettings) {
        if let Some(color) = &self.error_color {
            settings.set_error_color(color);
        }
        if let Some(name) = &self.error_type {
            settings.set_error_type(name);
        }
        if let Some(t) = self.transparency {
            settings.set_transparency(t);
        }
        if let Some(n) = self.large_image_threshold {
            settings.large_image_threshold = n;
        }
    }
}
