use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::pixel::Pixel;

/// Color used to paint mismatched pixels. Channels in `[0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Default for ErrorColor {
    fn default() -> Self {
        Self {
            red: 255,
            green: 0,
            blue: 255,
            alpha: 255,
        }
    }
}

/// A partial error color; `None` channels keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorColorOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub red: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub green: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blue: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<u8>,
}

impl ErrorColor {
    pub fn merge(&mut self, other: &ErrorColorOverride) {
        if let Some(v) = other.red {
            self.red = v;
        }
        if let Some(v) = other.green {
            self.green = v;
        }
        if let Some(v) = other.blue {
            self.blue = v;
        }
        if let Some(v) = other.alpha {
            self.alpha = v;
        }
    }
}

/// How a mismatched pixel pair is rendered in the diff image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorTransform {
    /// The error color as-is.
    #[default]
    Flat,
    /// Second image's pixel tinted halfway toward the error color.
    Movement,
    /// Error color with alpha proportional to the color distance.
    FlatDifferenceIntensity,
    /// Tint strength proportional to the color distance.
    MovementDifferenceIntensity,
}

impl ErrorTransform {
    pub const ALL: [ErrorTransform; 4] = [
        Self::Flat,
        Self::Movement,
        Self::FlatDifferenceIntensity,
        Self::MovementDifferenceIntensity,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Movement => "movement",
            Self::FlatDifferenceIntensity => "flatDifferenceIntensity",
            Self::MovementDifferenceIntensity => "movementDifferenceIntensity",
        }
    }

    /// Output color for the pair `(p1, p2)`. Directional: movement variants
    /// tint `p2`.
    pub fn apply(&self, p1: &Pixel, p2: &Pixel, color: &ErrorColor) -> Pixel {
        match self {
            Self::Flat => Pixel::new(color.red, color.green, color.blue, color.alpha),
            Self::Movement => Pixel::new(
                to_channel((tint(p2.r, color.red) + f64::from(color.red)) / 2.0),
                to_channel((tint(p2.g, color.green) + f64::from(color.green)) / 2.0),
                to_channel((tint(p2.b, color.blue) + f64::from(color.blue)) / 2.0),
                p2.a,
            ),
            Self::FlatDifferenceIntensity => Pixel::new(
                color.red,
                color.green,
                color.blue,
                to_channel(colors_distance(p1, p2)),
            ),
            Self::MovementDifferenceIntensity => {
                let ratio = colors_distance(p1, p2) / 255.0 * 0.8;
                let blend = |c: u8, e: u8| {
                    to_channel((1.0 - ratio) * tint(c, e) + ratio * f64::from(e))
                };
                Pixel::new(
                    blend(p2.r, color.red),
                    blend(p2.g, color.green),
                    blend(p2.b, color.blue),
                    p2.a,
                )
            }
        }
    }
}

/// Mean absolute RGB difference, `[0, 255]`.
pub fn colors_distance(p1: &Pixel, p2: &Pixel) -> f64 {
    let d = |a: u8, b: u8| (f64::from(a) - f64::from(b)).abs();
    (d(p1.r, p2.r) + d(p1.g, p2.g) + d(p1.b, p2.b)) / 3.0
}

fn tint(channel: u8, error: u8) -> f64 {
    f64::from(channel) * (f64::from(error) / 255.0)
}

/// Round and clamp a float channel into a byte.
pub(crate) fn to_channel(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

impl fmt::Display for ErrorTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown error type '{0}' (expected one of: flat, movement, flatDifferenceIntensity, movementDifferenceIntensity)")]
pub struct UnknownErrorType(pub String);

impl FromStr for ErrorTransform {
    type Err = UnknownErrorType;

    /// Accepts the camelCase names and their kebab-case spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flat" => Ok(Self::Flat),
            "movement" => Ok(Self::Movement),
            "flatDifferenceIntensity" | "flat-difference-intensity" => {
                Ok(Self::FlatDifferenceIntensity)
            }
            "movementDifferenceIntensity" | "movement-difference-intensity" => {
                Ok(Self::MovementDifferenceIntensity)
            }
            other => Err(UnknownErrorType(other.to_string())),
        }
    }
}
