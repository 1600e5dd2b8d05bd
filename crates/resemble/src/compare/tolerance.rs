use serde::{Deserialize, Serialize};

/// Channel-wise thresholds, each in `[0, 255]`.
///
/// `min_brightness` is the tolerance for brightness similarity;
/// `max_brightness` is the contrast threshold used by anti-aliasing detection.
/// Values are not range-checked beyond what `u8` enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToleranceProfile {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
    pub min_brightness: u8,
    pub max_brightness: u8,
}

impl Default for ToleranceProfile {
    fn default() -> Self {
        Self {
            red: 16,
            green: 16,
            blue: 16,
            alpha: 16,
            min_brightness: 16,
            max_brightness: 240,
        }
    }
}

/// Named tolerance presets. Applying one replaces the previous one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TolerancePreset {
    #[default]
    Default,
    /// Exact match on every channel.
    IgnoreNothing,
    /// Loose color thresholds plus anti-aliasing suppression.
    IgnoreAntialiasing,
    /// Brightness-only comparison.
    IgnoreColors,
}

/// Everything a preset controls: thresholds and the two comparison modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToleranceMode {
    pub profile: ToleranceProfile,
    pub ignore_antialiasing: bool,
    pub ignore_colors: bool,
}

impl ToleranceMode {
    /// Apply a preset on top of the current state.
    ///
    /// `IgnoreColors` leaves the red/green/blue thresholds as they were; they
    /// are unused in brightness-only mode.
    pub fn apply(&mut self, preset: TolerancePreset) {
        match preset {
            TolerancePreset::Default => *self = Self::default(),
            TolerancePreset::IgnoreNothing => {
                self.profile = ToleranceProfile {
                    red: 0,
                    green: 0,
                    blue: 0,
                    alpha: 0,
                    min_brightness: 0,
                    max_brightness: 255,
                };
                self.ignore_antialiasing = false;
                self.ignore_colors = false;
            }
            TolerancePreset::IgnoreAntialiasing => {
                self.profile = ToleranceProfile {
                    red: 32,
                    green: 32,
                    blue: 32,
                    alpha: 32,
                    min_brightness: 64,
                    max_brightness: 96,
                };
                self.ignore_antialiasing = true;
                self.ignore_colors = false;
            }
            TolerancePreset::IgnoreColors => {
                self.profile.alpha = 16;
                self.profile.min_brightness = 16;
                self.profile.max_brightness = 240;
                self.ignore_antialiasing = false;
                self.ignore_colors = true;
            }
        }
    }

    pub fn from_preset(preset: TolerancePreset) -> Self {
        let mut mode = Self::default();
        mode.apply(preset);
        mode
    }
}
