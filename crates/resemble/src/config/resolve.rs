use anyhow::{Context, Result};
use clap::ValueEnum;
use resemble::{ComparisonConfig, TolerancePreset};

use super::{Config, OutputArgs, load, validate_threshold};

/// Values extracted from the CLI that participate in the merge.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub preset: Option<TolerancePreset>,
    pub threshold: Option<f64>,
    pub output: OutputArgs,
}

/// `RESEMBLE_PRESET` and `RESEMBLE_THRESHOLD`.
#[derive(Debug, Default)]
pub struct EnvLayer {
    pub preset: Option<TolerancePreset>,
    pub threshold: Option<f64>,
}

impl EnvLayer {
    pub fn from_env() -> Result<Self> {
        Self::parse(
            std::env::var("RESEMBLE_PRESET").ok().as_deref(),
            std::env::var("RESEMBLE_THRESHOLD").ok().as_deref(),
        )
    }

    fn parse(preset: Option<&str>, threshold: Option<&str>) -> Result<Self> {
        let preset = preset
            .map(|v| TolerancePreset::from_str(v, true))
            .transpose()
            .map_err(|e| anyhow::anyhow!("RESEMBLE_PRESET: {e}"))?;
        let threshold = threshold
            .map(|v| v.parse::<f64>())
            .transpose()
            .context("RESEMBLE_THRESHOLD must be a valid float")?;
        Ok(Self { preset, threshold })
    }
}

/// Fully resolved settings after CLI > env > file > defaults merge.
#[derive(Debug)]
pub struct ResolvedCompareConfig {
    pub comparison: ComparisonConfig,
    /// Maximum mismatch percentage that still passes.
    pub threshold: f64,
}

impl ResolvedCompareConfig {
    pub fn new(cli: CliOverrides) -> Result<Self> {
        let file = load().context("Fix or remove .resemble/config.toml")?;
        let env = EnvLayer::from_env()?;
        Self::resolve(cli, env, file)
    }

    fn resolve(cli: CliOverrides, env: EnvLayer, file: Option<Config>) -> Result<Self> {
        let file = file.unwrap_or_default();

        let preset = cli
            .preset
            .or(env.preset)
            .or(file.tolerance.preset)
            .unwrap_or_default();

        let threshold = cli
            .threshold
            .or(env.threshold)
            .unwrap_or(file.diff.threshold);
        validate_threshold(threshold).map_err(|e| anyhow::anyhow!("{e}"))?;

        // Output: file base, then CLI overlay
        let mut output = file.output;
        output.merge(&cli.output);

        let mut comparison = ComparisonConfig::with_preset(preset);
        output.apply_to(&mut comparison.output);

        Ok(Self {
            comparison,
            threshold,
        })
    }
}

#[cfg(test)]
mod tests {
    use resemble::ErrorTransform;

    use super::*;
    use crate::config::{DiffConfig, ToleranceConfig};

    fn file(preset: TolerancePreset, threshold: f64) -> Config {
        Config {
            tolerance: ToleranceConfig {
                preset: Some(preset),
            },
            output: OutputArgs {
                error_type: Some("movement".into()),
                transparency: Some(0.5),
                ..Default::default()
            },
            diff: DiffConfig { threshold },
        }
    }

    #[test]
    fn defaults_without_any_layer() {
        let r = ResolvedCompareConfig::resolve(
            CliOverrides::default(),
            EnvLayer::default(),
            None,
        )
        .unwrap();
        assert_eq!(r.comparison, ComparisonConfig::default());
        assert_eq!(r.threshold, 0.0);
    }

    #[test]
    fn file_layer_applies() {
        let r = ResolvedCompareConfig::resolve(
            CliOverrides::default(),
            EnvLayer::default(),
            Some(file(TolerancePreset::IgnoreColors, 1.0)),
        )
        .unwrap();
        assert!(r.comparison.tolerance.ignore_colors);
        assert_eq!(r.comparison.output.error_type, ErrorTransform::Movement);
        assert_eq!(r.comparison.output.transparency, 0.5);
        assert_eq!(r.threshold, 1.0);
    }

    #[test]
    fn env_beats_file_and_cli_beats_env() {
        let env = EnvLayer {
            preset: Some(TolerancePreset::IgnoreNothing),
            threshold: Some(5.0),
        };
        let r = ResolvedCompareConfig::resolve(
            CliOverrides::default(),
            env,
            Some(file(TolerancePreset::IgnoreColors, 1.0)),
        )
        .unwrap();
        assert!(!r.comparison.tolerance.ignore_colors);
        assert_eq!(r.comparison.tolerance.profile.red, 0);
        assert_eq!(r.threshold, 5.0);

        let cli = CliOverrides {
            preset: Some(TolerancePreset::IgnoreAntialiasing),
            threshold: Some(10.0),
            output: OutputArgs {
                error_type: Some("flat".into()),
                ..Default::default()
            },
        };
        let env = EnvLayer {
            preset: Some(TolerancePreset::IgnoreNothing),
            threshold: Some(5.0),
        };
        let r = ResolvedCompareConfig::resolve(
            cli,
            env,
            Some(file(TolerancePreset::IgnoreColors, 1.0)),
        )
        .unwrap();
        assert!(r.comparison.tolerance.ignore_antialiasing);
        assert_eq!(r.threshold, 10.0);
        assert_eq!(r.comparison.output.error_type, ErrorTransform::Flat);
        // Untouched by the CLI, still from the file.
        assert_eq!(r.comparison.output.transparency, 0.5);
    }

    #[test]
    fn invalid_env_threshold_is_rejected() {
        let env = EnvLayer {
            threshold: Some(101.0),
            ..Default::default()
        };
        assert!(ResolvedCompareConfig::resolve(CliOverrides::default(), env, None).is_err());
    }

    #[test]
    fn env_parsing() {
        let env = EnvLayer::parse(Some("IGNORE-COLORS"), Some("0.5")).unwrap();
        assert_eq!(env.preset, Some(TolerancePreset::IgnoreColors));
        assert_eq!(env.threshold, Some(0.5));
        assert!(EnvLayer::parse(Some("fuzzy"), None).is_err());
        assert!(EnvLayer::parse(None, Some("lots")).is_err());
    }
}
