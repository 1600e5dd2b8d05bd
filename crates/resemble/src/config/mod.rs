pub mod output;
pub mod resolve;
pub mod template;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use resemble::TolerancePreset;
use serde::{Deserialize, Serialize};

pub use self::output::OutputArgs;
pub use self::resolve::{CliOverrides, ResolvedCompareConfig};
pub use self::template::{config_file_exists, write_template};

pub(crate) const CONFIG_DIR: &str = ".resemble";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToleranceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<TolerancePreset>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiffConfig {
    /// Maximum allowed mismatch percentage (0-100). Comparisons at or below it pass.
    #[serde(default)]
    pub threshold: f64,
}

pub fn validate_threshold(v: f64) -> Result<f64, String> {
    if !(0.0..=100.0).contains(&v) {
        return Err(format!("threshold must be between 0 and 100, got {v}"));
    }
    Ok(v)
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tolerance: ToleranceConfig,
    #[serde(default)]
    pub output: OutputArgs,
    #[serde(default)]
    pub diff: DiffConfig,
}

pub(crate) fn config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE)
}

/// Read `<dir>/config.toml`. A missing file is not an error.
pub fn load_from(dir: &Path) -> Result<Option<Config>> {
    let path = config_path(dir);
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
    validate_threshold(config.diff.threshold).map_err(|e| anyhow::anyhow!("diff.{e}"))?;
    Ok(Some(config))
}

pub fn load() -> Result<Option<Config>> {
    load_from(Path::new(CONFIG_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, content: &str) {
        std::fs::write(config_path(dir), content).unwrap();
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_from(dir.path()).unwrap().is_none());
    }

    #[test]
    fn parses_all_sections() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            r#"
[tolerance]
preset = "ignore-antialiasing"

[output]
error_type = "movement"
transparency = 0.3
large_image_threshold = 0

[diff]
threshold = 2.5
"#,
        );
        let config = load_from(dir.path()).unwrap().unwrap();
        assert_eq!(
            config.tolerance.preset,
            Some(TolerancePreset::IgnoreAntialiasing)
        );
        assert_eq!(config.output.transparency, Some(0.3));
        assert_eq!(config.output.large_image_threshold, Some(0));
        assert_eq!(config.diff.threshold, 2.5);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "");
        let config = load_from(dir.path()).unwrap().unwrap();
        assert!(config.tolerance.preset.is_none());
        assert_eq!(config.diff.threshold, 0.0);
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "[diff]\nthreshold = 150.0\n");
        let err = load_from(dir.path()).unwrap_err();
        assert!(err.to_string().contains("diff.threshold"));
    }

    #[test]
    fn unknown_preset_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "[tolerance]\npreset = \"fuzzy\"\n");
        assert!(load_from(dir.path()).is_err());
    }

    #[test]
    fn threshold_bounds() {
        assert!(validate_threshold(0.0).is_ok());
        assert!(validate_threshold(100.0).is_ok());
        assert!(validate_threshold(-0.1).is_err());
        assert!(validate_threshold(f64::NAN).is_err());
    }
}
