use std::path::Path;

use anyhow::{Context, Result};

use super::config_path;

/// Hand-crafted config template with commented-out keys.
/// Used by `resemble init` instead of `toml::to_string_pretty()` so that
/// users can see the available knobs without uncommenting section headers.
const CONFIG_TEMPLATE: &str = r#"# ─────────────────────────────────────────────────────────
# Tolerance. CLI flags and RESEMBLE_* env vars override these.
# ─────────────────────────────────────────────────────────
[tolerance]
# preset = "default"                # default | ignore-nothing | ignore-antialiasing | ignore-colors

# ─────────────────────────────────────────────────────────
# Diff image. All fields optional.
# ─────────────────────────────────────────────────────────
[output]
# error_color = { red = 255, green = 0, blue = 255, alpha = 255 }
# error_type = "flat"               # flat | movement | flatDifferenceIntensity | movementDifferenceIntensity
# transparency = 1.0                # alpha multiplier for matching pixels
# large_image_threshold = 1200      # 0 = never subsample

# ─────────────────────────────────────────────────────────
# Pass/fail.
# ─────────────────────────────────────────────────────────
[diff]
# threshold = 0.0                   # max allowed mismatch percentage (0-100)
"#;

pub fn config_file_exists(dir: &Path) -> bool {
    config_path(dir).exists()
}

/// Write the hand-crafted config template into `dir`, creating it if needed.
pub fn write_template(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = config_path(dir);
    std::fs::write(&path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
