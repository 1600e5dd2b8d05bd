use std::path::Path;

use anyhow::{Result, bail};

use crate::config::{self, CONFIG_DIR};

/// `resemble init`: create .resemble/config.toml.
pub fn init(force: bool) -> Result<()> {
    let dir = Path::new(CONFIG_DIR);
    if !force && config::config_file_exists(dir) {
        bail!(".resemble/config.toml already exists (use --force to overwrite)");
    }

    config::write_template(dir)?;

    let verb = if force { "Regenerated" } else { "Created" };
    println!("{verb} .resemble/config.toml");
    Ok(())
}
