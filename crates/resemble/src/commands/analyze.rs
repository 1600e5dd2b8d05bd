use std::path::Path;

use anyhow::{Context, Result};

use crate::report::{json, terminal};

/// `resemble analyze`: average color and brightness of one image.
pub async fn analyze(image: &Path, as_json: bool) -> Result<()> {
    let name = image.display().to_string();
    let analysis = resemble::analyze(image)
        .await
        .with_context(|| format!("Failed to analyze {name}"))?;

    if as_json {
        json::print(&json::AnalysisReport {
            image: &name,
            analysis: &analysis,
        })
    } else {
        terminal::print_analysis(&name, &analysis);
        Ok(())
    }
}
