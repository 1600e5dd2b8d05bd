use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use resemble::compare_buffers;
use resemble::source::load_pair;
use tracing::{debug, info};

use crate::config::ResolvedCompareConfig;
use crate::report::{json, terminal};

/// Flags that shape output but not the comparison itself.
pub struct CompareOptions<'a> {
    pub output: Option<&'a Path>,
    pub label: Option<&'a str>,
    pub json: bool,
}

/// `resemble compare`: load both images, diff, report.
/// Returns exit code: 0 = within threshold, 1 = over threshold or load failure.
pub async fn compare(
    one: &Path,
    two: &Path,
    config: ResolvedCompareConfig,
    opts: CompareOptions<'_>,
) -> Result<i32> {
    let one_name = one.display().to_string();
    let two_name = two.display().to_string();
    let name = format!("{one_name} vs {two_name}");
    let start = Instant::now();

    let (img_one, img_two) = match load_pair(one.into(), two.into()).await {
        Ok(pair) => pair,
        Err(e) => {
            let msg = e.to_string();
            if opts.json {
                json::print(&json::ErrorReport { error: &msg })?;
            } else {
                terminal::print_error_line(&name, &msg);
            }
            return Ok(1);
        }
    };
    debug!(elapsed_ms = start.elapsed().as_millis() as u64, "images loaded");

    let comparison = config.comparison;
    let result =
        tokio::task::spawn_blocking(move || compare_buffers(&img_one, &img_two, &comparison))
            .await
            .context("Comparison task panicked")?;

    let passed = result.raw_mismatch_percentage <= config.threshold;
    info!(
        mismatch = %result.mismatch_display(),
        threshold = config.threshold,
        passed,
        "compared"
    );

    let diff_path = opts.output.map(|p| p.display().to_string());
    if let Some(path) = opts.output {
        result
            .diff
            .save(path, opts.label)
            .with_context(|| format!("Failed to write diff image to {}", path.display()))?;
    }

    if opts.json {
        json::print(&json::CompareReport {
            one: &one_name,
            two: &two_name,
            threshold: config.threshold,
            passed,
            result: &result,
            diff_image: diff_path.as_deref(),
        })?;
    } else {
        terminal::print_line(&name, &result, passed, start.elapsed());
        if let Some(path) = &diff_path {
            terminal::print_diff_location(path, &result);
        }
    }

    Ok(if passed { 0 } else { 1 })
}
