use anyhow::{Context, Result};
use resemble::{ComparisonResult, ImageAnalysis};
use serde::Serialize;

/// Machine-readable record of one `resemble compare` run.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareReport<'a> {
    pub one: &'a str,
    pub two: &'a str,
    pub threshold: f64,
    pub passed: bool,
    #[serde(flatten)]
    pub result: &'a ComparisonResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_image: Option<&'a str>,
}

#[derive(Serialize)]
pub struct ErrorReport<'a> {
    pub error: &'a str,
}

#[derive(Serialize)]
pub struct AnalysisReport<'a> {
    pub image: &'a str,
    #[serde(flatten)]
    pub analysis: &'a ImageAnalysis,
}

pub fn print<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
    println!("{out}");
    Ok(())
}
