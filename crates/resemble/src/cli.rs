use std::path::PathBuf;

use clap::{Parser, Subcommand};
use resemble::TolerancePreset;

use crate::config;
use crate::config::OutputArgs;

fn parse_threshold(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("{e}"))?;
    config::validate_threshold(v)
}

#[derive(Parser)]
#[command(
    name = "resemble",
    version,
    about = "Pixel-level image comparison with anti-aliasing tolerance"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create .resemble/config.toml with default settings
    Init {
        /// Overwrite existing config
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Compare two images and report the mismatch (exit 0/1)
    Compare {
        /// First image (baseline)
        one: PathBuf,
        /// Second image (candidate)
        two: PathBuf,
        /// Tolerance preset (overrides config)
        #[arg(long, value_enum)]
        preset: Option<TolerancePreset>,
        /// Max allowed mismatch percentage (0-100). Comparisons within threshold pass.
        #[arg(long, value_parser = parse_threshold)]
        threshold: Option<f64>,
        /// Write the diff image as PNG
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
        /// Caption drawn in a banner above the diff image
        #[arg(long, requires = "output")]
        label: Option<String>,
        /// Print the result as JSON instead of a status line
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        style: OutputArgs,
    },

    /// Report average color and brightness of one image
    Analyze {
        image: PathBuf,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}
