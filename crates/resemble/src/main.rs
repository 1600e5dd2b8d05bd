mod cli;
mod commands;
mod config;
mod report;

use clap::Parser;
use config::{CliOverrides, ResolvedCompareConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("resemble=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    match cli.command {
        cli::Command::Init { force } => {
            commands::init(force)?;
        }
        cli::Command::Compare {
            one,
            two,
            preset,
            threshold,
            output,
            label,
            json,
            style,
        } => {
            let overrides = CliOverrides {
                preset,
                threshold,
                output: style,
            };
            let config = ResolvedCompareConfig::new(overrides)?;
            let opts = commands::CompareOptions {
                output: output.as_deref(),
                label: label.as_deref(),
                json,
            };
            let code = commands::compare(&one, &two, config, opts).await?;
            std::process::exit(code);
        }
        cli::Command::Analyze { image, json } => {
            commands::analyze(&image, json).await?;
        }
    }

    Ok(())
}
