mod app;
mod config;
mod curve;
mod data;
mod error;
mod export;
mod pipeline;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use config::{Cli, LevelConfig};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let stdin = std::io::stdin();
    let config = LevelConfig::from_cli(cli, &mut stdin.lock(), &mut std::io::stdout())
        .context("building level configuration")?;

    let output = if config.preview {
        let level = pipeline::prepare(&config)
            .with_context(|| format!("preparing level for {}", config.ticker))?;
        let title = format!("{} ({})", config.display_name, config.ticker);
        if let Err(e) = app::show_preview(&title, level.clone()) {
            warn!("preview window failed: {e}");
        }
        level.write(&config)
    } else {
        pipeline::run(&config)
    }
    .with_context(|| format!("building level for {}", config.ticker))?;

    println!("{}", output.descriptor_json);
    info!(
        "level {} ready: {} rows in {}, descriptor {}",
        output.descriptor.number,
        output.rows.len(),
        output.chart_path.display(),
        output.descriptor_path.display()
    );
    Ok(())
}
