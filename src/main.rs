mod app;
mod color;
mod config;
mod data;
mod report;
mod sections;
mod state;
mod ui;

use anyhow::{Context, Result};
use app::TrainingNeedsApp;
use clap::Parser;
use config::{Args, DashboardConfig};
use eframe::egui;

fn main() -> Result<()> {
    let args = Args::parse();
    let config = DashboardConfig::try_from(args)?;

    let default_filter = if config.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if config.headless_summary {
        return print_summary(&config);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Training Needs Analysis Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(TrainingNeedsApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard window: {e}"))
}

/// Headless mode: the requested section, or every section, as JSON on stdout.
fn print_summary(config: &DashboardConfig) -> Result<()> {
    let path = config
        .data_path
        .as_deref()
        .context("--summary needs a data file")?;
    let dataset = data::loader::load_file(path, config.worksheet.as_deref())
        .with_context(|| format!("loading {}", path.display()))?;
    log::info!("Loaded {} respondents from {}", dataset.len(), path.display());

    let json = match config.initial_section {
        Some(idx) => {
            let report = report::build_section(&dataset, &sections::SECTIONS[idx], config.code_policy)?;
            serde_json::to_string_pretty(&report)
        }
        None => serde_json::to_string_pretty(&report::build_all(&dataset, config.code_policy)?),
    }
    .context("serialising summary")?;
    println!("{json}");
    Ok(())
}
