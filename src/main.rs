mod analysis;
mod demo;
mod report;

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trusslink::persistence;

use analysis::{load_model, load_settings, run_analysis};
use report::Report;

/// Solve a pin-jointed link model and print the results.
#[derive(Parser)]
#[command(name = "trusslink")]
#[command(version)]
struct Cli {
    /// Model file to solve; the demonstration cantilever is used when omitted.
    model: Option<PathBuf>,
    /// JSON file with solver settings.
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Penalty multiplier, overriding the settings file.
    #[arg(long)]
    penalty: Option<f64>,
    /// Write the solved model to this file.
    #[arg(long)]
    save: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trusslink=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let settings = load_settings(cli.settings.as_deref(), cli.penalty)?;
    let mut model = load_model(cli.model.as_deref())?;

    let status = run_analysis(&mut model, settings)?;
    println!(
        "{}",
        Report {
            model: &model,
            status: &status,
        }
    );

    if let Some(path) = cli.save {
        persistence::save(&model, path)?;
    }
    Ok(())
}
