mod config;
mod impute;
mod loader;
mod manager;
mod model;
mod plot;
mod report;
mod stats;

use crate::manager::Manager;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

const DEFAULT_DATA_FILE: &str = "data/covidandairtravel.csv";

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    #[arg(long, default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    plot_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Clean the dataset and print it with a summary.
    Summary,

    /// Fit every variable pair by least squares.
    Regress,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    let mgr = Manager::new(args.data_file, args.config, args.plot_dir)
        .context("failed to construct mgr")?;

    match args.command {
        Command::Summary => mgr.summarize()?,
        Command::Regress => mgr.regress()?,
    }

    Ok(())
}
