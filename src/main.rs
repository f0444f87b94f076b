//! sitescan: policy and duplicate-content audit for static site trees

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sitescan::config::{Config, LogFormat, DEFAULT_CONFIG_FILE};
use std::path::PathBuf;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "sitescan")]
#[command(about = "Audit a static site tree for policy issues and duplicate pages")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a directory tree and print the report
    Scan {
        /// Root directory of the site
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: commands::scan::OutputFormat,

        /// Also write the report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Near-duplicate threshold override (0.0 - 1.0)
        #[arg(short, long)]
        threshold: Option<f64>,
    },

    /// Write a default configuration file
    Init {
        /// Output directory
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load_or_default(&cli.config)?;

    // Setup logging
    let log_level = config.logging.level.raised(cli.verbose).to_tracing();
    let builder = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr);
    match config.logging.format {
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish())?,
    }

    match cli.command {
        Commands::Scan {
            root,
            format,
            output,
            threshold,
        } => commands::scan::run_scan(config, root, format, output, threshold),
        Commands::Init { path } => commands::init::init_config(path),
    }
}
