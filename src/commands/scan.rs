use anyhow::{Context, Result};
use sitescan::{config::Config, report, Scanner};
use std::path::PathBuf;
use tracing::info;

/// Report output format
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text report
    Text,
    /// Full report as JSON
    Json,
}

pub fn run_scan(
    mut config: Config,
    root: PathBuf,
    format: OutputFormat,
    output: Option<PathBuf>,
    threshold: Option<f64>,
) -> Result<()> {
    if let Some(t) = threshold {
        config.dedup.near_threshold = t;
        config.validate()?;
    }

    let scanner = Scanner::new(config);
    let report = scanner
        .scan_dir(&root)
        .with_context(|| format!("Scan of {} failed", root.display()))?;

    let rendered = match format {
        OutputFormat::Text => report::text::render(&report, &scanner.config().report),
        OutputFormat::Json => report::json::render(&report)?,
    };

    print!("{}", rendered);

    if let Some(path) = output {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, &rendered)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        info!("Report written to {}", path.display());
    }

    Ok(())
}
