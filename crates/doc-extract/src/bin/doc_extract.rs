//! Bulk document to text converter
//!
//! Run with: cargo run -p doc-extract -- --input-dir Documentos

use clap::Parser;
use doc_extract::{install_panic_hook, ExtractConfig, Pipeline, ReportFormat};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "doc-extract", version, about = "Convert a directory of PDF and HTML documents to plain text")]
struct Cli {
    /// TOML config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory scanned for .pdf/.html files
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Directory receiving the extracted .txt files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Where the run report is written
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// Number of read workers
    #[arg(long)]
    read_workers: Option<usize>,

    /// Number of extraction workers
    #[arg(long)]
    extract_workers: Option<usize>,

    /// Capacity of the read -> extraction hand-off queue
    #[arg(long)]
    handoff_capacity: Option<usize>,

    /// Write the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Count HTML files that are not valid UTF-8 as errors
    #[arg(long)]
    strict_utf8: bool,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<ExtractConfig> {
        let mut config = match &self.config {
            Some(path) => ExtractConfig::from_file(path)?,
            None => ExtractConfig::default(),
        };

        if let Some(dir) = self.input_dir {
            config.input_dir = dir;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(path) = self.report {
            config.report_path = path;
        }
        if let Some(n) = self.read_workers {
            config.read_workers = n;
        }
        if let Some(n) = self.extract_workers {
            config.extract_workers = n;
        }
        if let Some(n) = self.handoff_capacity {
            config.handoff_capacity = n;
        }
        if self.json {
            config.report_format = ReportFormat::Json;
        }
        if self.strict_utf8 {
            config.strict_utf8 = true;
        }

        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout only carries the final summary line
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doc_extract=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    // Extractor panics are counted as parse errors, not printed
    install_panic_hook();

    let config = Cli::parse().into_config()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Input: {}", config.input_dir.display());
    tracing::info!("  - Output: {}", config.output_dir.display());
    tracing::info!(
        "  - Workers: {} read / {} extract",
        config.read_workers,
        config.extract_workers
    );

    let report_path = config.report_path.clone();
    let pipeline = Pipeline::with_default_extractors(config)?;
    let report = pipeline.run()?;

    println!(
        "Processed {} documents in {:.2}s, report written to {}",
        report.total_documents(),
        report.total_elapsed.as_secs_f64(),
        report_path.display()
    );

    Ok(())
}
