//! issuelens - issue lifecycle analytics
//!
//! Loads issue records from tracker exports, computes open durations,
//! per-label time-to-close means, monthly created/closed trends, and
//! bottleneck counts, and renders each result as a chart.

mod render;

use anyhow::{Context, Result};
use clap::Parser;
use issuelens_core::analytics::LifecycleAnalyzer;
use issuelens_core::source::{IssueSource, JsonExportSource};
use issuelens_core::Config;
use std::path::PathBuf;

use crate::render::{JsonSink, TextSink, TuiSink};

#[derive(Parser)]
#[command(name = "issuelens")]
#[command(about = "Analyze issue lifecycles from tracker exports")]
#[command(version)]
struct Args {
    /// Export file (.json or .jsonl) or a directory of export files.
    /// Defaults to the configured exports directory.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Restrict the time-to-close aggregation to issues carrying this label
    #[arg(short, long)]
    label: Option<String>,

    /// Output format: tui (default), text or json
    #[arg(short, long, default_value = "tui")]
    format: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    Config::ensure_xdg_env();

    let config = Config::load().context("failed to load configuration")?;

    // Logging goes to a file; stdout belongs to the rendered output
    let _log_guard =
        issuelens_core::logging::init(&config.logging).context("failed to initialize logging")?;

    tracing::info!("issuelens starting up");

    let source = match &args.input {
        Some(path) if path.is_dir() => JsonExportSource::from_dir(path)
            .context("failed to discover export files")?,
        Some(path) => JsonExportSource::from_file(path.clone()),
        None => JsonExportSource::from_dir(&config.exports_dir())
            .context("failed to discover export files")?,
    };

    let issues = source.issues().context("failed to load issues")?;
    tracing::info!(count = issues.len(), "Loaded issues");

    // The CLI flag wins over the configured filter
    let label_filter = args.label.or(config.analysis.label);
    if let Some(label) = &label_filter {
        tracing::info!(label = %label, "Restricting time-to-close aggregation");
    }

    let analyzer = LifecycleAnalyzer::new(label_filter);

    match args.format.as_str() {
        "json" => {
            let mut sink = JsonSink::new();
            analyzer.run(issues, &mut sink).context("analysis failed")?;
            sink.finish().context("failed to emit charts")?;
        }
        "text" => {
            let mut sink = TextSink;
            analyzer.run(issues, &mut sink).context("analysis failed")?;
        }
        "tui" => {
            let mut sink = TuiSink::new().context("failed to set up terminal")?;
            let result = analyzer.run(issues, &mut sink);
            // Restore the terminal before reporting any error
            drop(sink);
            result.context("analysis failed")?;
        }
        other => anyhow::bail!("unknown output format: {other} (expected tui, text or json)"),
    }

    tracing::info!("issuelens run complete");

    Ok(())
}
