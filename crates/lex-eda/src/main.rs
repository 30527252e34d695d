//! Exploratory analysis of one CSV dataset.
//!
//! Loads [`DEFAULT_SOURCE`], prints the inspection, cleaning and analysis
//! report to stdout and writes figures into [`DEFAULT_OUTPUT_DIR`].
//!
//! Diagnostics go to stderr and are controlled with `RUST_LOG`
//! (default `warn`):
//!
//! ```bash
//! RUST_LOG=lex_eda=debug lex-eda
//! ```

use anyhow::Result;
use lex_eda::{AnalysisConfig, ConsoleSink, DEFAULT_OUTPUT_DIR, DEFAULT_SOURCE, Pipeline};
use std::sync::Arc;
use tracing::info;

/// Initialize logging with the given default level.
fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout carries the report, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging("warn");

    let config = AnalysisConfig::builder()
        .source(DEFAULT_SOURCE)
        .output_dir(DEFAULT_OUTPUT_DIR)
        .build()?;

    let summary = Pipeline::builder()
        .config(config)
        .report_sink(Arc::new(ConsoleSink::new()))
        .build()?
        .run()?;

    info!(
        "{} rows analysed, {} figures written in {} ms",
        summary.rows_after_cleaning,
        summary.figures.len(),
        summary.duration_ms
    );
    Ok(())
}
