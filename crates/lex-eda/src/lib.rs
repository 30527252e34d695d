//! Exploratory Data Analysis Library
//!
//! A small exploratory analysis toolkit built with Rust and Polars.
//!
//! # Overview
//!
//! One run takes a CSV dataset from a local path or an HTTP(S) URL and:
//!
//! - **Inspection**: Shape, column types, the first rows and missing value counts
//! - **Cleaning**: Duplicate removal, median imputation and categorical detection
//! - **Analysis**: Descriptive statistics, value counts and Pearson correlations
//! - **Plotting**: Histograms, boxplots and a correlation heatmap as PNG files
//! - **Reporting**: A human-readable report stream delivered to a pluggable sink
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lex_eda::{AnalysisConfig, ConsoleSink, Pipeline};
//! use std::sync::Arc;
//!
//! let config = AnalysisConfig::builder()
//!     .source("https://example.com/data.csv")
//!     .output_dir("figures")
//!     .build()?;
//!
//! let summary = Pipeline::builder()
//!     .config(config)
//!     .report_sink(Arc::new(ConsoleSink::new()))
//!     .build()?
//!     .run()?;
//!
//! println!("Dropped {} duplicates", summary.duplicates_dropped);
//! ```
//!
//! # Using the stages directly
//!
//! Every stage is usable on its own and returns a value instead of printing:
//!
//! ```rust,ignore
//! use lex_eda::{Analyzer, DataCleaner, DataLoader, Inspector};
//!
//! let table = DataLoader::load("data/iris.csv")?;
//! println!("{}", Inspector::inspect(&table, 5));
//!
//! let cleaned = DataCleaner::default().clean(table)?;
//! let report = Analyzer::default().analyze(&cleaned.table)?;
//! println!("{}", report);
//! ```
//!
//! # Configuration
//!
//! Use [`AnalysisConfig`] to customize a run:
//!
//! ```rust,ignore
//! use lex_eda::config::*;
//!
//! let config = AnalysisConfig::builder()
//!     .histogram_bins(20)
//!     .categorical_ratio(0.3)
//!     .all_missing_policy(AllMissingPolicy::Fail)
//!     .build()?;
//! ```

pub mod analyzer;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod imputers;
pub mod inspector;
pub mod loader;
pub mod pipeline;
pub mod plotting;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use analyzer::{AnalysisReport, Analyzer, CorrelationMatrix, NumericSummary, ValueCounts};
pub use cleaner::{CleaningAction, CleaningOutcome, DataCleaner};
pub use config::{
    AllMissingPolicy, AnalysisConfig, AnalysisConfigBuilder, ConfigValidationError,
    DEFAULT_OUTPUT_DIR, DEFAULT_SOURCE,
};
pub use error::{EdaError, Result as EdaResult, ResultExt};
pub use imputers::StatisticalImputer;
pub use inspector::{InspectionReport, Inspector};
pub use loader::{DataLoader, SourceKind};
pub use pipeline::{
    AnalysisStage, ClosureReportSink, ConsoleSink, MemorySink, Pipeline, PipelineBuilder,
    ReportEntry, ReportSink, RunSummary,
};
pub use plotting::{FigureKind, FigureStyle, PlotEvent, PlotOutcome, Plotter};
pub use types::{ColumnKind, ColumnSchema, Table};
pub use utils::{DtypeCategory, fill_numeric_nulls, get_dtype_category, is_numeric_dtype};
