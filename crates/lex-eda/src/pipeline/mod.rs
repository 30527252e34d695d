//! Pipeline module.
//!
//! This module wires the loader, inspector, cleaner, analyzer and plotter
//! into one run and streams its report to a [`ReportSink`].

mod builder;
pub mod report;

pub use builder::{Pipeline, PipelineBuilder, RunSummary};
pub use report::{
    AnalysisStage, ClosureReportSink, ConsoleSink, MemorySink, ReportEntry, ReportSink,
};
