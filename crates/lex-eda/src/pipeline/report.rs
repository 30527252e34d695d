//! The human-readable report stream of a pipeline run.
//!
//! Every line the tool prints is a [`ReportEntry`] handed to a
//! [`ReportSink`]. The binary prints them with [`ConsoleSink`]; library
//! callers and tests can collect them with [`MemorySink`] or react to them
//! with a closure.
//!
//! # Example
//!
//! ```rust,ignore
//! use lex_eda::{Pipeline, MemorySink};
//! use std::sync::Arc;
//!
//! let sink = Arc::new(MemorySink::new());
//! Pipeline::builder()
//!     .report_sink(sink.clone())
//!     .build()?
//!     .run()?;
//!
//! for line in sink.messages() {
//!     println!("{}", line);
//! }
//! ```

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Stages of an analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStage {
    /// Fetching or reading the source
    Loading,
    /// Shape, types, head and missing values
    Inspection,
    /// Deduplication, imputation and categorical conversion
    Cleaning,
    /// Descriptive statistics, value counts and correlations
    Analysis,
    /// Writing figures
    Plotting,
    /// Run finished successfully
    Complete,
    /// Run stopped with an error
    Failed,
}

impl AnalysisStage {
    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Loading => "Loading Data",
            Self::Inspection => "Inspecting Data",
            Self::Cleaning => "Cleaning Data",
            Self::Analysis => "Analyzing Data",
            Self::Plotting => "Plotting",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        }
    }
}

/// One block of report text, possibly spanning several lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub stage: AnalysisStage,
    pub message: String,
}

impl ReportEntry {
    pub fn new(stage: AnalysisStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }
}

/// Receiver of the report stream.
///
/// Implementations must be `Send + Sync` so a pipeline holding one can be
/// moved to a worker thread.
pub trait ReportSink: Send + Sync {
    fn report(&self, entry: ReportEntry);
}

/// Wrapper that implements [`ReportSink`] using a closure.
pub struct ClosureReportSink<F>
where
    F: Fn(ReportEntry) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureReportSink<F>
where
    F: Fn(ReportEntry) + Send + Sync,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ReportSink for ClosureReportSink<F>
where
    F: Fn(ReportEntry) + Send + Sync,
{
    fn report(&self, entry: ReportEntry) {
        (self.callback)(entry);
    }
}

/// Prints entries to stdout, with a blank line whenever the stage changes.
///
/// `Failed` entries are not printed; the binary reports the error itself.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    last_stage: Mutex<Option<AnalysisStage>>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportSink for ConsoleSink {
    fn report(&self, entry: ReportEntry) {
        if entry.stage == AnalysisStage::Failed {
            return;
        }

        let mut last = self.last_stage.lock();
        if last.is_some_and(|stage| stage != entry.stage) {
            println!();
        }
        *last = Some(entry.stage);
        println!("{}", entry.message);
    }
}

/// Keeps every entry in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<ReportEntry>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<ReportEntry> {
        self.entries.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .map(|e| e.message.clone())
            .collect()
    }

    /// Everything reported, one entry per line group.
    pub fn transcript(&self) -> String {
        self.messages().join("\n")
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.entries.lock().iter().any(|e| e.message.contains(needle))
    }
}

impl ReportSink for MemorySink {
    fn report(&self, entry: ReportEntry) {
        self.entries.lock().push(entry);
    }
}

static_assertions::assert_impl_all!(ReportEntry: Send, Sync);
static_assertions::assert_impl_all!(ConsoleSink: Send, Sync);
static_assertions::assert_impl_all!(MemorySink: Send, Sync);
