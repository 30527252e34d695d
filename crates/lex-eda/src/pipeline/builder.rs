//! Main analysis pipeline module.
//!
//! This module provides the core `Pipeline` struct and builder for
//! orchestrating one load-inspect-clean-analyze-plot run.

use crate::analyzer::{AnalysisReport, Analyzer};
use crate::cleaner::DataCleaner;
use crate::config::AnalysisConfig;
use crate::error::{EdaError, Result, ResultExt};
use polars::error::PolarsError;
use crate::inspector::Inspector;
use crate::loader::DataLoader;
use crate::pipeline::report::{
    AnalysisStage, ClosureReportSink, ReportEntry, ReportSink,
};
use crate::plotting::{FigureStyle, Plotter};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// What a completed run did.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub source: String,
    pub output_dir: PathBuf,
    pub rows_loaded: usize,
    pub rows_after_cleaning: usize,
    pub duplicates_dropped: usize,
    pub imputed_columns: Vec<String>,
    pub categorical_columns: Vec<String>,
    /// Numeric columns left missing because they had no value at all
    pub all_missing_columns: Vec<String>,
    pub analysis: AnalysisReport,
    pub figures: Vec<PathBuf>,
    pub duration_ms: u64,
}

/// The main analysis pipeline.
///
/// Use [`Pipeline::builder()`] to create a new pipeline with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use lex_eda::{AnalysisConfig, ConsoleSink, Pipeline};
/// use std::sync::Arc;
///
/// let config = AnalysisConfig::builder()
///     .source("data/iris.csv")
///     .output_dir("figures")
///     .build()?;
///
/// let summary = Pipeline::builder()
///     .config(config)
///     .report_sink(Arc::new(ConsoleSink::new()))
///     .build()?
///     .run()?;
///
/// println!("{} figures written", summary.figures.len());
/// ```
pub struct Pipeline {
    config: AnalysisConfig,
    report_sink: Option<Arc<dyn ReportSink>>,
    cleaner: DataCleaner,
    analyzer: Analyzer,
    style: FigureStyle,
}

// Ensure Pipeline is Send (can be moved to another thread)
static_assertions::assert_impl_all!(Pipeline: Send);

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("has_report_sink", &self.report_sink.is_some())
            .field("cleaner", &self.cleaner)
            .field("analyzer", &self.analyzer)
            .field("style", &self.style)
            .finish()
    }
}

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run every stage once against the configured source.
    ///
    /// # Errors
    ///
    /// Returns [`EdaError::SourceUnreadable`] when the source cannot be
    /// loaded, and a stage-specific variant for anything that fails later.
    pub fn run(&self) -> Result<RunSummary> {
        match self.run_internal() {
            Ok(summary) => Ok(summary),
            Err(e) => {
                self.report(AnalysisStage::Failed, e.to_string());
                error!("Pipeline error: {}", e);
                Err(e)
            }
        }
    }

    /// Report to the sink if one is configured.
    fn report(&self, stage: AnalysisStage, message: impl Into<String>) {
        if let Some(sink) = &self.report_sink {
            sink.report(ReportEntry::new(stage, message));
        }
    }

    fn run_internal(&self) -> Result<RunSummary> {
        let start_time = Instant::now();
        let source = self.config.source.as_str();
        let output_dir = &self.config.output_dir;

        std::fs::create_dir_all(output_dir)
            .map_err(EdaError::from)
            .context(format!("Creating output directory {}", output_dir.display()))?;

        // Step 1: Load
        info!("Step 1: Loading {}", source);
        self.report(AnalysisStage::Loading, format!("Loading data from: {}", source));
        let table = DataLoader::load(source)?;
        let rows_loaded = table.height();

        // Step 2: Inspect
        info!("Step 2: Inspecting {} rows", rows_loaded);
        let inspection = Inspector::inspect(&table, self.config.head_rows);
        self.report(AnalysisStage::Inspection, inspection.to_string());

        // Step 3: Clean
        info!("Step 3: Cleaning...");
        let cleaned = self
            .cleaner
            .clean(table)
            .map_err(|e| stage_error(AnalysisStage::Cleaning, e))?;
        for action in &cleaned.actions {
            self.report(AnalysisStage::Cleaning, action.to_string());
        }
        self.report(AnalysisStage::Cleaning, cleaned.missing_check());

        // Step 4: Analyze
        info!("Step 4: Analyzing...");
        let analysis = self
            .analyzer
            .analyze(&cleaned.table)
            .map_err(|e| stage_error(AnalysisStage::Analysis, e))?;
        self.report(AnalysisStage::Analysis, analysis.to_string());

        // Step 5: Plot
        info!("Step 5: Plotting into {}", output_dir.display());
        let plotter = Plotter::new(output_dir.clone(), self.style.clone());
        let plots = plotter
            .render_all(&cleaned.table)
            .map_err(|e| stage_error(AnalysisStage::Plotting, e))?;
        for event in &plots.events {
            self.report(AnalysisStage::Plotting, event.to_string());
        }

        self.report(
            AnalysisStage::Complete,
            format!(
                "Data analysis complete. Figures saved in: {}",
                output_dir.display()
            ),
        );

        let duration_ms = start_time.elapsed().as_millis() as u64;
        info!("Run finished in {} ms", duration_ms);

        Ok(RunSummary {
            source: source.to_string(),
            output_dir: output_dir.clone(),
            rows_loaded,
            rows_after_cleaning: cleaned.table.height(),
            duplicates_dropped: cleaned.duplicates_dropped(),
            imputed_columns: cleaned.imputed_columns(),
            categorical_columns: cleaned.categorical_columns(),
            all_missing_columns: cleaned.all_missing_columns(),
            analysis,
            figures: plots.figures(),
            duration_ms,
        })
    }
}

/// Map a stage failure to its [`EdaError`] variant, keeping typed errors
/// raised inside the stage as they are. Backend errors keep their polars
/// type and gain the stage name as context.
fn stage_error(stage: AnalysisStage, error: anyhow::Error) -> EdaError {
    let error = match error.downcast::<EdaError>() {
        Ok(typed) => return typed,
        Err(other) => other,
    };
    match error.downcast::<PolarsError>() {
        Ok(polars) => EdaError::Polars(polars).with_context(stage.display_name()),
        Err(other) => {
            let message = format!("{:#}", other);
            match stage {
                AnalysisStage::Cleaning => EdaError::CleaningFailed(message),
                AnalysisStage::Analysis => EdaError::AnalysisFailed(message),
                _ => EdaError::PlottingFailed(message),
            }
        }
    }
}

/// Builder for creating a [`Pipeline`] instance.
///
/// Use [`Pipeline::builder()`] to get started.
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<AnalysisConfig>,
    report_sink: Option<Arc<dyn ReportSink>>,
}

// Ensure PipelineBuilder is Send (can be moved to another thread during construction)
static_assertions::assert_impl_all!(PipelineBuilder: Send);

impl PipelineBuilder {
    /// Set the run configuration.
    pub fn config(mut self, config: AnalysisConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the sink receiving the report stream.
    pub fn report_sink(mut self, sink: Arc<dyn ReportSink>) -> Self {
        self.report_sink = Some(sink);
        self
    }

    /// Set a report callback closure.
    ///
    /// This is a convenience method for simple report handling.
    /// For more complex scenarios, use [`report_sink`](Self::report_sink).
    pub fn on_report<F>(mut self, callback: F) -> Self
    where
        F: Fn(ReportEntry) + Send + Sync + 'static,
    {
        self.report_sink = Some(Arc::new(ClosureReportSink::new(callback)));
        self
    }

    /// Build the pipeline.
    ///
    /// Returns [`EdaError::InvalidConfig`] if the configuration is invalid.
    pub fn build(self) -> Result<Pipeline> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(Pipeline {
            cleaner: DataCleaner::from_config(&config),
            analyzer: Analyzer::new(config.top_values),
            style: FigureStyle::from_config(&config),
            report_sink: self.report_sink,
            config,
        })
    }
}
