//! Figure rendering for numeric columns.
//!
//! Every numeric column gets a histogram and a boxplot; two or more numeric
//! columns also get a correlation heatmap. Figures are PNG rasters written
//! with plotters' bitmap backend. The [`Plotter`] reports what it did as an
//! ordered list of [`PlotEvent`]s instead of printing.

mod boxplot;
mod colormap;
mod heatmap;
mod histogram;

pub use boxplot::{BoxStats, WHISKER_IQR};
pub use colormap::{MISSING_COLOR, rdbu_r};
pub use histogram::HistogramBins;

use crate::analyzer::Analyzer;
use crate::config::AnalysisConfig;
use crate::types::Table;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Sizes and font shared by all figures.
#[derive(Debug, Clone)]
pub struct FigureStyle {
    /// Histogram and boxplot raster size (6×4 in)
    pub small_figure: (u32, u32),
    /// Heatmap raster size (8×6 in)
    pub large_figure: (u32, u32),
    pub histogram_bins: usize,
    pub font: &'static str,
}

impl Default for FigureStyle {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

impl FigureStyle {
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            small_figure: config.figure_pixels(6.0, 4.0),
            large_figure: config.figure_pixels(8.0, 6.0),
            histogram_bins: config.histogram_bins,
            font: "sans-serif",
        }
    }
}

/// The three figure types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FigureKind {
    Histogram,
    Boxplot,
    CorrelationHeatmap,
}

impl FigureKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Histogram => "histogram",
            Self::Boxplot => "boxplot",
            Self::CorrelationHeatmap => "correlation heatmap",
        }
    }

    /// Section announcement printed before a batch of figures.
    pub fn announcement(&self) -> &'static str {
        match self {
            Self::Histogram => "Generating histograms for numeric columns...",
            Self::Boxplot => "Generating boxplots for numeric columns...",
            Self::CorrelationHeatmap => "Generating correlation heatmap...",
        }
    }
}

/// One step of the plotting stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PlotEvent {
    /// A batch of figures is about to be rendered
    Started { kind: FigureKind },
    Saved { kind: FigureKind, path: PathBuf },
    Skipped { reason: String },
}

impl fmt::Display for PlotEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started { kind } => write!(f, "{}", kind.announcement()),
            Self::Saved { kind, path } => write!(f, "Saved {}: {}", kind.label(), path.display()),
            Self::Skipped { reason } => write!(f, "{}", reason),
        }
    }
}

/// Everything the plotting stage did, in order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlotOutcome {
    pub events: Vec<PlotEvent>,
}

impl PlotOutcome {
    /// Paths of every figure written.
    pub fn figures(&self) -> Vec<PathBuf> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PlotEvent::Saved { path, .. } => Some(path.clone()),
                _ => None,
            })
            .collect()
    }
}

/// Message used when a table has nothing to plot.
pub const NO_NUMERIC_COLUMNS: &str = "No numeric columns found\u{2014}skipping plotting.";

/// Message used when a heatmap would have a single cell.
pub const HEATMAP_SKIPPED: &str = "Skipping correlation heatmap: not enough numeric columns.";

/// Target file for a figure of `column`. Path separators in the column name
/// become `_`; everything else is kept verbatim.
pub fn figure_path(output_dir: &Path, column: &str, kind: FigureKind) -> PathBuf {
    let file_name = match kind {
        FigureKind::Histogram => format!("{}_histogram.png", sanitize_file_stem(column)),
        FigureKind::Boxplot => format!("{}_boxplot.png", sanitize_file_stem(column)),
        FigureKind::CorrelationHeatmap => "correlation_heatmap.png".to_string(),
    };
    output_dir.join(file_name)
}

fn sanitize_file_stem(name: &str) -> String {
    name.chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect()
}

/// Renders the figures of a cleaned table into one directory.
pub struct Plotter {
    output_dir: PathBuf,
    style: FigureStyle,
}

impl Plotter {
    /// The directory must already exist.
    pub fn new(output_dir: impl Into<PathBuf>, style: FigureStyle) -> Self {
        Self {
            output_dir: output_dir.into(),
            style,
        }
    }

    /// Histograms, then boxplots, then the heatmap.
    pub fn render_all(&self, table: &Table) -> Result<PlotOutcome> {
        let mut outcome = PlotOutcome::default();
        let numeric = table.numeric_columns();

        if numeric.is_empty() {
            info!("No numeric columns to plot");
            outcome.events.push(PlotEvent::Skipped {
                reason: NO_NUMERIC_COLUMNS.to_string(),
            });
            return Ok(outcome);
        }

        outcome.events.push(PlotEvent::Started {
            kind: FigureKind::Histogram,
        });
        for column in &numeric {
            outcome.events.push(self.render_histogram(table, column)?);
        }

        outcome.events.push(PlotEvent::Started {
            kind: FigureKind::Boxplot,
        });
        for column in &numeric {
            outcome.events.push(self.render_boxplot(table, column)?);
        }

        outcome.events.push(PlotEvent::Started {
            kind: FigureKind::CorrelationHeatmap,
        });
        outcome.events.push(self.render_heatmap(table, numeric)?);

        info!("Wrote {} figures", outcome.figures().len());
        Ok(outcome)
    }

    pub fn render_histogram(&self, table: &Table, column: &str) -> Result<PlotEvent> {
        let values = table.numeric_values(column)?;
        let Some(bins) = HistogramBins::compute(&values, self.style.histogram_bins) else {
            return Ok(Self::skip_empty(column, FigureKind::Histogram));
        };

        let path = figure_path(&self.output_dir, column, FigureKind::Histogram);
        histogram::draw_histogram(&path, column, &bins, &self.style)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        debug!("Histogram of '{}' written to {}", column, path.display());

        Ok(PlotEvent::Saved {
            kind: FigureKind::Histogram,
            path,
        })
    }

    pub fn render_boxplot(&self, table: &Table, column: &str) -> Result<PlotEvent> {
        let values = table.numeric_values(column)?;
        let Some(stats) = BoxStats::compute(&values) else {
            return Ok(Self::skip_empty(column, FigureKind::Boxplot));
        };

        let path = figure_path(&self.output_dir, column, FigureKind::Boxplot);
        boxplot::draw_boxplot(&path, column, &stats, &self.style)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        debug!("Boxplot of '{}' written to {}", column, path.display());

        Ok(PlotEvent::Saved {
            kind: FigureKind::Boxplot,
            path,
        })
    }

    /// Heatmap of the given numeric columns, skipped with fewer than two.
    pub fn render_heatmap(&self, table: &Table, columns: Vec<String>) -> Result<PlotEvent> {
        if columns.len() < 2 {
            return Ok(PlotEvent::Skipped {
                reason: HEATMAP_SKIPPED.to_string(),
            });
        }

        let matrix = Analyzer::correlation(table, columns)?;
        let path = figure_path(&self.output_dir, "", FigureKind::CorrelationHeatmap);
        heatmap::draw_heatmap(&path, &matrix, &self.style)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(PlotEvent::Saved {
            kind: FigureKind::CorrelationHeatmap,
            path,
        })
    }

    fn skip_empty(column: &str, kind: FigureKind) -> PlotEvent {
        warn!("Column '{}' has no values; no {} drawn", column, kind.label());
        PlotEvent::Skipped {
            reason: format!(
                "Skipping {} of '{}': column has no non-missing values.",
                kind.label(),
                column
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_figure_path() {
        let dir = Path::new("figures");
        assert_eq!(
            figure_path(dir, "sepal_length", FigureKind::Histogram),
            PathBuf::from("figures/sepal_length_histogram.png")
        );
        assert_eq!(
            figure_path(dir, "a/b", FigureKind::Boxplot),
            PathBuf::from("figures/a_b_boxplot.png")
        );
        assert_eq!(
            figure_path(dir, "ignored", FigureKind::CorrelationHeatmap),
            PathBuf::from("figures/correlation_heatmap.png")
        );
    }

    #[test]
    fn test_event_messages() {
        let saved = PlotEvent::Saved {
            kind: FigureKind::CorrelationHeatmap,
            path: PathBuf::from("figures/correlation_heatmap.png"),
        };
        assert_eq!(
            saved.to_string(),
            "Saved correlation heatmap: figures/correlation_heatmap.png"
        );
        assert_eq!(
            PlotEvent::Started {
                kind: FigureKind::Boxplot
            }
            .to_string(),
            "Generating boxplots for numeric columns..."
        );
    }

    #[test]
    fn test_figure_style_from_config() {
        let style = FigureStyle::default();
        assert_eq!(style.small_figure, (900, 600));
        assert_eq!(style.large_figure, (1200, 900));
        assert_eq!(style.histogram_bins, 30);
    }

    #[test]
    fn test_no_numeric_columns() {
        let df = df!["t" => ["a", "b"]].unwrap();
        let table = Table::from_frame(df).unwrap();
        let plotter = Plotter::new("unused", FigureStyle::default());

        let outcome = plotter.render_all(&table).unwrap();
        assert_eq!(
            outcome.events,
            vec![PlotEvent::Skipped {
                reason: NO_NUMERIC_COLUMNS.to_string()
            }]
        );
        assert!(outcome.figures().is_empty());
    }

    #[test]
    fn test_heatmap_skipped_for_single_column() {
        let df = df!["x" => [1.0, 2.0]].unwrap();
        let table = Table::from_frame(df).unwrap();
        let plotter = Plotter::new("unused", FigureStyle::default());

        let event = plotter.render_heatmap(&table, table.numeric_columns()).unwrap();
        assert_eq!(event.to_string(), HEATMAP_SKIPPED);
    }

    #[test]
    fn test_all_missing_column_is_skipped() {
        let df = df!["empty" => [Option::<f64>::None, None]].unwrap();
        let table = Table::from_frame(df).unwrap();
        let plotter = Plotter::new("unused", FigureStyle::default());

        let event = plotter.render_histogram(&table, "empty").unwrap();
        assert!(matches!(event, PlotEvent::Skipped { .. }));
    }
}
