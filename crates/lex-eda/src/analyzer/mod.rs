//! Descriptive analysis of a cleaned table.
//!
//! The analyzer never mutates the table. It produces numeric summaries for
//! numeric columns, frequency tables for textual columns and, given at least
//! two numeric columns, their Pearson correlation matrix.

mod correlation;
mod statistics;

pub use correlation::{CorrelationMatrix, pearson_pairwise};
pub use statistics::{NumericSummary, SUMMARY_LABELS, ValueCounts};

use crate::reporting::{TextTable, format_number, section_header};
use crate::types::Table;
use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

/// Everything the analyzer computed.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub numeric: Vec<NumericSummary>,
    pub value_counts: Vec<ValueCounts>,
    /// `None` with fewer than two numeric columns.
    pub correlation: Option<CorrelationMatrix>,
}

/// Computes an [`AnalysisReport`].
#[derive(Debug, Clone)]
pub struct Analyzer {
    top_values: usize,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Analyzer {
    pub fn new(top_values: usize) -> Self {
        Self { top_values }
    }

    pub fn analyze(&self, table: &Table) -> Result<AnalysisReport> {
        info!("Analyzing {} columns", table.width());

        let numeric_columns = table.numeric_columns();

        let numeric = numeric_columns
            .iter()
            .map(|name| -> Result<NumericSummary> {
                Ok(NumericSummary::from_values(name, &table.numeric_values(name)?))
            })
            .collect::<Result<Vec<_>>>()?;

        let value_counts = table
            .schema()
            .iter()
            .filter(|c| c.kind.is_textual())
            .map(|c| -> Result<ValueCounts> {
                ValueCounts::compute(table.series(&c.name)?, self.top_values)
            })
            .collect::<Result<Vec<_>>>()?;

        let correlation = if numeric_columns.len() >= 2 {
            Some(Self::correlation(table, numeric_columns)?)
        } else {
            debug!("Fewer than two numeric columns; no correlation matrix");
            None
        };

        Ok(AnalysisReport {
            numeric,
            value_counts,
            correlation,
        })
    }

    /// Pearson correlation matrix of the given numeric columns.
    pub fn correlation(table: &Table, columns: Vec<String>) -> Result<CorrelationMatrix> {
        let data = columns
            .iter()
            .map(|name| -> Result<Vec<Option<f64>>> {
                let floats = table.series(name)?.cast(&DataType::Float64)?;
                Ok(floats.f64()?.into_iter().collect())
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(CorrelationMatrix::pearson(columns, &data))
    }
}

impl AnalysisReport {
    fn fmt_numeric(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}",
            section_header("Descriptive Statistics (Numeric Columns)")
        )?;
        if self.numeric.is_empty() {
            return writeln!(f, "No numeric columns detected.");
        }

        // One row per column, one statistic per cell
        let mut table = TextTable::new(SUMMARY_LABELS);
        for summary in &self.numeric {
            table.push_row(
                summary.column.clone(),
                summary.values().iter().map(|v| format_number(*v)).collect(),
            );
        }
        write!(f, "{}", table)
    }

    fn fmt_value_counts(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", section_header("Value Counts (Categorical Columns)"))?;
        if self.value_counts.is_empty() {
            return writeln!(f, "No categorical columns detected.");
        }

        for counts in &self.value_counts {
            writeln!(f, "-- Column: {} --", counts.column)?;
            let mut table = TextTable::new(["count"]);
            for (value, count) in &counts.entries {
                table.push_row(value.clone(), vec![count.to_string()]);
            }
            writeln!(f, "{}", table)?;
        }
        Ok(())
    }

    fn fmt_correlation(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}",
            section_header("Correlation Matrix (Numeric Columns)")
        )?;
        let Some(matrix) = &self.correlation else {
            return write!(f, "Not enough numeric columns to compute correlations.");
        };

        let mut table = TextTable::new(matrix.columns.iter().cloned());
        for (i, name) in matrix.columns.iter().enumerate() {
            table.push_row(
                name.clone(),
                (0..matrix.len())
                    .map(|j| format_number(matrix.get(i, j)))
                    .collect(),
            );
        }
        write!(f, "{}", table)
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_numeric(f)?;
        writeln!(f)?;
        self.fmt_value_counts(f)?;
        writeln!(f)?;
        self.fmt_correlation(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColumnKind;

    fn table() -> Table {
        let df = df![
            "a" => [1.0, 2.0, 3.0, 4.0],
            "b" => [2.0, 4.0, 6.0, 8.0],
            "c" => ["x", "y", "x", "x"],
        ]
        .unwrap();
        let mut table = Table::from_frame(df).unwrap();
        table.set_kind("c", ColumnKind::Categorical).unwrap();
        table
    }

    #[test]
    fn test_analyze() {
        let report = Analyzer::default().analyze(&table()).unwrap();

        assert_eq!(report.numeric.len(), 2);
        assert_eq!(report.numeric[1].mean, 5.0);
        assert_eq!(report.value_counts.len(), 1);
        assert_eq!(report.value_counts[0].entries[0], ("x".to_string(), 3));

        let matrix = report.correlation.unwrap();
        assert_eq!(matrix.columns, vec!["a", "b"]);
        assert!((matrix.get(0, 1) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_display_sections() {
        let rendered = Analyzer::default().analyze(&table()).unwrap().to_string();

        assert!(rendered.contains("=== Descriptive Statistics (Numeric Columns) ==="));
        assert!(rendered.contains("=== Value Counts (Categorical Columns) ==="));
        assert!(rendered.contains("-- Column: c --"));
        assert!(rendered.contains("=== Correlation Matrix (Numeric Columns) ==="));
        assert!(rendered.contains("2.500000"));
    }

    #[test]
    fn test_single_numeric_column() {
        let df = df!["only" => [1i64, 2, 3]].unwrap();
        let report = Analyzer::default()
            .analyze(&Table::from_frame(df).unwrap())
            .unwrap();

        assert!(report.correlation.is_none());
        let rendered = report.to_string();
        assert!(rendered.contains("Not enough numeric columns to compute correlations."));
        assert!(rendered.contains("No categorical columns detected."));
    }

    #[test]
    fn test_does_not_mutate() {
        let table = table();
        let before = table.frame().clone();
        let _ = Analyzer::default().analyze(&table).unwrap();
        assert!(table.frame().equals_missing(&before));
    }
}
