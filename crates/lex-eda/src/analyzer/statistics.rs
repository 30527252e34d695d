//! Per-column summary statistics.

use crate::utils::{mean, quantile_sorted, sample_std, sorted};
use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

/// Row labels of the descriptive statistics table, in display order.
pub const SUMMARY_LABELS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Descriptive statistics of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1)
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

impl NumericSummary {
    /// Summarize the non-missing values of a column. No values gives count 0
    /// and NaN everywhere else.
    pub fn from_values(column: impl Into<String>, values: &[f64]) -> Self {
        let data = sorted(values);
        let (min, max) = match (data.first(), data.last()) {
            (Some(lo), Some(hi)) => (*lo, *hi),
            _ => (f64::NAN, f64::NAN),
        };

        Self {
            column: column.into(),
            count: data.len(),
            mean: mean(&data),
            std: sample_std(&data),
            min,
            q25: quantile_sorted(&data, 0.25),
            q50: quantile_sorted(&data, 0.5),
            q75: quantile_sorted(&data, 0.75),
            max,
        }
    }

    /// Values in [`SUMMARY_LABELS`] order.
    pub fn values(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.q50,
            self.q75,
            self.max,
        ]
    }
}

/// Most frequent values of a textual column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueCounts {
    pub column: String,
    /// `(value, count)` by descending count; ties keep first-seen order.
    pub entries: Vec<(String, usize)>,
}

impl ValueCounts {
    /// Count the non-missing values of `series` and keep the `top` largest.
    pub fn compute(series: &Series, top: usize) -> Result<Self> {
        let strings = series.cast(&DataType::String)?;

        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut entries: Vec<(String, usize)> = Vec::new();

        for value in strings.str()?.into_iter().flatten() {
            match positions.get(value) {
                Some(&idx) => entries[idx].1 += 1,
                None => {
                    positions.insert(value.to_string(), entries.len());
                    entries.push((value.to_string(), 1));
                }
            }
        }

        // Stable sort keeps first-seen order among equal counts
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(top);

        Ok(Self {
            column: series.name().to_string(),
            entries,
        })
    }
}
