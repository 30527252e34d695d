//! The in-memory table and its column classification.
//!
//! Every column is tagged exactly once, when the [`Table`] is built from a
//! polars frame. Later stages ask the table for a column's [`ColumnKind`]
//! instead of re-deriving it from the backend dtype, so a text column the
//! cleaner reclassifies as categorical stays categorical for the analyzer.

use crate::error::EdaError;
use crate::utils::{DtypeCategory, get_dtype_category, is_numeric_dtype, numeric_values};
use anyhow::{Result, anyhow};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Integer or float values
    Numeric,
    /// Free text
    Text,
    /// Text with a bounded set of distinct values
    Categorical,
    /// Booleans, dates and anything else
    Other,
}

impl ColumnKind {
    /// Label shown in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Text => "text",
            Self::Categorical => "category",
            Self::Other => "other",
        }
    }

    /// Categorical and text columns both get value counts.
    pub fn is_textual(&self) -> bool {
        matches!(self, Self::Text | Self::Categorical)
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name and kind of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    pub kind: ColumnKind,
}

/// A polars frame plus one [`ColumnSchema`] per column, in frame order.
#[derive(Debug, Clone)]
pub struct Table {
    frame: DataFrame,
    schema: Vec<ColumnSchema>,
}

impl Table {
    /// Classify every column of `frame` and wrap it.
    ///
    /// A non-empty column without a single value is read as numeric, like an
    /// all-blank CSV column would be by a float-defaulting reader; its cells
    /// are cast to `Float64` so the cleaner can treat it uniformly.
    pub fn from_frame(frame: DataFrame) -> Result<Self> {
        let mut frame = frame;
        let mut schema = Vec::with_capacity(frame.width());
        let height = frame.height();

        let names: Vec<String> = frame
            .get_column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();

        for name in &names {
            let series = frame.column(name)?.as_materialized_series().clone();
            let all_missing = height > 0 && series.null_count() == height;

            let kind = if all_missing {
                if !is_numeric_dtype(series.dtype()) {
                    let floats = series.cast(&DataType::Float64)?;
                    frame.replace(name, floats)?;
                }
                ColumnKind::Numeric
            } else {
                match get_dtype_category(series.dtype()) {
                    DtypeCategory::Numeric => ColumnKind::Numeric,
                    DtypeCategory::String => ColumnKind::Text,
                    _ => ColumnKind::Other,
                }
            };

            schema.push(ColumnSchema {
                name: name.clone(),
                kind,
            });
        }

        Ok(Self { frame, schema })
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.frame.width()
    }

    /// The underlying frame.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Column schemas in frame order.
    pub fn schema(&self) -> &[ColumnSchema] {
        &self.schema
    }

    /// Kind of the named column, if it exists.
    pub fn kind_of(&self, name: &str) -> Option<ColumnKind> {
        self.schema.iter().find(|c| c.name == name).map(|c| c.kind)
    }

    /// Names of all columns of the given kind, in frame order.
    pub fn columns_of(&self, kind: ColumnKind) -> Vec<String> {
        self.schema
            .iter()
            .filter(|c| c.kind == kind)
            .map(|c| c.name.clone())
            .collect()
    }

    /// Names of all numeric columns, in frame order.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.columns_of(ColumnKind::Numeric)
    }

    /// Materialized series for a column.
    pub fn series(&self, name: &str) -> Result<&Series> {
        let column = self
            .frame
            .column(name)
            .map_err(|_| EdaError::ColumnNotFound(name.to_string()))?;
        Ok(column.as_materialized_series())
    }

    /// Non-missing values of a numeric column as `f64`.
    pub fn numeric_values(&self, name: &str) -> Result<Vec<f64>> {
        match self.kind_of(name) {
            Some(ColumnKind::Numeric) => Ok(numeric_values(self.series(name)?)?),
            Some(kind) => Err(anyhow!("Column '{}' is {}, not numeric", name, kind)),
            None => Err(EdaError::ColumnNotFound(name.to_string()).into()),
        }
    }

    /// Missing-value count per column, in frame order (zeros included).
    pub fn missing_counts(&self) -> Vec<(String, usize)> {
        self.frame
            .get_columns()
            .iter()
            .map(|c| (c.name().to_string(), c.null_count()))
            .collect()
    }

    /// Columns with at least one missing value.
    pub fn columns_with_missing(&self) -> Vec<(String, usize)> {
        self.missing_counts()
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .collect()
    }

    pub(crate) fn replace_frame(&mut self, frame: DataFrame) {
        debug_assert_eq!(frame.width(), self.schema.len());
        self.frame = frame;
    }

    pub(crate) fn replace_column(&mut self, name: &str, series: Series) -> Result<()> {
        self.frame.replace(name, series)?;
        Ok(())
    }

    pub(crate) fn set_kind(&mut self, name: &str, kind: ColumnKind) -> Result<()> {
        let column = self
            .schema
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| EdaError::ColumnNotFound(name.to_string()))?;
        column.kind = kind;
        Ok(())
    }
}
