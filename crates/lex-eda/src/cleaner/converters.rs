//! Kind conversions applied during cleaning.

use crate::types::{ColumnKind, Table};
use anyhow::Result;
use polars::prelude::*;
use tracing::debug;

/// Distinct non-missing values of a column.
pub fn distinct_count(series: &Series) -> PolarsResult<usize> {
    series.drop_nulls().n_unique()
}

/// Whether `distinct` values over `rows` rows make a text column categorical.
///
/// The comparison is strict, so exactly half distinct stays text.
pub fn is_low_cardinality(distinct: usize, rows: usize, ratio: f64) -> bool {
    (distinct as f64) < ratio * rows as f64
}

/// Retag a text column as categorical when it has few distinct values.
///
/// Returns the distinct count when the column was converted. The cells are
/// not touched; only the column's kind changes.
pub fn text_to_categorical(table: &mut Table, col_name: &str, ratio: f64) -> Result<Option<usize>> {
    let distinct = distinct_count(table.series(col_name)?)?;

    if !is_low_cardinality(distinct, table.height(), ratio) {
        debug!(
            "Column '{}' keeps text kind ({} distinct of {} rows)",
            col_name,
            distinct,
            table.height()
        );
        return Ok(None);
    }

    table.set_kind(col_name, ColumnKind::Categorical)?;
    Ok(Some(distinct))
}
