//! Median imputation for numeric columns.

use crate::types::Table;
use crate::utils::fill_numeric_nulls;
use anyhow::Result;
use tracing::debug;

/// What [`StatisticalImputer::apply_numeric_median`] did to one column.
#[derive(Debug, Clone, PartialEq)]
pub enum ImputationResult {
    /// The column had no missing values
    Untouched,
    /// Missing cells were replaced by `median`
    Filled { median: f64, filled: usize },
    /// Every cell is missing, so no median exists; the column was left as is
    NoValues,
}

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Fill the missing cells of a numeric column with the median of its
    /// non-missing cells. The filled column becomes `Float64`.
    pub fn apply_numeric_median(table: &mut Table, col_name: &str) -> Result<ImputationResult> {
        let series = table.series(col_name)?;
        let missing = series.null_count();

        if missing == 0 {
            return Ok(ImputationResult::Untouched);
        }

        let Some(median) = series.median() else {
            debug!("Column '{}' has no values to take a median from", col_name);
            return Ok(ImputationResult::NoValues);
        };

        let filled = fill_numeric_nulls(series, median)?;
        table.replace_column(col_name, filled)?;
        debug!("Filled {} cells of '{}' with median {}", missing, col_name, median);

        Ok(ImputationResult::Filled {
            median,
            filled: missing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn table(df: DataFrame) -> Table {
        Table::from_frame(df).unwrap()
    }

    #[test]
    fn test_apply_numeric_median_basic() {
        let mut t = table(df!["values" => [Some(1.0), None, Some(3.0), None, Some(5.0)]].unwrap());

        let result = StatisticalImputer::apply_numeric_median(&mut t, "values").unwrap();
        assert_eq!(
            result,
            ImputationResult::Filled {
                median: 3.0,
                filled: 2
            }
        );

        let values = t.series("values").unwrap();
        assert_eq!(values.null_count(), 0);
        assert_eq!(values.get(1).unwrap().try_extract::<f64>().unwrap(), 3.0);
        assert_eq!(values.get(3).unwrap().try_extract::<f64>().unwrap(), 3.0);
    }

    #[test]
    fn test_apply_numeric_median_even_count() {
        let mut t = table(df!["v" => [Some(1i64), Some(2), None, Some(3), Some(10)]].unwrap());

        let result = StatisticalImputer::apply_numeric_median(&mut t, "v").unwrap();
        assert_eq!(
            result,
            ImputationResult::Filled {
                median: 2.5,
                filled: 1
            }
        );
        assert_eq!(t.series("v").unwrap().dtype(), &DataType::Float64);
    }

    #[test]
    fn test_apply_numeric_median_no_nulls() {
        let mut t = table(df!["values" => [1i64, 2, 3]].unwrap());

        let result = StatisticalImputer::apply_numeric_median(&mut t, "values").unwrap();
        assert_eq!(result, ImputationResult::Untouched);
        // Untouched columns keep their integer dtype
        assert_eq!(t.series("values").unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn test_apply_numeric_median_all_nulls() {
        let mut t = table(df!["values" => [Option::<f64>::None, None, None]].unwrap());

        let result = StatisticalImputer::apply_numeric_median(&mut t, "values").unwrap();
        assert_eq!(result, ImputationResult::NoValues);
        assert_eq!(t.series("values").unwrap().null_count(), 3);
    }

    #[test]
    fn test_apply_numeric_median_nonexistent_column() {
        let mut t = table(df!["other" => [1.0, 2.0]].unwrap());
        assert!(StatisticalImputer::apply_numeric_median(&mut t, "values").is_err());
    }
}
