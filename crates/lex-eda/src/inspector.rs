//! Read-only first look at a freshly loaded table.

use crate::reporting::{TextTable, section_header};
use crate::types::{ColumnKind, Table};
use polars::prelude::*;
use serde::Serialize;
use std::fmt;

/// Declared type of one column as seen by the inspector.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnTypeInfo {
    pub name: String,
    /// Backend dtype, e.g. `i64`, `f64`, `str`
    pub dtype: String,
    pub kind: ColumnKind,
}

/// Shape, types, head rows and missing values of a table.
#[derive(Debug, Clone, Serialize)]
pub struct InspectionReport {
    pub rows: usize,
    pub columns: usize,
    pub column_types: Vec<ColumnTypeInfo>,
    #[serde(skip)]
    pub head: DataFrame,
    pub head_rows: usize,
    /// Only columns with at least one missing value, in frame order.
    pub missing: Vec<(String, usize)>,
}

/// Produces an [`InspectionReport`]; never mutates the table.
pub struct Inspector;

impl Inspector {
    pub fn inspect(table: &Table, head_rows: usize) -> InspectionReport {
        let column_types = table
            .schema()
            .iter()
            .zip(table.frame().get_columns())
            .map(|(schema, column)| ColumnTypeInfo {
                name: schema.name.clone(),
                dtype: column.dtype().to_string(),
                kind: schema.kind,
            })
            .collect();

        InspectionReport {
            rows: table.height(),
            columns: table.width(),
            column_types,
            head: table.frame().head(Some(head_rows)),
            head_rows,
            missing: table.columns_with_missing(),
        }
    }
}

impl fmt::Display for InspectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", section_header("Dataframe Shape"))?;
        writeln!(f, "Rows: {}, Columns: {}", self.rows, self.columns)?;
        writeln!(f)?;

        writeln!(f, "{}", section_header("Column Data Types"))?;
        let mut types = TextTable::new(["dtype", "kind"]);
        for info in &self.column_types {
            types.push_row(
                info.name.clone(),
                vec![info.dtype.clone(), info.kind.to_string()],
            );
        }
        writeln!(f, "{}", types)?;

        writeln!(
            f,
            "{}",
            section_header(&format!("Head (first {} rows)", self.head_rows))
        )?;
        writeln!(f, "{}", self.head)?;
        writeln!(f)?;

        writeln!(f, "{}", section_header("Summary of Missing Values"))?;
        if self.missing.is_empty() {
            write!(f, "No missing values detected.")
        } else {
            let mut missing = TextTable::new(["missing"]);
            for (name, count) in &self.missing {
                missing.push_row(name.clone(), vec![count.to_string()]);
            }
            write!(f, "{}", missing)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        let df = df![
            "a" => [Some(1i64), None, Some(3), Some(4), Some(5), Some(6)],
            "b" => ["x", "y", "x", "y", "x", "y"],
        ]
        .unwrap();
        Table::from_frame(df).unwrap()
    }

    #[test]
    fn test_inspect_shape_and_types() {
        let report = Inspector::inspect(&table(), 5);

        assert_eq!(report.rows, 6);
        assert_eq!(report.columns, 2);
        assert_eq!(report.column_types[0].dtype, "i64");
        assert_eq!(report.column_types[0].kind, ColumnKind::Numeric);
        assert_eq!(report.column_types[1].kind, ColumnKind::Text);
        assert_eq!(report.head.height(), 5);
        assert_eq!(report.missing, vec![("a".to_string(), 1)]);
    }

    #[test]
    fn test_inspect_does_not_mutate() {
        let table = table();
        let before = table.frame().clone();
        let _ = Inspector::inspect(&table, 5);
        assert!(table.frame().equals_missing(&before));
    }

    #[test]
    fn test_display_sections() {
        let rendered = Inspector::inspect(&table(), 5).to_string();
        assert!(rendered.contains("=== Dataframe Shape ==="));
        assert!(rendered.contains("Rows: 6, Columns: 2"));
        assert!(rendered.contains("=== Head (first 5 rows) ==="));
        assert!(rendered.contains("=== Summary of Missing Values ==="));
        assert!(!rendered.contains("No missing values detected."));
    }

    #[test]
    fn test_display_no_missing() {
        let df = df!["a" => [1i64, 2]].unwrap();
        let table = Table::from_frame(df).unwrap();
        let rendered = Inspector::inspect(&table, 5).to_string();
        assert!(rendered.contains("No missing values detected."));
    }
}
