//! Plain-text building blocks for report sections.

use std::fmt;

/// `=== title ===`
pub fn section_header(title: &str) -> String {
    format!("=== {} ===", title)
}

/// Fixed six-decimal rendering used for every statistic; NaN prints as `NaN`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.6}", value)
    }
}

/// A right-aligned text grid with a header row and a left label column.
///
/// ```text
///               count      mean
/// sepal_length  150.000000 5.843333
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextTable {
    headers: Vec<String>,
    rows: Vec<(String, Vec<String>)>,
}

impl TextTable {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, label: impl Into<String>, cells: Vec<String>) {
        self.rows.push((label.into(), cells));
    }

    fn column_widths(&self) -> (usize, Vec<usize>) {
        let label_width = self
            .rows
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);

        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for (_, cells) in &self.rows {
            for (i, cell) in cells.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.chars().count());
                }
            }
        }
        (label_width, widths)
    }
}

impl fmt::Display for TextTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (label_width, widths) = self.column_widths();

        write!(f, "{:<label_width$}", "")?;
        for (header, width) in self.headers.iter().zip(&widths) {
            write!(f, "  {:>width$}", header)?;
        }
        writeln!(f)?;

        for (label, cells) in &self.rows {
            write!(f, "{:<label_width$}", label)?;
            for (cell, width) in cells.iter().zip(&widths) {
                write!(f, "  {:>width$}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
