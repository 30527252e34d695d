//! Loading a CSV dataset from a local path or an HTTP(S) URL.
//!
//! Any failure here (missing file, network error, unparsable content) is
//! reported as [`EdaError::SourceUnreadable`] naming the source. There is no
//! retry and no partial result; the only second chance is a re-parse of
//! pre-cleaned text when the strict parse rejects the document.

use crate::error::{EdaError, Result};
use crate::types::Table;
use polars::io::csv::read::{CsvParseOptions, CsvReadOptions, NullValues};
use polars::prelude::*;
use std::io::Cursor;
use tracing::{debug, info};

/// Cell contents read as missing, on top of empty fields.
pub const NA_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Where a source string points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// A filesystem path
    Local,
    /// An `http://` or `https://` URL
    Remote,
}

impl SourceKind {
    /// Classify a source string. The scheme check is case-insensitive.
    pub fn detect(source: &str) -> Self {
        let lower = source.trim().to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            SourceKind::Remote
        } else {
            SourceKind::Local
        }
    }
}

/// Loads a [`Table`] from a source string.
pub struct DataLoader;

impl DataLoader {
    /// Fetch or read `source` and parse it as CSV with a header row.
    pub fn load(source: &str) -> Result<Table> {
        let kind = SourceKind::detect(source);
        info!("Loading {:?} source: {}", kind, source);

        let text = match kind {
            SourceKind::Remote => Self::fetch_remote(source)?,
            SourceKind::Local => {
                std::fs::read_to_string(source).map_err(|e| EdaError::unreadable(source, e))?
            }
        };

        Self::read_csv_text(text, source)
    }

    /// Parse CSV text already in memory. `origin` names it in errors.
    pub fn read_csv_text(text: String, origin: &str) -> Result<Table> {
        let frame = Self::parse_with_fallback(text, origin)?;
        debug!("Parsed {} rows x {} columns from {}", frame.height(), frame.width(), origin);
        Table::from_frame(frame).map_err(|e| EdaError::unreadable(origin, e))
    }

    fn fetch_remote(url: &str) -> Result<String> {
        let response = reqwest::blocking::get(url).map_err(|e| EdaError::unreadable(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EdaError::unreadable(url, format!("HTTP status {}", status)));
        }

        response.text().map_err(|e| EdaError::unreadable(url, e))
    }

    fn parse_with_fallback(text: String, origin: &str) -> Result<DataFrame> {
        // Strategy 1: strict parse of the document as served
        let first_error = match Self::parse(text.clone()) {
            Ok(df) => return Ok(df),
            Err(e) => {
                debug!("Standard CSV parse of {} failed: {}", origin, e);
                e
            }
        };

        // Strategy 2: collapse doubled quotes and drop blank lines, then retry
        let cleaned = clean_csv_content(&text);
        if cleaned == text {
            return Err(EdaError::unreadable(origin, first_error));
        }

        Self::parse(cleaned).map_err(|e| {
            debug!("Parse of pre-cleaned content failed: {}", e);
            EdaError::unreadable(origin, first_error)
        })
    }

    fn parse(text: String) -> PolarsResult<DataFrame> {
        let null_values = NullValues::AllColumns(NA_MARKERS.iter().map(|s| (*s).into()).collect());

        CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .with_parse_options(
                CsvParseOptions::default()
                    .with_quote_char(Some(b'"'))
                    .with_null_values(Some(null_values)),
            )
            .into_reader_with_file_handle(Cursor::new(text))
            .finish()
    }
}

/// Collapse tripled/doubled quotes and drop blank lines.
fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
