//! Human-readable report formatting.
//!
//! Inspection, cleaning and analysis results render themselves through
//! `Display`; this module holds the shared pieces those impls use so every
//! section of the report stream looks the same.

mod text;

pub use text::{TextTable, format_number, section_header};
