//! Error types for the exploratory analysis pipeline.
//!
//! Only a source that cannot be loaded is an expected failure. Everything
//! after loading assumes a well-formed table, so the remaining variants
//! exist to carry unexpected backend failures out of a stage with enough
//! context to tell where they happened.
//!
//! Errors are serializable so library callers can hand them to a frontend
//! as `{ code, message }`.

use crate::config::ConfigValidationError;
use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the analysis pipeline.
#[derive(Error, Debug)]
pub enum EdaError {
    /// The configured source could not be fetched, read or parsed.
    #[error("Error loading data from {origin}: {reason}")]
    SourceUnreadable { origin: String, reason: String },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A numeric column has no non-missing values, so no median exists.
    #[error("No valid values found in column '{0}'")]
    NoValidValues(String),

    /// Column was not found in the table.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Data cleaning failed.
    #[error("Failed to clean data: {0}")]
    CleaningFailed(String),

    /// Statistics could not be computed.
    #[error("Failed to analyze data: {0}")]
    AnalysisFailed(String),

    /// A figure could not be rendered or written.
    #[error("Failed to render figure: {0}")]
    PlottingFailed(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<EdaError>,
    },
}

impl EdaError {
    /// Build a [`EdaError::SourceUnreadable`] for `origin`.
    pub fn unreadable(origin: impl Into<String>, reason: impl ToString) -> Self {
        EdaError::SourceUnreadable {
            origin: origin.into(),
            reason: reason.to_string(),
        }
    }

    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        EdaError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code for programmatic handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::SourceUnreadable { .. } => "SOURCE_UNREADABLE",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::NoValidValues(_) => "NO_VALID_VALUES",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::CleaningFailed(_) => "CLEANING_FAILED",
            Self::AnalysisFailed(_) => "ANALYSIS_FAILED",
            Self::PlottingFailed(_) => "PLOTTING_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Whether this error came from the load boundary.
    pub fn is_source_unreadable(&self) -> bool {
        match self {
            Self::SourceUnreadable { .. } => true,
            Self::WithContext { source, .. } => source.is_source_unreadable(),
            _ => false,
        }
    }
}

impl From<ConfigValidationError> for EdaError {
    fn from(error: ConfigValidationError) -> Self {
        EdaError::InvalidConfig(error.to_string())
    }
}

impl Serialize for EdaError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("EdaError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, EdaError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}
