//! Configuration for the analysis pipeline.
//!
//! The tool itself runs with [`DEFAULT_SOURCE`] and [`DEFAULT_OUTPUT_DIR`];
//! they are passed into [`AnalysisConfig`] explicitly rather than read from
//! process-wide state, so tests and library callers can point the pipeline
//! anywhere.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Dataset analysed by the `lex-eda` binary. A local path works too.
pub const DEFAULT_SOURCE: &str =
    "https://raw.githubusercontent.com/mwaskom/seaborn-data/master/iris.csv";

/// Directory the binary writes its figures into.
pub const DEFAULT_OUTPUT_DIR: &str = "figures";

/// What to do with a numeric column that has no non-missing values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AllMissingPolicy {
    /// Leave the column untouched, report it and skip its figures
    #[default]
    Flag,
    /// Abort cleaning with [`EdaError::NoValidValues`](crate::EdaError::NoValidValues)
    Fail,
}

/// Configuration for a single analysis run.
///
/// Use [`AnalysisConfig::builder()`] to create a configuration with the
/// fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use lex_eda::config::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .source("data/train.csv")
///     .output_dir("figures")
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Local path or HTTP(S) URL of a CSV document with a header row.
    /// Default: [`DEFAULT_SOURCE`]
    pub source: String,

    /// Directory figures are written into. Created if missing.
    /// Default: [`DEFAULT_OUTPUT_DIR`]
    pub output_dir: PathBuf,

    /// Number of equal-width histogram buckets.
    /// Default: 30
    pub histogram_bins: usize,

    /// Rows shown in the inspection head.
    /// Default: 5
    pub head_rows: usize,

    /// Most frequent values listed per categorical column.
    /// Default: 10
    pub top_values: usize,

    /// A text column becomes categorical when its distinct value count is
    /// strictly below this fraction of the row count.
    /// Default: 0.5
    pub categorical_ratio: f64,

    /// Handling of numeric columns whose median is undefined.
    /// Default: Flag
    pub all_missing_policy: AllMissingPolicy,

    /// Raster resolution used to turn figure sizes in inches into pixels.
    /// Default: 150
    pub dpi: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            histogram_bins: 30,
            head_rows: 5,
            top_values: 10,
            categorical_ratio: 0.5,
            all_missing_policy: AllMissingPolicy::default(),
            dpi: 150,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.source.trim().is_empty() {
            return Err(ConfigValidationError::EmptySource);
        }

        if self.histogram_bins == 0 {
            return Err(ConfigValidationError::InvalidCount {
                field: "histogram_bins".to_string(),
                value: self.histogram_bins,
            });
        }

        if self.dpi == 0 {
            return Err(ConfigValidationError::InvalidCount {
                field: "dpi".to_string(),
                value: 0,
            });
        }

        if !(self.categorical_ratio > 0.0 && self.categorical_ratio <= 1.0) {
            return Err(ConfigValidationError::InvalidRatio {
                field: "categorical_ratio".to_string(),
                value: self.categorical_ratio,
            });
        }

        Ok(())
    }

    /// Pixel dimensions of a figure measured in inches at the configured DPI.
    pub fn figure_pixels(&self, width_in: f64, height_in: f64) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        ((width_in * dpi).round() as u32, (height_in * dpi).round() as u32)
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Source must not be empty")]
    EmptySource,

    #[error("Invalid value for '{field}': {value} (must be at least 1)")]
    InvalidCount { field: String, value: usize },

    #[error("Invalid ratio for '{field}': {value} (must be in (0.0, 1.0])")]
    InvalidRatio { field: String, value: f64 },
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    source: Option<String>,
    output_dir: Option<PathBuf>,
    histogram_bins: Option<usize>,
    head_rows: Option<usize>,
    top_values: Option<usize>,
    categorical_ratio: Option<f64>,
    all_missing_policy: Option<AllMissingPolicy>,
    dpi: Option<u32>,
}

impl AnalysisConfigBuilder {
    /// Set the dataset source (path or HTTP(S) URL).
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the directory figures are written into.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set the number of histogram buckets.
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    /// Set how many rows the inspection head shows.
    pub fn head_rows(mut self, rows: usize) -> Self {
        self.head_rows = Some(rows);
        self
    }

    /// Set how many frequent values are listed per categorical column.
    pub fn top_values(mut self, count: usize) -> Self {
        self.top_values = Some(count);
        self
    }

    /// Set the cardinality ratio below which text becomes categorical.
    pub fn categorical_ratio(mut self, ratio: f64) -> Self {
        self.categorical_ratio = Some(ratio);
        self
    }

    /// Set the policy for all-missing numeric columns.
    pub fn all_missing_policy(mut self, policy: AllMissingPolicy) -> Self {
        self.all_missing_policy = Some(policy);
        self
    }

    /// Set the raster resolution.
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.dpi = Some(dpi);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let defaults = AnalysisConfig::default();
        let config = AnalysisConfig {
            source: self.source.unwrap_or(defaults.source),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            histogram_bins: self.histogram_bins.unwrap_or(defaults.histogram_bins),
            head_rows: self.head_rows.unwrap_or(defaults.head_rows),
            top_values: self.top_values.unwrap_or(defaults.top_values),
            categorical_ratio: self.categorical_ratio.unwrap_or(defaults.categorical_ratio),
            all_missing_policy: self.all_missing_policy.unwrap_or_default(),
            dpi: self.dpi.unwrap_or(defaults.dpi),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.source, DEFAULT_SOURCE);
        assert_eq!(config.output_dir, PathBuf::from("figures"));
        assert_eq!(config.histogram_bins, 30);
        assert_eq!(config.head_rows, 5);
        assert_eq!(config.top_values, 10);
        assert_eq!(config.all_missing_policy, AllMissingPolicy::Flag);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = AnalysisConfig::builder()
            .source("local.csv")
            .output_dir("out")
            .histogram_bins(10)
            .all_missing_policy(AllMissingPolicy::Fail)
            .build()
            .unwrap();

        assert_eq!(config.source, "local.csv");
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.histogram_bins, 10);
        assert_eq!(config.all_missing_policy, AllMissingPolicy::Fail);
        assert_eq!(config.top_values, 10);
    }

    #[test]
    fn test_invalid_ratio() {
        let result = AnalysisConfig::builder().categorical_ratio(1.5).build();
        assert!(matches!(
            result,
            Err(ConfigValidationError::InvalidRatio { .. })
        ));

        let result = AnalysisConfig::builder().categorical_ratio(0.0).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_bins_rejected() {
        let result = AnalysisConfig::builder().histogram_bins(0).build();
        assert!(matches!(
            result,
            Err(ConfigValidationError::InvalidCount { .. })
        ));
    }

    #[test]
    fn test_empty_source_rejected() {
        let result = AnalysisConfig::builder().source("   ").build();
        assert!(matches!(result, Err(ConfigValidationError::EmptySource)));
    }

    #[test]
    fn test_figure_pixels() {
        let config = AnalysisConfig::default();
        assert_eq!(config.figure_pixels(6.0, 4.0), (900, 600));
        assert_eq!(config.figure_pixels(8.0, 6.0), (1200, 900));
    }
}
