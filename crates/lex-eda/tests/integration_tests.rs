//! Integration tests for the analysis pipeline.
//!
//! These tests run whole pipelines against the CSV fixtures and check the
//! report stream, the run summary and the figures written to disk.

use lex_eda::{
    AllMissingPolicy, AnalysisConfig, AnalysisStage, ColumnKind, DataCleaner, DataLoader,
    EdaError, MemorySink, Pipeline, RunSummary,
};
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture(filename: &str) -> String {
    fixtures_path().join(filename).to_string_lossy().to_string()
}

fn config_for(source: &str, out: &TempDir) -> AnalysisConfig {
    AnalysisConfig::builder()
        .source(source)
        .output_dir(out.path().join("figures"))
        .build()
        .expect("Failed to build config")
}

fn run(config: AnalysisConfig) -> (Result<RunSummary, EdaError>, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let result = Pipeline::builder()
        .config(config)
        .report_sink(sink.clone())
        .build()
        .expect("Failed to build pipeline")
        .run();
    (result, sink)
}

fn run_fixture(filename: &str) -> (RunSummary, Arc<MemorySink>, TempDir) {
    let out = tempfile::tempdir().expect("Failed to create temp dir");
    let (result, sink) = run(config_for(&fixture(filename), &out));
    let summary = result.expect("Pipeline should complete successfully");
    (summary, sink, out)
}

/// Width and height from a PNG header.
fn png_dimensions(path: &Path) -> (u32, u32) {
    let bytes = std::fs::read(path).expect("Failed to read figure");
    assert_eq!(&bytes[1..4], b"PNG", "{} is not a PNG", path.display());
    let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
    let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
    (width, height)
}

// ============================================================================
// End-to-End Scenarios
// ============================================================================

#[test]
fn test_pipeline_scenario_dataset() {
    let (summary, sink, out) = run_fixture("scenario.csv");

    assert_eq!(summary.rows_loaded, 10);
    assert_eq!(summary.rows_after_cleaning, 8);
    assert_eq!(summary.duplicates_dropped, 2);
    assert_eq!(summary.imputed_columns, vec!["a".to_string()]);
    assert_eq!(summary.categorical_columns, vec!["c".to_string()]);

    assert!(sink.contains("Dropped 2 duplicate rows."));
    assert!(sink.contains("Imputed numeric column 'a' missing values with median = 5.0"));
    assert!(sink.contains("Converted 'c' to 'category' dtype (unique values: 2)"));
    assert!(sink.contains("No missing values remain."));

    let figures = out.path().join("figures");
    let expected = vec![
        figures.join("a_histogram.png"),
        figures.join("b_histogram.png"),
        figures.join("a_boxplot.png"),
        figures.join("b_boxplot.png"),
        figures.join("correlation_heatmap.png"),
    ];
    assert_eq!(summary.figures, expected);
    for path in &expected {
        assert!(path.is_file(), "Missing figure {}", path.display());
    }
}

#[test]
fn test_pipeline_report_order() {
    let (summary, sink, out) = run_fixture("scenario.csv");
    let messages = sink.messages();

    let position = |needle: &str| {
        messages
            .iter()
            .position(|m| m.contains(needle))
            .unwrap_or_else(|| panic!("'{}' was never reported", needle))
    };

    assert_eq!(position("Loading data from:"), 0);
    assert!(position("=== Dataframe Shape ===") < position("Dropped 2 duplicate rows."));
    assert!(position("Dropped 2 duplicate rows.") < position("=== Descriptive Statistics"));
    assert!(
        position("=== Descriptive Statistics") < position("Generating histograms for numeric columns...")
    );
    assert!(
        position("Generating boxplots for numeric columns...")
            < position("Generating correlation heatmap...")
    );

    let last = messages.last().unwrap();
    assert_eq!(
        *last,
        format!(
            "Data analysis complete. Figures saved in: {}",
            out.path().join("figures").display()
        )
    );
    assert_eq!(sink.entries().last().unwrap().stage, AnalysisStage::Complete);
    assert_eq!(summary.figures.len(), 5);
}

#[test]
fn test_pipeline_text_only_dataset() {
    let (summary, sink, out) = run_fixture("text_only.csv");

    assert!(summary.figures.is_empty());
    assert!(sink.contains("No numeric columns found\u{2014}skipping plotting."));
    assert!(sink.contains("Not enough numeric columns to compute correlations."));
    assert!(sink.contains("Converted 'city' to 'category' dtype (unique values: 2)"));
    assert!(!sink.contains("Generating histograms"));

    let written = std::fs::read_dir(out.path().join("figures")).unwrap().count();
    assert_eq!(written, 0);
}

#[test]
fn test_pipeline_single_numeric_column() {
    let (summary, sink, out) = run_fixture("single_numeric.csv");

    let figures = out.path().join("figures");
    assert_eq!(
        summary.figures,
        vec![
            figures.join("value_histogram.png"),
            figures.join("value_boxplot.png"),
        ]
    );
    assert!(sink.contains("Skipping correlation heatmap: not enough numeric columns."));
    assert!(sink.contains("Not enough numeric columns to compute correlations."));
    assert!(!figures.join("correlation_heatmap.png").exists());
}

#[test]
fn test_pipeline_unreachable_url() {
    let out = tempfile::tempdir().unwrap();
    let url = "http://127.0.0.1:9/data.csv";
    let (result, sink) = run(config_for(url, &out));

    let err = result.unwrap_err();
    assert!(err.is_source_unreadable());
    assert_eq!(err.error_code(), "SOURCE_UNREADABLE");
    assert!(err.to_string().contains(url));

    assert!(!sink.contains("=== Dataframe Shape ==="));
    assert_eq!(sink.entries().last().unwrap().stage, AnalysisStage::Failed);
}

#[test]
fn test_pipeline_missing_local_file() {
    let out = tempfile::tempdir().unwrap();
    let source = fixture("does_not_exist.csv");
    let (result, _sink) = run(config_for(&source, &out));

    let err = result.unwrap_err();
    assert!(matches!(err, EdaError::SourceUnreadable { .. }));
    assert!(err.to_string().contains("does_not_exist.csv"));
}

// ============================================================================
// All-Missing Columns
// ============================================================================

#[test]
fn test_all_missing_column_flagged() {
    let (summary, sink, out) = run_fixture("all_missing.csv");

    assert_eq!(summary.all_missing_columns, vec!["empty".to_string()]);
    assert!(sink.contains("Column 'empty' has no non-missing values"));
    assert!(sink.contains("=== After Cleaning: Missing values check ==="));
    assert!(!sink.contains("No missing values remain."));

    // Figures for the other numeric columns, none for the empty one
    let figures = out.path().join("figures");
    assert!(figures.join("x_histogram.png").is_file());
    assert!(figures.join("y_boxplot.png").is_file());
    assert!(!figures.join("empty_histogram.png").exists());
    assert!(!figures.join("empty_boxplot.png").exists());
    assert!(figures.join("correlation_heatmap.png").is_file());
}

#[test]
fn test_all_missing_column_fail_policy() {
    let out = tempfile::tempdir().unwrap();
    let config = AnalysisConfig::builder()
        .source(fixture("all_missing.csv"))
        .output_dir(out.path().join("figures"))
        .all_missing_policy(AllMissingPolicy::Fail)
        .build()
        .unwrap();

    let (result, _sink) = run(config);
    match result {
        Err(EdaError::NoValidValues(column)) => assert_eq!(column, "empty"),
        other => panic!("Expected NoValidValues, got {:?}", other.map(|s| s.rows_loaded)),
    }
}

// ============================================================================
// Figures
// ============================================================================

#[test]
fn test_figure_dimensions() {
    let (summary, _sink, _out) = run_fixture("iris_sample.csv");

    for path in &summary.figures {
        let expected = if path.ends_with("correlation_heatmap.png") {
            (1200, 900)
        } else {
            (900, 600)
        };
        assert_eq!(png_dimensions(path), expected, "{}", path.display());
    }
}

#[test]
fn test_output_directory_is_reused() {
    let out = tempfile::tempdir().unwrap();
    let config = config_for(&fixture("single_numeric.csv"), &out);

    let (first, _) = run(config.clone());
    let (second, _) = run(config);

    assert_eq!(first.unwrap().figures, second.unwrap().figures);
}

#[test]
fn test_iris_sample_summary() {
    let (summary, sink, _out) = run_fixture("iris_sample.csv");

    assert_eq!(summary.duplicates_dropped, 1);
    assert_eq!(summary.imputed_columns, vec!["sepal_width".to_string()]);
    assert_eq!(summary.categorical_columns, vec!["species".to_string()]);
    assert!(sink.contains("median = 3.2"));
    assert!(sink.contains("-- Column: species --"));

    let correlation = summary.analysis.correlation.as_ref().unwrap();
    assert!(correlation.is_symmetric());
    assert_eq!(correlation.get(0, 0), 1.0);
    assert_eq!(correlation.get(1, 1), 1.0);
}

#[test]
fn test_run_summary_serializes() {
    let (summary, _sink, _out) = run_fixture("scenario.csv");

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["rows_loaded"], 10);
    assert_eq!(json["duplicates_dropped"], 2);
    assert_eq!(json["figures"].as_array().unwrap().len(), 5);
}

// ============================================================================
// Cleaning Properties
// ============================================================================

#[test]
fn test_cleaning_properties_across_fixtures() {
    for name in [
        "scenario.csv",
        "text_only.csv",
        "single_numeric.csv",
        "iris_sample.csv",
    ] {
        let table = DataLoader::load(&fixture(name)).unwrap();
        let rows_before = table.height();

        let cleaned = DataCleaner::default().clean(table).unwrap();
        let table = &cleaned.table;

        assert!(table.height() <= rows_before, "{}: rows increased", name);
        for column in table.numeric_columns() {
            assert_eq!(
                table.series(&column).unwrap().null_count(),
                0,
                "{}: '{}' still has missing values",
                name,
                column
            );
        }
        for schema in table.schema() {
            if schema.kind == ColumnKind::Categorical {
                let distinct = lex_eda::cleaner::distinct_count(table.series(&schema.name).unwrap())
                    .unwrap();
                assert!((distinct as f64) < 0.5 * table.height() as f64);
            }
        }
    }
}

#[test]
fn test_invalid_config_rejected_by_builder() {
    let config = AnalysisConfig {
        categorical_ratio: 2.0,
        ..AnalysisConfig::default()
    };
    assert!(Pipeline::builder().config(config).build().is_err());
}
