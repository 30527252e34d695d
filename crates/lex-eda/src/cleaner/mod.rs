//! Data cleaning for a freshly loaded table.
//!
//! Cleaning runs three passes in a fixed order:
//! 1. Dropping exact duplicate rows
//! 2. Median imputation of numeric columns
//! 3. Retagging low-cardinality text columns as categorical
//!
//! Every pass records a [`CleaningAction`]; the caller decides how to show
//! them.

mod converters;

pub use converters::{distinct_count, is_low_cardinality, text_to_categorical};

use crate::config::{AllMissingPolicy, AnalysisConfig};
use crate::error::EdaError;
use crate::imputers::{ImputationResult, StatisticalImputer};
use crate::reporting::{TextTable, section_header};
use crate::types::{ColumnKind, Table};
use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

/// One change made (or deliberately not made) to the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CleaningAction {
    /// Exact duplicate rows removed; reported even when zero
    DuplicatesDropped { count: usize },
    /// Missing cells of a numeric column filled with its median
    Imputed { column: String, median: f64 },
    /// A text column retagged as categorical
    Categorized { column: String, distinct: usize },
    /// A numeric column without any value, left as missing
    AllMissingColumn { column: String },
}

impl fmt::Display for CleaningAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicatesDropped { count } => write!(f, "Dropped {} duplicate rows.", count),
            Self::Imputed { column, median } => write!(
                f,
                "Imputed numeric column '{}' missing values with median = {:?}",
                column, median
            ),
            Self::Categorized { column, distinct } => write!(
                f,
                "Converted '{}' to 'category' dtype (unique values: {})",
                column, distinct
            ),
            Self::AllMissingColumn { column } => write!(
                f,
                "Column '{}' has no non-missing values; median undefined, left as missing",
                column
            ),
        }
    }
}

/// The cleaned table and everything that was done to it.
#[derive(Debug, Clone)]
pub struct CleaningOutcome {
    pub table: Table,
    pub actions: Vec<CleaningAction>,
    /// Columns still holding missing values after cleaning, in frame order.
    pub remaining_missing: Vec<(String, usize)>,
}

impl CleaningOutcome {
    pub fn duplicates_dropped(&self) -> usize {
        self.actions
            .iter()
            .find_map(|a| match a {
                CleaningAction::DuplicatesDropped { count } => Some(*count),
                _ => None,
            })
            .unwrap_or(0)
    }

    pub fn imputed_columns(&self) -> Vec<String> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                CleaningAction::Imputed { column, .. } => Some(column.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn categorical_columns(&self) -> Vec<String> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                CleaningAction::Categorized { column, .. } => Some(column.clone()),
                _ => None,
            })
            .collect()
    }

    /// Numeric columns left untouched because they hold no value at all.
    pub fn all_missing_columns(&self) -> Vec<String> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                CleaningAction::AllMissingColumn { column } => Some(column.clone()),
                _ => None,
            })
            .collect()
    }

    /// The post-clean missing value section.
    pub fn missing_check(&self) -> String {
        let mut out = section_header("After Cleaning: Missing values check");
        out.push('\n');
        if self.remaining_missing.is_empty() {
            out.push_str("No missing values remain.");
        } else {
            let mut table = TextTable::new(["missing"]);
            for (name, count) in &self.remaining_missing {
                table.push_row(name.clone(), vec![count.to_string()]);
            }
            out.push_str(table.to_string().trim_end());
        }
        out
    }
}

impl fmt::Display for CleaningOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for action in &self.actions {
            writeln!(f, "{}", action)?;
        }
        writeln!(f)?;
        write!(f, "{}", self.missing_check())
    }
}

/// Data cleaner for the automatic cleaning passes.
#[derive(Debug, Clone)]
pub struct DataCleaner {
    categorical_ratio: f64,
    all_missing_policy: AllMissingPolicy,
}

impl Default for DataCleaner {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

impl DataCleaner {
    pub fn new(categorical_ratio: f64, all_missing_policy: AllMissingPolicy) -> Self {
        Self {
            categorical_ratio,
            all_missing_policy,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.categorical_ratio, config.all_missing_policy)
    }

    /// Run every cleaning pass over `table`.
    ///
    /// With [`AllMissingPolicy::Fail`] an all-missing numeric column aborts
    /// with [`EdaError::NoValidValues`] inside the returned error.
    pub fn clean(&self, table: Table) -> Result<CleaningOutcome> {
        let mut table = table;
        let mut actions = Vec::new();

        info!("Performing automatic data cleaning...");

        // 1. Remove duplicate rows
        let dropped = Self::drop_duplicates(&mut table)?;
        debug!("Removed {} duplicate rows", dropped);
        actions.push(CleaningAction::DuplicatesDropped { count: dropped });

        // 2. Median imputation for numeric columns
        for col_name in table.numeric_columns() {
            match StatisticalImputer::apply_numeric_median(&mut table, &col_name)? {
                ImputationResult::Untouched => {}
                ImputationResult::Filled { median, filled } => {
                    debug!("Imputed {} cells in '{}'", filled, col_name);
                    actions.push(CleaningAction::Imputed {
                        column: col_name,
                        median,
                    });
                }
                ImputationResult::NoValues => match self.all_missing_policy {
                    AllMissingPolicy::Flag => {
                        warn!("Column '{}' has no values; leaving it missing", col_name);
                        actions.push(CleaningAction::AllMissingColumn { column: col_name });
                    }
                    AllMissingPolicy::Fail => {
                        return Err(EdaError::NoValidValues(col_name).into());
                    }
                },
            }
        }

        // 3. Categorical conversion for low-cardinality text
        for col_name in table.columns_of(ColumnKind::Text) {
            if let Some(distinct) =
                text_to_categorical(&mut table, &col_name, self.categorical_ratio)?
            {
                actions.push(CleaningAction::Categorized {
                    column: col_name,
                    distinct,
                });
            }
        }

        let remaining_missing = table.columns_with_missing();
        info!(
            "Cleaning complete: {} rows, {} actions",
            table.height(),
            actions.len()
        );

        Ok(CleaningOutcome {
            table,
            actions,
            remaining_missing,
        })
    }

    fn drop_duplicates(table: &mut Table) -> Result<usize> {
        let before = table.height();
        let deduped = table
            .frame()
            .unique_stable(None, UniqueKeepStrategy::First, None)?;
        let dropped = before - deduped.height();
        table.replace_frame(deduped);
        Ok(dropped)
    }
}
