//! Imputation of missing values.
//!
//! Only median imputation of numeric columns is needed; the all-missing
//! case is surfaced to the caller instead of being filled.

mod statistical;

pub use statistical::{ImputationResult, StatisticalImputer};
