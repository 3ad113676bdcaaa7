//! Error types for data decoding and grouping.

use thiserror::Error;

use super::dataset::SortMode;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("survey data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupError {
    /// Numeric sort modes need an integer somewhere in every label.
    #[error("label {label:?} has no integer to order by under `{sort}` sort")]
    MissingInteger { label: String, sort: SortMode },
}
