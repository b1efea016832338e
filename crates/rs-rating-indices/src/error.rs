//! Error types for index constituent lookup.

use rs_rating_traits::RsRatingError;
use thiserror::Error;

/// Errors that can occur when looking up index constituents.
#[derive(Debug, Error)]
pub enum IndicesError {
    /// The index symbol is not supported.
    #[error("Index symbol '{0}' not found.")]
    IndexNotFound(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The constituents table is missing from the page.
    #[error("Constituents table '{0}' not found")]
    TableNotFound(String),

    /// The constituents table has no such column.
    #[error("Column '{0}' not found in constituents table")]
    ColumnNotFound(String),

    /// A CSS selector failed to parse.
    #[error("Invalid selector: {0}")]
    Selector(String),
}

impl From<IndicesError> for RsRatingError {
    fn from(err: IndicesError) -> Self {
        match err {
            IndicesError::IndexNotFound(symbol) => Self::IndexNotFound(symbol),
            other => Self::DataFetch(other.to_string()),
        }
    }
}
