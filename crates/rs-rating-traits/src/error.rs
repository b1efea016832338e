//! Error types for rs-rating.
//!
//! Every computation in the workspace reports failures through
//! [`RsRatingError`], so that ranking drivers can propagate errors from
//! data providers, polars and the numeric transforms with `?`.

use thiserror::Error;

/// The main error type for rs-rating operations.
#[derive(Debug, Error)]
pub enum RsRatingError {
    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Error when a required column is missing from a table.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Error when data is insufficient for the requested operation.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Error when a ticker is absent from the fetched data.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// Error when an index symbol is not recognized.
    #[error("Index symbol '{0}' not found.")]
    IndexNotFound(String),

    /// Error when a financial metric is unknown or unavailable.
    #[error("Metric not found: {0}")]
    MetricNotFound(String),

    /// Error when a date is out of range or invalid.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Error when a parameter (interval, method, window, ...) is invalid.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error fetching data from external sources.
    #[error("Data fetch error: {0}")]
    DataFetch(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for RsRatingError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for RsRatingError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for rs-rating operations.
pub type Result<T> = std::result::Result<T, RsRatingError>;
