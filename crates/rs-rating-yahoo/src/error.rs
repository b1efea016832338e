//! Error types for the Yahoo Finance client.

use rs_rating_traits::RsRatingError;
use thiserror::Error;

/// Errors that can occur when using the Yahoo Finance API.
#[derive(Debug, Error)]
pub enum YahooError {
    /// The cookie and crumb handshake did not yield a crumb.
    #[error("Failed to obtain a Yahoo crumb")]
    MissingCrumb,

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error.
    #[error("Yahoo API error: {0}")]
    Api(String),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded. Lower the number of workers or retry later.")]
    RateLimitExceeded,

    /// Symbol not found.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// No data available.
    #[error("No data available for {0}")]
    NoData(String),

    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Fetched data could not be assembled.
    #[error(transparent)]
    Data(#[from] RsRatingError),
}

impl From<YahooError> for RsRatingError {
    fn from(err: YahooError) -> Self {
        match err {
            YahooError::Data(inner) => inner,
            YahooError::SymbolNotFound(symbol) => Self::SymbolNotFound(symbol),
            other => Self::DataFetch(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_rs_rating_error() {
        let err: RsRatingError = YahooError::RateLimitExceeded.into();
        assert!(matches!(err, RsRatingError::DataFetch(_)));

        let err: RsRatingError = YahooError::SymbolNotFound("ZZZZ".into()).into();
        assert!(matches!(err, RsRatingError::SymbolNotFound(s) if s == "ZZZZ"));

        let err: RsRatingError =
            YahooError::Data(RsRatingError::InvalidData("bad".into())).into();
        assert!(matches!(err, RsRatingError::InvalidData(_)));
    }
}
