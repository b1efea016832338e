//! Stock market index helpers for rs-rating.
//!
//! - [`get_tickers`] lists the constituents of the S&P 500, NASDAQ-100, DJIA
//!   and PHLX Semiconductor indices
//! - [`get_name`] and [`ticker_from_name`] map between index symbols and
//!   display names
//!
//! # Example
//!
//! ```no_run
//! # async fn run() -> Result<(), rs_rating_indices::IndicesError> {
//! let tickers = rs_rating_indices::get_tickers("^NDX").await?;
//! println!("{} has {} members", rs_rating_indices::get_name("^NDX"), tickers.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod constituents;
mod error;
mod names;

pub use constituents::{
    ConstituentSource, DEFAULT_USER_AGENT, Index, IndicesClient, SOX_TICKERS, get_tickers,
    normalize_ticker, parse_constituents,
};
pub use error::IndicesError;
pub use names::{IndexName, get_name, known_indices, ticker_from_name};

/// Result type for index lookups.
pub type Result<T> = std::result::Result<T, IndicesError>;
