//! Yahoo Finance client for rs-rating.
//!
//! This crate fetches the three kinds of data the rankings need from the
//! public Yahoo Finance endpoints:
//!
//! - close history from the chart API (`/v8/finance/chart`)
//! - ticker profiles (sector, industry, market cap) from `quoteSummary`,
//!   after the cookie and crumb handshake
//! - quarterly and annual financial statements from the fundamentals
//!   time-series API
//!
//! Bulk downloads are bounded-parallel and tolerate per-symbol failures.
//! [`YahooClient`] implements [`DataProvider`](rs_rating_traits::DataProvider).
//!
//! # Usage
//!
//! ```rust,ignore
//! use rs_rating_yahoo::YahooClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = YahooClient::from_env()?;
//!
//!     // Fetch two years of daily closes
//!     let closes = client.history("AAPL", HistoryRange::TwoYears, Interval::Daily).await?;
//!
//!     // Fetch sector and industry
//!     let info = client.ticker_info("AAPL").await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! ```bash
//! RS_RATING_USER_AGENT="Mozilla/5.0 ..."
//! RS_RATING_MAX_WORKERS=8
//! ```

mod client;
mod error;
mod provider;
mod types;

pub use client::{DEFAULT_USER_AGENT, YahooClient, YahooConfig};
pub use error::YahooError;

/// Result type for Yahoo operations.
pub type Result<T> = std::result::Result<T, YahooError>;
