#![doc(issue_tracker_base_url = "https://github.com/yorkjong/rs-rating/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and trait definitions for rs-rating.
//!
//! This crate provides the foundational abstractions shared by the rating
//! methods, the data providers and the ranking drivers: dated series, the
//! aligned close-price panel, the error type, statistics helpers and the
//! [`RatingMethod`] and [`DataProvider`] traits.

/// The version of the rs-rating-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod method;
pub mod provider;
pub mod series;
pub mod stats;
pub mod types;

// Re-exports
pub use error::{Result, RsRatingError};
pub use method::RatingMethod;
pub use provider::DataProvider;
pub use series::{MetricSeries, PriceSeries};
pub use types::{
    Date, FinancialMetric, Financials, Frequency, HistoryRange, Interval, MarketData, Symbol,
    TickerInfo,
};
