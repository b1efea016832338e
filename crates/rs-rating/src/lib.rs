#![doc(issue_tracker_base_url = "https://github.com/yorkjong/rs-rating/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # rs-rating
//!
//! Relative-strength ratings and percentile rankings of stocks and
//! industries.
//!
//! rs-rating is an umbrella crate that re-exports the rs-rating sub-crates
//! and adds the ranking drivers, which fetch data from a
//! [`DataProvider`], rate every ticker and build the ranking tables.
//!
//! ## Quick Start
//!
//! ```no_run
//! use rs_rating::{RankingConfig, YahooClient, ibd_rs, indices};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = YahooClient::from_env()?;
//! let tickers = indices::get_tickers("^NDX").await?;
//!
//! let tables = ibd_rs::rankings(&client, &tickers, &RankingConfig::default()).await?;
//! println!("{}", tables.stocks);
//! println!("{}", tables.industries);
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`ibd_rs`] - IBD 12-month and 3-month relative strength, [`ibd_rs::rankings`]
//! - [`rsm`] - Mansfield and Dorsey relative strength, [`rsm::ranking`]
//! - [`ibd_fin`] - Financial-metric strength, [`ibd_fin::financial_metric_ranking`]
//! - [`ranking`] - Percentiles and industry grouping
//! - [`registry`] - Rating method discovery
//! - [`yahoo`] - Yahoo Finance client
//! - [`indices`] - Index constituents and names
//! - [`traits`] - Core types and the [`RatingMethod`] and [`DataProvider`] traits
//!
//! ## Ranking Tables
//!
//! Every driver returns [`RankingTables`]: a stock table and an industry
//! table as polars DataFrames with display column names. Percentiles run
//! from 1 to 99, by average rank or by 99 quantile bins
//! ([`PercentileMethod`]).

/// Version information for the rs-rating crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod pipeline;

#[cfg(test)]
mod testing;

pub mod ibd_fin;
pub mod ibd_rs;
pub mod rsm;

pub use config::{DEFAULT_REFERENCE, FinancialRankingConfig, RankingConfig};
pub use pipeline::RankingTables;

// ============================================================================
// Core Traits and Types
// ============================================================================

/// Core types and trait definitions.
pub mod traits {
    pub use rs_rating_traits::*;
}

pub use rs_rating_traits::{
    DataProvider, Date, FinancialMetric, Financials, Frequency, HistoryRange, Interval,
    MarketData, MetricSeries, PriceSeries, RatingMethod, Result, RsRatingError, Symbol,
    TickerInfo,
};

// ============================================================================
// Ratings
// ============================================================================

/// Percentile scoring and ranking tables.
pub mod ranking {
    pub use rs_rating_signals::ranking::*;
}

/// Rating method discovery.
///
/// # Example
///
/// ```
/// use rs_rating::registry::{available_methods, create_method};
///
/// assert_eq!(available_methods().len(), 4);
/// let method = create_method("rsm").unwrap();
/// assert_eq!(method.name(), "mansfield");
/// ```
pub mod registry {
    pub use rs_rating_signals::registry::*;
}

pub use rs_rating_signals::{
    FinancialStrengthConfig, MansfieldConfig, MovingAverage, PercentileMethod, RsPeriod,
};

// ============================================================================
// Data Sources
// ============================================================================

/// Yahoo Finance client.
///
/// Set `RS_RATING_USER_AGENT` or `RS_RATING_MAX_WORKERS` in the environment
/// or a `.env` file to override the defaults of [`YahooClient::from_env`].
pub mod yahoo {
    pub use rs_rating_yahoo::*;
}

pub use rs_rating_yahoo::{YahooClient, YahooConfig};

/// Index constituents and names.
pub mod indices {
    pub use rs_rating_indices::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```
/// use rs_rating::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        DataProvider, FinancialMetric, HistoryRange, Interval, PercentileMethod, RankingConfig,
        RankingTables, RatingMethod, Result, RsRatingError, Symbol,
    };
}
