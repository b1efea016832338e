//! Percentile scoring and ranking tables.
//!
//! - [`percentile`]: 1..=99 percentile scores by rank or quantile bins
//! - [`table`]: typed stock and industry ranking rows and their DataFrames
//! - [`frame`]: percentile and industry grouping over arbitrary DataFrames

pub mod frame;
pub mod percentile;
pub mod table;

pub use frame::{append_percentile, groupby_industry, sort_and_rank};
pub use percentile::{PercentileMethod, calc_percentile};
pub use table::{
    IndustryRanking, StockRanking, StockSnapshot, industries_frame, rank_industries, rank_stocks,
    stocks_frame,
};
