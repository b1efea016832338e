//! Rating computations for rs-rating.
//!
//! This crate provides the pure numeric side of the toolkit:
//! - [`ibd_rs`]: IBD 12-month and 3-month relative strength
//! - [`rsm`]: Mansfield and Dorsey relative strength
//! - [`ibd_fin`]: financial-metric strength against a weighted benchmark
//! - [`ranking`]: percentiles, stock and industry ranking tables
//! - [`registry`]: discovery of the [`RatingMethod`](rs_rating_traits::RatingMethod)
//!   implementations
//!
//! Nothing here performs I/O; fetching lives in the provider crates.
//!
//! # Example
//!
//! ```ignore
//! use rs_rating_signals::{ibd_rs, registry::create_method};
//!
//! let rs = ibd_rs::relative_strength(&closes, &closes_ref, Interval::Daily)?;
//!
//! let method = create_method("rsm").unwrap();
//! let rsm = method.compute(&closes, &closes_ref, Interval::Weekly)?;
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod ibd_fin;
pub mod ibd_rs;
pub mod ranking;
pub mod registry;
pub mod rsm;

// Re-export key types
pub use ibd_fin::FinancialStrengthConfig;
pub use ibd_rs::RsPeriod;
pub use ranking::PercentileMethod;
pub use registry::{MethodCategory, MethodInfo};
pub use rsm::{MansfieldConfig, MovingAverage};
