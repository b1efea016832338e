//! CLI subcommand modules.

pub(crate) mod fin;
pub(crate) mod index;
pub(crate) mod methods;
pub(crate) mod rs;
pub(crate) mod rsm;

use rs_rating::{Interval, RankingConfig};

use crate::args::{OutputArgs, PriceArgs};

/// Ranking settings from the command line.
pub(crate) fn ranking_config(
    price: &PriceArgs,
    output: &OutputArgs,
    default_interval: Interval,
) -> RankingConfig {
    RankingConfig {
        reference: price.reference.clone(),
        range: price.range,
        interval: price.interval.unwrap_or(default_interval),
        method: output.method,
        min_industry_size: price.min_industry_size,
        ..RankingConfig::default()
    }
}
