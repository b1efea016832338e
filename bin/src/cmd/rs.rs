//! IBD relative-strength ranking command.

use anyhow::Result;
use rs_rating::{Interval, RsPeriod, ibd_rs};
use std::time::Instant;

use crate::{
    args::{ClientArgs, OutputArgs, PriceArgs, UniverseArgs},
    output::{self, RunLabel},
};

/// Rank the universe by IBD relative strength.
pub(crate) async fn run(
    universe: &UniverseArgs,
    price: &PriceArgs,
    rs_period: RsPeriod,
    output: &OutputArgs,
    client: &ClientArgs,
) -> Result<()> {
    let started = Instant::now();
    let tickers = universe.resolve().await?;
    let config = rs_rating::RankingConfig {
        rs_period,
        ..super::ranking_config(price, output, Interval::Daily)
    };

    output::print_header("IBD Relative Strength", tickers.len());
    println!("Reference: {}", config.reference);
    println!("Period:    {} ({} bars)\n", rs_period, config.interval);

    let tables = ibd_rs::rankings(&client.client()?, &tickers, &config).await?;
    let label = RunLabel {
        kind: "rs",
        variant: rs_period.to_string(),
        method: config.method,
    };
    output::report(tables, output.min_percentile, &output.out_dir, &label, started)
}
