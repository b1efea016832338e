//! Mansfield relative-strength ranking command.

use anyhow::Result;
use rs_rating::{Interval, MansfieldConfig, rsm};
use std::time::Instant;

use crate::{
    args::{ClientArgs, OutputArgs, PriceArgs, UniverseArgs},
    output::{self, RunLabel},
};

/// Rank the universe by Mansfield relative strength.
pub(crate) async fn run(
    universe: &UniverseArgs,
    price: &PriceArgs,
    mansfield: MansfieldConfig,
    output: &OutputArgs,
    client: &ClientArgs,
) -> Result<()> {
    let started = Instant::now();
    let tickers = universe.resolve().await?;
    let config = super::ranking_config(price, output, Interval::Weekly);
    let window = mansfield.window_for(config.interval);

    output::print_header("Mansfield Relative Strength", tickers.len());
    println!("Reference: {}", config.reference);
    println!("Average:   {} over {} {} bars\n", mansfield.ma, window, config.interval);

    let tables = rsm::ranking(&client.client()?, &tickers, &config, mansfield).await?;
    let label = RunLabel {
        kind: "rsm",
        variant: format!("{}{window}", mansfield.ma),
        method: config.method,
    };
    output::report(tables, output.min_percentile, &output.out_dir, &label, started)
}
