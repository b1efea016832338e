//! Financial-metric ranking command.

use anyhow::Result;
use rs_rating::{FinancialMetric, FinancialRankingConfig, ibd_fin};
use std::time::Instant;

use crate::{
    args::{ClientArgs, OutputArgs, UniverseArgs},
    output::{self, RunLabel},
};

/// Rank the universe by growth of `metric` against the universe.
pub(crate) async fn run(
    universe: &UniverseArgs,
    metric: FinancialMetric,
    output: &OutputArgs,
    client: &ClientArgs,
) -> Result<()> {
    let started = Instant::now();
    let tickers = universe.resolve().await?;
    let config = FinancialRankingConfig {
        method: output.method,
        ..FinancialRankingConfig::default()
    };

    output::print_header(&format!("{metric} Strength"), tickers.len());
    println!(
        "Weights:   {:.0}% quarterly, {:.0}% annual growth\n",
        config.strength.quarterly_weight * 100.0,
        config.strength.annual_weight * 100.0
    );

    let tables =
        ibd_fin::financial_metric_ranking(&client.client()?, &tickers, metric, &config).await?;
    let label = RunLabel {
        kind: "fin",
        variant: variant(metric),
        method: config.method,
    };
    output::report(tables, output.min_percentile, &output.out_dir, &label, started)
}

/// File-name form of a metric label: `Net Income` -> `net_income`.
fn variant(metric: FinancialMetric) -> String {
    metric.label().to_lowercase().replace(' ', "_")
}
