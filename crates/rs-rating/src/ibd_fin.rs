//! Financial-metric strength: the scoring functions and the ranking driver.

pub use rs_rating_signals::ibd_fin::*;

use std::collections::HashMap;

use rs_rating_traits::{
    DataProvider, FinancialMetric, Financials, Frequency, MetricSeries, Result, RsRatingError,
    Symbol, TickerInfo,
};
use tracing::{debug, info, warn};

use crate::{
    config::FinancialRankingConfig,
    pipeline::{RankingTables, ensure_tickers, unique_tickers},
};

/// Benchmark weights: market caps, or equal weights when no ticker with
/// financials has one.
pub fn benchmark_weights(
    financials: &HashMap<Symbol, Financials>,
    info: &HashMap<Symbol, TickerInfo>,
) -> HashMap<Symbol, f64> {
    let weights: HashMap<Symbol, f64> = market_cap_weights(info)
        .into_iter()
        .filter(|(symbol, _)| financials.contains_key(symbol))
        .collect();
    if weights.is_empty() {
        debug!("No market caps, weighting the benchmark equally");
        equal_weights(financials.keys())
    } else {
        weights
    }
}

fn benchmark(
    financials: &HashMap<Symbol, Financials>,
    weights: &HashMap<Symbol, f64>,
    frequency: Frequency,
) -> Result<MetricSeries> {
    match calc_weighted_metric(financials, weights, frequency) {
        Err(RsRatingError::InsufficientData(reason)) => {
            warn!(%reason, "Empty benchmark, growth counts as zero");
            Ok(MetricSeries::default())
        }
        other => other,
    }
}

/// Ranks `tickers` and their industries by the growth of `metric` against
/// the market-cap weighted growth of the whole universe.
///
/// Tickers without financials are skipped with a warning.
///
/// # Errors
///
/// Returns [`RsRatingError::InsufficientData`] if `tickers` is empty or no
/// ticker has financials, and propagates provider errors.
pub async fn financial_metric_ranking<P: DataProvider>(
    provider: &P,
    tickers: &[Symbol],
    metric: FinancialMetric,
    config: &FinancialRankingConfig,
) -> Result<RankingTables> {
    let tickers = unique_tickers(tickers);
    ensure_tickers(&tickers)?;

    info!(metric = %metric, tickers = tickers.len(), "Fetching financials");
    let (financials, info) = tokio::try_join!(
        provider.financials(&tickers, metric),
        provider.tickers_info(&tickers),
    )?;

    let weights = benchmark_weights(&financials, &info);
    let bench_q = benchmark(&financials, &weights, Frequency::Quarterly)?;
    let bench_a = benchmark(&financials, &weights, Frequency::Annual)?;

    let rows: Vec<MetricRanking> = tickers
        .iter()
        .filter_map(|ticker| {
            let Some(f) = financials.get(ticker) else {
                warn!(ticker = %ticker, "No financials, skipping");
                return None;
            };
            let row = MetricRanking::score(
                ticker,
                f,
                &bench_q,
                &bench_a,
                info.get(ticker),
                &config.strength,
            );
            debug!(ticker = %ticker, rs = row.rs, "Scored");
            Some(row)
        })
        .collect();

    if rows.is_empty() {
        return Err(RsRatingError::InsufficientData(format!(
            "no ticker has {metric} financials"
        )));
    }

    let rows = rank_metrics(rows, config.method);
    let stocks = metrics_frame(&rows, metric)?;
    let industries = metric_industries_frame(&stocks, metric, config.method)?;
    info!(
        stocks = stocks.height(),
        industries = industries.height(),
        "Ranked"
    );

    Ok(RankingTables { stocks, industries })
}
