//! Financial-metric strength relative to a market benchmark.
//!
//! A stock's metric (EPS, revenue, ...) is scored by its growth over recent
//! reports, in the same spirit as the IBD price rating:
//!
//! ```text
//! g(n)     = (m[-1] - m[-1-n]) / |m[-1-n]|
//! growth   = Σ wₙ·g(n) / Σ wₙ           quarterly w = [2, 1, 1, 1], annual w = [2, 1, 1]
//! g        = 0.6·growth_q + 0.4·growth_a
//! strength = (1 + g_stock) / (1 + g_bench) · 100
//! ```
//!
//! The benchmark is a weighted composite of the universe built with
//! [`calc_weighted_metric`].

use std::collections::{BTreeMap, HashMap};

use ndarray::Array1;
use polars::prelude::*;
use rs_rating_traits::{
    FinancialMetric, Financials, Frequency, MetricSeries, Result, RsRatingError, Symbol,
    TickerInfo,
    stats::{round_to, weighted_mean},
};
use serde::{Deserialize, Serialize};

use crate::ranking::{
    PercentileMethod, calc_percentile,
    frame::{column_values, groupby_industry, sort_and_rank},
    table::{RS_COLUMN, desc_nan_last},
};

/// Configuration for financial-metric strength.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialStrengthConfig {
    /// Weight of quarterly growth in the combined growth (default: 0.6).
    pub quarterly_weight: f64,

    /// Weight of annual growth in the combined growth (default: 0.4).
    pub annual_weight: f64,

    /// Weights of the 1..k-quarter growths (default: `[2, 1, 1, 1]`).
    pub quarterly_growth_weights: Vec<f64>,

    /// Weights of the 1..k-year growths (default: `[2, 1, 1]`).
    pub annual_growth_weights: Vec<f64>,
}

impl Default for FinancialStrengthConfig {
    fn default() -> Self {
        Self {
            quarterly_weight: 0.6,
            annual_weight: 0.4,
            quarterly_growth_weights: vec![2.0, 1.0, 1.0, 1.0],
            annual_growth_weights: vec![2.0, 1.0, 1.0],
        }
    }
}

impl FinancialStrengthConfig {
    /// Growth weights for the given frequency.
    #[must_use]
    pub fn growth_weights(&self, frequency: Frequency) -> &[f64] {
        match frequency {
            Frequency::Quarterly => &self.quarterly_growth_weights,
            Frequency::Annual => &self.annual_growth_weights,
        }
    }
}

/// Weighted growth of the latest value over the previous `1..=k` reports,
/// where `k` is the number of weights. The look-back is capped at the
/// available history; a period whose base or latest value is missing or
/// zero contributes 0.
pub fn metric_growth(series: &MetricSeries, weights: &[f64]) -> f64 {
    let values = series.values();
    let total: f64 = weights.iter().sum();
    if values.iter().filter(|v| v.is_finite()).count() < 2 || total <= 0.0 {
        return 0.0;
    }

    let last = values[values.len() - 1];
    let weighted: f64 = weights
        .iter()
        .enumerate()
        .map(|(i, w)| {
            let n = (i + 1).min(values.len() - 1);
            let base = values[values.len() - 1 - n];
            let growth = (last - base) / base.abs();
            if growth.is_finite() { w * growth } else { 0.0 }
        })
        .sum();

    weighted / total
}

/// Strength of a growth rate against a benchmark growth rate, rounded to 2
/// decimals. `NaN` when the benchmark lost everything or worse.
pub fn metric_strength(growth: f64, growth_bench: f64) -> f64 {
    if 1.0 + growth_bench <= 0.0 {
        return f64::NAN;
    }
    let strength = round_to((1.0 + growth) / (1.0 + growth_bench) * 100.0, 2);
    if strength.is_finite() { strength } else { f64::NAN }
}

/// Combined quarterly and annual growth under `config`.
pub fn combined_growth(quarterly: &MetricSeries, annual: &MetricSeries, config: &FinancialStrengthConfig) -> f64 {
    config.quarterly_weight * metric_growth(quarterly, &config.quarterly_growth_weights)
        + config.annual_weight * metric_growth(annual, &config.annual_growth_weights)
}

/// Strength of a stock's metric history against the benchmark history.
pub fn metric_strength_vs_benchmark(
    q_metric: &MetricSeries,
    a_metric: &MetricSeries,
    q_bench: &MetricSeries,
    a_bench: &MetricSeries,
    config: &FinancialStrengthConfig,
) -> f64 {
    metric_strength(
        combined_growth(q_metric, a_metric, config),
        combined_growth(q_bench, a_bench, config),
    )
}

/// Gives every symbol weight 1.
pub fn equal_weights<'a>(symbols: impl IntoIterator<Item = &'a Symbol>) -> HashMap<Symbol, f64> {
    symbols.into_iter().map(|s| (s.clone(), 1.0)).collect()
}

/// Market-cap weights of the symbols that report one.
pub fn market_cap_weights(info: &HashMap<Symbol, TickerInfo>) -> HashMap<Symbol, f64> {
    info.iter()
        .filter_map(|(symbol, i)| {
            i.market_cap
                .filter(|cap| cap.is_finite() && *cap > 0.0)
                .map(|cap| (symbol.clone(), cap))
        })
        .collect()
}

/// Builds a benchmark metric series as the weighted mean of the universe.
///
/// Series are aligned by position from the latest report. At each offset
/// the benchmark is the weighted mean over the tickers with a finite value
/// there and a finite positive weight. Dates come from the longest
/// contributing series.
///
/// # Errors
///
/// Returns [`RsRatingError::InsufficientData`] if no ticker contributes.
pub fn calc_weighted_metric(
    financials: &HashMap<Symbol, Financials>,
    weights: &HashMap<Symbol, f64>,
    frequency: Frequency,
) -> Result<MetricSeries> {
    let contributing: BTreeMap<&Symbol, (&MetricSeries, f64)> = financials
        .iter()
        .filter_map(|(symbol, f)| {
            let weight = weights.get(symbol).copied()?;
            let series = f.series(frequency);
            (weight.is_finite() && weight > 0.0 && !series.finite_values().is_empty())
                .then_some((symbol, (series, weight)))
        })
        .collect();

    let longest = contributing
        .values()
        .map(|(s, _)| *s)
        .max_by_key(|s| s.len())
        .ok_or_else(|| {
            RsRatingError::InsufficientData(format!(
                "no ticker has {frequency:?} data with a positive weight"
            ))
        })?;

    let len = longest.len();
    let mut values = vec![f64::NAN; len];
    for (offset, slot) in values.iter_mut().rev().enumerate() {
        let (metric, weight): (Vec<f64>, Vec<f64>) = contributing
            .values()
            .filter(|(s, _)| s.len() > offset)
            .map(|(s, w)| (s.values()[s.len() - 1 - offset], *w))
            .unzip();
        *slot = weighted_mean(&Array1::from(metric), &Array1::from(weight)).unwrap_or(f64::NAN);
    }

    longest.with_values(values)
}

/// One row of the financial-metric ranking table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRanking {
    /// 1-based position by strength.
    pub rank: u32,
    /// Ticker symbol.
    pub ticker: Symbol,
    /// Company name, if known.
    pub name: Option<String>,
    /// Sector, if known.
    pub sector: Option<String>,
    /// Industry, if known.
    pub industry: Option<String>,
    /// Strength of quarterly growth against the benchmark.
    pub quarterly: f64,
    /// Strength of annual growth against the benchmark.
    pub annual: f64,
    /// Strength of combined growth against the benchmark.
    pub rs: f64,
    /// Percentile of the combined strength.
    pub percentile: Option<i64>,
}

impl MetricRanking {
    /// Scores one ticker against the benchmark. The row is unranked.
    pub fn score(
        ticker: &str,
        financials: &Financials,
        bench_q: &MetricSeries,
        bench_a: &MetricSeries,
        info: Option<&TickerInfo>,
        config: &FinancialStrengthConfig,
    ) -> Self {
        let growth = |s: &MetricSeries, f: Frequency| metric_growth(s, config.growth_weights(f));
        Self {
            rank: 0,
            ticker: ticker.to_string(),
            name: info.and_then(|i| i.name.clone()),
            sector: info.and_then(|i| i.sector.clone()),
            industry: info.and_then(|i| i.industry.clone()),
            quarterly: metric_strength(
                growth(&financials.quarterly, Frequency::Quarterly),
                growth(bench_q, Frequency::Quarterly),
            ),
            annual: metric_strength(
                growth(&financials.annual, Frequency::Annual),
                growth(bench_a, Frequency::Annual),
            ),
            rs: metric_strength_vs_benchmark(
                &financials.quarterly,
                &financials.annual,
                bench_q,
                bench_a,
                config,
            ),
            percentile: None,
        }
    }
}

/// Scores percentiles, sorts by strength and ranks the rows.
pub fn rank_metrics(mut rows: Vec<MetricRanking>, method: PercentileMethod) -> Vec<MetricRanking> {
    let values: Vec<f64> = rows.iter().map(|r| r.rs).collect();
    for (row, pct) in rows.iter_mut().zip(calc_percentile(&values, method)) {
        row.percentile = pct;
    }
    rows.sort_by(|a, b| desc_nan_last(a.rs, b.rs));
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i as u32 + 1;
    }
    rows
}

/// Converts metric rows into a DataFrame with display column names.
///
/// # Errors
///
/// Returns an error if the DataFrame cannot be built.
pub fn metrics_frame(rows: &[MetricRanking], metric: FinancialMetric) -> Result<DataFrame> {
    let num = |f: fn(&MetricRanking) -> f64| {
        rows.iter()
            .map(|r| {
                let v = f(r);
                v.is_finite().then_some(v)
            })
            .collect::<Vec<Option<f64>>>()
    };
    let text = |f: fn(&MetricRanking) -> Option<String>| rows.iter().map(f).collect::<Vec<_>>();

    let columns = vec![
        Column::new("Rank".into(), rows.iter().map(|r| r.rank).collect::<Vec<u32>>()),
        Column::new(
            "Ticker".into(),
            rows.iter().map(|r| r.ticker.clone()).collect::<Vec<String>>(),
        ),
        Column::new("Name".into(), text(|r| r.name.clone())),
        Column::new("Sector".into(), text(|r| r.sector.clone())),
        Column::new("Industry".into(), text(|r| r.industry.clone())),
        Column::new(format!("{} (Q)", metric.label()).into(), num(|r| r.quarterly)),
        Column::new(format!("{} (Y)", metric.label()).into(), num(|r| r.annual)),
        Column::new(RS_COLUMN.into(), num(|r| r.rs)),
        Column::new(
            "Percentile".into(),
            rows.iter().map(|r| r.percentile).collect::<Vec<Option<i64>>>(),
        ),
    ];
    Ok(DataFrame::new(columns)?)
}

/// Groups a metric ranking table by industry, scores the mean strength and
/// ranks the industries.
///
/// # Errors
///
/// Returns an error if the table lacks the metric ranking columns.
pub fn metric_industries_frame(
    df: &DataFrame,
    metric: FinancialMetric,
    method: PercentileMethod,
) -> Result<DataFrame> {
    let q_col = format!("{} (Q)", metric.label());
    let a_col = format!("{} (Y)", metric.label());
    let mut grouped = groupby_industry(
        df,
        &["Sector", q_col.as_str(), a_col.as_str(), RS_COLUMN, "Ticker"],
        RS_COLUMN,
    )?;

    let percentiles = calc_percentile(&column_values(&grouped, RS_COLUMN)?, method);
    grouped.with_column(Column::new("Percentile".into(), percentiles))?;
    sort_and_rank(&grouped, RS_COLUMN)
}
