//! Fetch, rate and rank: the pipeline shared by the price-based drivers.

use std::collections::HashMap;

use polars::prelude::DataFrame;
use rs_rating_signals::ranking::{
    StockSnapshot, industries_frame, rank_industries, rank_stocks, stocks_frame,
};
use rs_rating_traits::{
    DataProvider, MarketData, PriceSeries, RatingMethod, Result, RsRatingError, Symbol, TickerInfo,
};
use tracing::{debug, info, warn};

use crate::config::RankingConfig;

/// A ranking table and the ranking of the industries it covers.
#[derive(Debug, Clone)]
pub struct RankingTables {
    /// Ranked stocks.
    pub stocks: DataFrame,
    /// Ranked industries.
    pub industries: DataFrame,
}

impl RankingTables {
    /// Whether either table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stocks.height() == 0 || self.industries.height() == 0
    }
}

/// Drops duplicated tickers, keeping the first occurrence.
pub(crate) fn unique_tickers(tickers: &[Symbol]) -> Vec<Symbol> {
    let mut unique: Vec<Symbol> = Vec::with_capacity(tickers.len());
    for ticker in tickers {
        if !unique.contains(ticker) {
            unique.push(ticker.clone());
        }
    }
    unique
}

pub(crate) fn ensure_tickers(tickers: &[Symbol]) -> Result<()> {
    if tickers.is_empty() {
        return Err(RsRatingError::InsufficientData(
            "no tickers to rank".to_string(),
        ));
    }
    Ok(())
}

/// Rates every ticker with `method` against the reference and ranks the
/// stocks and their industries.
pub(crate) async fn rank_prices<P: DataProvider>(
    provider: &P,
    tickers: &[Symbol],
    config: &RankingConfig,
    method: &dyn RatingMethod,
) -> Result<RankingTables> {
    let tickers = unique_tickers(tickers);
    ensure_tickers(&tickers)?;

    let mut symbols = vec![config.reference.clone()];
    symbols.extend(tickers.iter().filter(|t| **t != config.reference).cloned());

    info!(
        method = method.name(),
        reference = %config.reference,
        tickers = tickers.len(),
        interval = %config.interval,
        range = %config.range,
        "Fetching price history"
    );
    let (data, info) = tokio::try_join!(
        provider.closes(&symbols, config.range, config.interval),
        provider.tickers_info(&tickers),
    )?;
    let closes_ref = data.closes(&config.reference)?;

    let snapshots: Vec<StockSnapshot> = tickers
        .iter()
        .filter_map(|ticker| {
            if !data.has_symbol(ticker) {
                warn!(ticker = %ticker, "No price data, skipping");
                return None;
            }
            rate(ticker, &data, &closes_ref, &info, config, method)
                .inspect_err(|e| warn!(ticker = %ticker, error = %e, "Cannot rate, skipping"))
                .ok()
        })
        .collect();

    if snapshots.is_empty() {
        return Err(RsRatingError::InsufficientData(
            "no ticker could be rated".to_string(),
        ));
    }

    let stocks = rank_stocks(snapshots, config.method);
    let industries = rank_industries(&stocks, config.min_industry_size, config.method);
    info!(
        stocks = stocks.len(),
        industries = industries.len(),
        "Ranked"
    );

    Ok(RankingTables {
        stocks: stocks_frame(&stocks)?,
        industries: industries_frame(&industries)?,
    })
}

fn rate(
    ticker: &str,
    data: &MarketData,
    closes_ref: &PriceSeries,
    info: &HashMap<Symbol, TickerInfo>,
    config: &RankingConfig,
    method: &dyn RatingMethod,
) -> Result<StockSnapshot> {
    let closes = data.closes(ticker)?;
    let rs = method.compute(&closes, closes_ref, config.interval)?;
    let snapshot = StockSnapshot::from_series(ticker, &closes, &rs, info.get(ticker))?;
    debug!(ticker, rs = snapshot.rs, price = snapshot.price, "Rated");
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_tickers() {
        let tickers: Vec<Symbol> = ["AAPL", "MSFT", "AAPL", "NVDA"]
            .iter()
            .map(|s| (*s).to_string())
            .collect();
        assert_eq!(unique_tickers(&tickers), vec!["AAPL", "MSFT", "NVDA"]);
    }

    #[test]
    fn test_ensure_tickers() {
        assert!(matches!(
            ensure_tickers(&[]),
            Err(RsRatingError::InsufficientData(_))
        ));
        assert!(ensure_tickers(&["AAPL".to_string()]).is_ok());
    }
}
