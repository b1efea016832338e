//! Data provider trait for market data acquisition.
//!
//! Ranking drivers are generic over [`DataProvider`] so that the same
//! pipeline runs against the Yahoo Finance client in production and an
//! in-memory provider in tests.

use std::{collections::HashMap, future::Future};

use crate::{FinancialMetric, Financials, HistoryRange, Interval, MarketData, Result, Symbol, TickerInfo};

/// A source of close prices, ticker profiles and financial statements.
///
/// Bulk methods are partial-failure tolerant: a symbol that cannot be
/// fetched is omitted from the result rather than failing the batch.
pub trait DataProvider: Send + Sync {
    /// Fetches close prices for `symbols`, aligned on a shared date axis.
    fn closes(
        &self,
        symbols: &[Symbol],
        range: HistoryRange,
        interval: Interval,
    ) -> impl Future<Output = Result<MarketData>> + Send;

    /// Fetches profile information (sector, industry, market cap, ...).
    fn tickers_info(
        &self,
        symbols: &[Symbol],
    ) -> impl Future<Output = Result<HashMap<Symbol, TickerInfo>>> + Send;

    /// Fetches quarterly and annual history of one financial metric.
    fn financials(
        &self,
        symbols: &[Symbol],
        metric: FinancialMetric,
    ) -> impl Future<Output = Result<HashMap<Symbol, Financials>>> + Send;
}
