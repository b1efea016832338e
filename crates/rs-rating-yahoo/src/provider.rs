//! [`DataProvider`] implementation backed by Yahoo Finance.

use std::collections::HashMap;

use rs_rating_traits::{
    DataProvider, FinancialMetric, Financials, HistoryRange, Interval, MarketData, Result,
    Symbol, TickerInfo,
};

use crate::YahooClient;

impl DataProvider for YahooClient {
    async fn closes(
        &self,
        symbols: &[Symbol],
        range: HistoryRange,
        interval: Interval,
    ) -> Result<MarketData> {
        Ok(self.download(symbols, range, interval).await?)
    }

    async fn tickers_info(&self, symbols: &[Symbol]) -> Result<HashMap<Symbol, TickerInfo>> {
        Ok(self.download_tickers_info(symbols).await)
    }

    async fn financials(
        &self,
        symbols: &[Symbol],
        metric: FinancialMetric,
    ) -> Result<HashMap<Symbol, Financials>> {
        Ok(self.download_financials(symbols, metric).await)
    }
}
