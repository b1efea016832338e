//! In-memory data provider and fixtures for driver tests.

use std::collections::HashMap;

use chrono::NaiveDate;
use rs_rating_traits::{
    DataProvider, FinancialMetric, Financials, HistoryRange, Interval, MarketData, MetricSeries,
    PriceSeries, Result, Symbol, TickerInfo,
};

/// Serves fixed closes, profiles and financials.
#[derive(Debug, Default)]
pub(crate) struct StaticProvider {
    pub(crate) closes: Vec<(Symbol, PriceSeries)>,
    pub(crate) info: HashMap<Symbol, TickerInfo>,
    pub(crate) financials: HashMap<Symbol, Financials>,
}

impl StaticProvider {
    pub(crate) fn with_closes(mut self, ticker: &str, series: PriceSeries) -> Self {
        self.closes.push((ticker.to_string(), series));
        self
    }

    pub(crate) fn with_info(
        mut self,
        ticker: &str,
        sector: &str,
        industry: &str,
        market_cap: Option<f64>,
    ) -> Self {
        self.info.insert(
            ticker.to_string(),
            TickerInfo {
                name: Some(format!("{ticker} Inc.")),
                sector: Some(sector.to_string()),
                industry: Some(industry.to_string()),
                market_cap,
                shares_outstanding: None,
            },
        );
        self
    }

    pub(crate) fn with_financials(mut self, ticker: &str, quarterly: &[f64], annual: &[f64]) -> Self {
        self.financials.insert(
            ticker.to_string(),
            Financials {
                metric: FinancialMetric::Eps,
                quarterly: reports(quarterly, 3),
                annual: reports(annual, 12),
            },
        );
        self
    }
}

impl DataProvider for StaticProvider {
    async fn closes(
        &self,
        symbols: &[Symbol],
        _range: HistoryRange,
        _interval: Interval,
    ) -> Result<MarketData> {
        let series = symbols
            .iter()
            .filter_map(|s| self.closes.iter().find(|(t, _)| t == s).cloned())
            .collect();
        MarketData::align(series)
    }

    async fn tickers_info(&self, symbols: &[Symbol]) -> Result<HashMap<Symbol, TickerInfo>> {
        Ok(symbols
            .iter()
            .filter_map(|s| self.info.get(s).map(|i| (s.clone(), i.clone())))
            .collect())
    }

    async fn financials(
        &self,
        symbols: &[Symbol],
        _metric: FinancialMetric,
    ) -> Result<HashMap<Symbol, Financials>> {
        Ok(symbols
            .iter()
            .filter_map(|s| self.financials.get(s).map(|f| (s.clone(), f.clone())))
            .collect())
    }
}

/// First-of-month dates from January 2023.
pub(crate) fn month_starts(n: usize) -> Vec<NaiveDate> {
    (0..n)
        .map(|i| {
            let year = 2023 + (i / 12) as i32;
            let month = (i % 12) as u32 + 1;
            NaiveDate::from_ymd_opt(year, month, 1).unwrap()
        })
        .collect()
}

/// Monthly closes compounding at `rate` per bar.
pub(crate) fn compounding(start: f64, rate: f64, n: usize) -> PriceSeries {
    let values = (0..n).map(|i| start * (1.0 + rate).powi(i as i32)).collect();
    PriceSeries::new(month_starts(n), values).unwrap()
}

/// Metric reports `step_months` apart, ending in December 2024.
fn reports(values: &[f64], step_months: usize) -> MetricSeries {
    let n = values.len();
    let pairs = values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let months_back = (n - 1 - i) * step_months;
            let total = 2024 * 12 + 11 - months_back;
            let date = NaiveDate::from_ymd_opt((total / 12) as i32, (total % 12) as u32 + 1, 28)
                .unwrap();
            (date, *v)
        })
        .collect();
    MetricSeries::from_pairs(pairs)
}

pub(crate) fn symbols(tickers: &[&str]) -> Vec<Symbol> {
    tickers.iter().map(|t| (*t).to_string()).collect()
}
