//! Yahoo Finance client implementation.

use std::{collections::HashMap, env, future::Future, time::Duration};

use futures::{StreamExt, stream};
use reqwest::{Client, StatusCode};
use rs_rating_traits::{
    FinancialMetric, Financials, Frequency, HistoryRange, Interval, MarketData, PriceSeries,
    Symbol, TickerInfo,
};
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::{
    Result,
    error::YahooError,
    types::{parse_chart, parse_quote_summary, parse_timeseries},
};

/// Browser-like user agent; Yahoo rejects requests without one.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Earliest `period1` accepted by the fundamentals time-series endpoint
/// (1985-08-23).
const TIMESERIES_START: i64 = 493_590_046;

/// Quote-summary modules that carry the ticker profile.
const QUOTE_SUMMARY_MODULES: &str = "assetProfile,price,defaultKeyStatistics";

/// Configuration for [`YahooClient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YahooConfig {
    /// Chart (price history) endpoint.
    pub chart_url: String,
    /// Quote-summary (profile) endpoint.
    pub quote_summary_url: String,
    /// Fundamentals time-series endpoint.
    pub timeseries_url: String,
    /// Page that sets the session cookie.
    pub cookie_url: String,
    /// Endpoint returning the crumb for the session cookie.
    pub crumb_url: String,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum number of requests in flight during bulk downloads.
    pub max_workers: usize,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            chart_url: "https://query1.finance.yahoo.com/v8/finance/chart".to_string(),
            quote_summary_url: "https://query2.finance.yahoo.com/v10/finance/quoteSummary"
                .to_string(),
            timeseries_url:
                "https://query2.finance.yahoo.com/ws/fundamentals-timeseries/v1/finance/timeseries"
                    .to_string(),
            cookie_url: "https://fc.yahoo.com".to_string(),
            crumb_url: "https://query1.finance.yahoo.com/v1/test/getcrumb".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            max_workers: 8,
        }
    }
}

/// Percent-encodes the characters of index and currency symbols that are
/// not path-safe (`^GSPC`, `EURUSD=X`).
fn encode_symbol(symbol: &str) -> String {
    symbol.replace('^', "%5E").replace('=', "%3D")
}

/// Yahoo Finance API client.
///
/// Bulk downloads run at most [`YahooConfig::max_workers`] requests at a
/// time. A symbol that fails is logged and left out of the result.
#[derive(Debug)]
pub struct YahooClient {
    client: Client,
    config: YahooConfig,
    crumb: OnceCell<String>,
}

impl YahooClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: YahooConfig) -> Result<Self> {
        if config.max_workers == 0 {
            return Err(YahooError::Config("max_workers must be positive".to_string()));
        }
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            config,
            crumb: OnceCell::new(),
        })
    }

    /// Create a new client from the environment.
    ///
    /// Reads `RS_RATING_USER_AGENT` and `RS_RATING_MAX_WORKERS`. This will
    /// also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if `RS_RATING_MAX_WORKERS` is not a positive integer.
    pub fn from_env() -> Result<Self> {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let mut config = YahooConfig::default();
        if let Ok(agent) = env::var("RS_RATING_USER_AGENT") {
            config.user_agent = agent;
        }
        if let Ok(workers) = env::var("RS_RATING_MAX_WORKERS") {
            config.max_workers = workers.trim().parse().map_err(|_| {
                YahooError::Config(format!("RS_RATING_MAX_WORKERS must be an integer, got '{workers}'"))
            })?;
        }
        Self::new(config)
    }

    /// The client configuration.
    #[must_use]
    pub const fn config(&self) -> &YahooConfig {
        &self.config
    }

    /// Chart endpoint for a symbol.
    fn chart_endpoint(&self, symbol: &str) -> String {
        format!("{}/{}", self.config.chart_url, encode_symbol(symbol))
    }

    /// Quote-summary endpoint for a symbol.
    fn quote_summary_endpoint(&self, symbol: &str) -> String {
        format!("{}/{}", self.config.quote_summary_url, encode_symbol(symbol))
    }

    /// Fundamentals time-series endpoint for a symbol.
    fn timeseries_endpoint(&self, symbol: &str) -> String {
        format!("{}/{}", self.config.timeseries_url, encode_symbol(symbol))
    }

    /// Make a GET request and return the body text.
    async fn get_text(&self, url: &str, query: &[(&str, String)], symbol: &str) -> Result<String> {
        debug!(url, ?query, "GET");
        let response = self.client.get(url).query(query).send().await?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => return Err(YahooError::RateLimitExceeded),
            StatusCode::NOT_FOUND => return Err(YahooError::SymbolNotFound(symbol.to_string())),
            status if !status.is_success() => {
                let text = response.text().await.unwrap_or_default();
                return Err(YahooError::Api(format!("HTTP {status}: {text}")));
            }
            _ => {}
        }

        Ok(response.text().await?)
    }

    /// The session crumb, fetched once per client.
    async fn crumb(&self) -> Result<&str> {
        let crumb = self
            .crumb
            .get_or_try_init(|| async {
                // The response status does not matter; only the cookie does.
                let _ = self.client.get(&self.config.cookie_url).send().await?;
                let crumb = self
                    .client
                    .get(&self.config.crumb_url)
                    .send()
                    .await?
                    .text()
                    .await?;
                let crumb = crumb.trim().to_string();
                if crumb.is_empty() || crumb.contains('<') || crumb.contains(' ') {
                    return Err(YahooError::MissingCrumb);
                }
                debug!("obtained Yahoo crumb");
                Ok::<_, YahooError>(crumb)
            })
            .await?;
        Ok(crumb.as_str())
    }

    /// Get the close history of a symbol, adjusted for splits and dividends
    /// when available.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the symbol has no data.
    pub async fn history(
        &self,
        symbol: &str,
        range: HistoryRange,
        interval: Interval,
    ) -> Result<PriceSeries> {
        let query = [
            ("range", range.as_str().to_string()),
            ("interval", interval.as_str().to_string()),
            ("includeAdjustedClose", "true".to_string()),
        ];
        let text = self.get_text(&self.chart_endpoint(symbol), &query, symbol).await?;
        parse_chart(&text, symbol)
    }

    /// Get the close history of many symbols, aligned on the union of dates.
    /// Columns follow the order of `symbols`.
    ///
    /// # Errors
    ///
    /// Returns an error only if no symbol could be fetched.
    pub async fn download(
        &self,
        symbols: &[Symbol],
        range: HistoryRange,
        interval: Interval,
    ) -> Result<MarketData> {
        let mut fetched = self
            .fetch_all(symbols, "price history", move |symbol| async move {
                self.history(&symbol, range, interval).await
            })
            .await;

        let series: Vec<(Symbol, PriceSeries)> = symbols
            .iter()
            .filter_map(|s| fetched.remove(s).map(|p| (s.clone(), p)))
            .collect();

        if series.is_empty() {
            return Err(YahooError::NoData(symbols.join(",")));
        }
        Ok(MarketData::align(series)?)
    }

    /// Get the profile (name, sector, industry, market cap) of a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the crumb handshake or the request fails.
    pub async fn ticker_info(&self, symbol: &str) -> Result<TickerInfo> {
        let crumb = self.crumb().await?;
        let query = [
            ("modules", QUOTE_SUMMARY_MODULES.to_string()),
            ("crumb", crumb.to_string()),
        ];
        let text = self
            .get_text(&self.quote_summary_endpoint(symbol), &query, symbol)
            .await?;
        parse_quote_summary(&text, symbol)
    }

    /// Get the profiles of many symbols. Failed symbols are left out.
    pub async fn download_tickers_info(&self, symbols: &[Symbol]) -> HashMap<Symbol, TickerInfo> {
        self.fetch_all(symbols, "ticker info", move |symbol| async move {
            self.ticker_info(&symbol).await
        })
        .await
    }

    /// Get the quarterly and annual history of one financial metric.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the metric is not reported.
    pub async fn fetch_financials(&self, symbol: &str, metric: FinancialMetric) -> Result<Financials> {
        let types = [
            metric.yahoo_key(Frequency::Quarterly),
            metric.yahoo_key(Frequency::Annual),
        ]
        .join(",");
        let query = [
            ("symbol", symbol.to_string()),
            ("type", types),
            ("period1", TIMESERIES_START.to_string()),
            ("period2", chrono::Utc::now().timestamp().to_string()),
        ];
        let text = self
            .get_text(&self.timeseries_endpoint(symbol), &query, symbol)
            .await?;
        parse_timeseries(&text, symbol, metric)
    }

    /// Get one financial metric for many symbols. Failed symbols are left out.
    pub async fn download_financials(
        &self,
        symbols: &[Symbol],
        metric: FinancialMetric,
    ) -> HashMap<Symbol, Financials> {
        self.fetch_all(symbols, "financials", move |symbol| async move {
            self.fetch_financials(&symbol, metric).await
        })
        .await
    }

    /// Runs `fetch` for every symbol with at most `max_workers` in flight.
    async fn fetch_all<T, F, Fut>(&self, symbols: &[Symbol], what: &str, fetch: F) -> HashMap<Symbol, T>
    where
        F: Fn(Symbol) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let results: Vec<(Symbol, Result<T>)> = stream::iter(symbols.iter().cloned())
            .map(|symbol| {
                let fut = fetch(symbol.clone());
                async move { (symbol, fut.await) }
            })
            .buffer_unordered(self.config.max_workers)
            .collect()
            .await;

        let mut fetched = HashMap::with_capacity(results.len());
        for (symbol, result) in results {
            match result {
                Ok(value) => {
                    fetched.insert(symbol, value);
                }
                Err(e) => warn!(%symbol, error = %e, "failed to fetch {what}"),
            }
        }
        info!("fetched {what} for {} of {} symbols", fetched.len(), symbols.len());
        fetched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = YahooConfig::default();
        assert_eq!(config.max_workers, 8);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.chart_url.ends_with("/v8/finance/chart"));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let config = YahooConfig {
            max_workers: 0,
            ..Default::default()
        };
        assert!(matches!(YahooClient::new(config), Err(YahooError::Config(_))));
    }

    #[test]
    fn test_endpoint_building() {
        let client = YahooClient::new(YahooConfig::default()).unwrap();
        assert_eq!(
            client.chart_endpoint("^GSPC"),
            "https://query1.finance.yahoo.com/v8/finance/chart/%5EGSPC"
        );
        assert_eq!(
            client.quote_summary_endpoint("BRK-B"),
            "https://query2.finance.yahoo.com/v10/finance/quoteSummary/BRK-B"
        );
        assert_eq!(
            client.timeseries_endpoint("AAPL"),
            "https://query2.finance.yahoo.com/ws/fundamentals-timeseries/v1/finance/timeseries/AAPL"
        );
    }

    #[test]
    fn test_encode_symbol() {
        assert_eq!(encode_symbol("^SOX"), "%5ESOX");
        assert_eq!(encode_symbol("EURUSD=X"), "EURUSD%3DX");
        assert_eq!(encode_symbol("MSFT"), "MSFT");
    }
}
