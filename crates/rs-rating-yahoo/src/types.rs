//! Response types and parsers for the Yahoo Finance endpoints.

use chrono::{DateTime, NaiveDate};
use rs_rating_traits::{FinancialMetric, Financials, Frequency, MetricSeries, PriceSeries, TickerInfo};
use serde::Deserialize;
use serde_json::Value;

use crate::{Result, error::YahooError};

/// Error object embedded in Yahoo responses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

impl ApiErrorBody {
    fn into_error(self, symbol: &str) -> YahooError {
        if self.code.eq_ignore_ascii_case("Not Found") {
            YahooError::SymbolNotFound(symbol.to_string())
        } else {
            YahooError::Api(format!("{}: {}", self.code, self.description))
        }
    }
}

// ---------------------------------------------------------------------------
// Chart (price history)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    /// Exchange offset from UTC in seconds.
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteIndicator>,
    #[serde(default)]
    adjclose: Vec<AdjCloseIndicator>,
}

#[derive(Debug, Deserialize)]
struct QuoteIndicator {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseIndicator {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

/// Parses a chart response into a close series, preferring adjusted closes.
///
/// Bars are dated in the exchange's local time. A trailing intraday bar
/// that shares a date with the previous bar replaces it.
pub(crate) fn parse_chart(text: &str, symbol: &str) -> Result<PriceSeries> {
    let response: ChartResponse = serde_json::from_str(text)?;
    if let Some(error) = response.chart.error {
        return Err(error.into_error(symbol));
    }

    let result = response
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| YahooError::NoData(symbol.to_string()))?;

    let closes = result
        .indicators
        .adjclose
        .into_iter()
        .next()
        .map(|a| a.adjclose)
        .filter(|a| a.len() == result.timestamp.len())
        .or_else(|| {
            result
                .indicators
                .quote
                .into_iter()
                .next()
                .map(|q| q.close)
        })
        .ok_or_else(|| YahooError::NoData(symbol.to_string()))?;

    let pairs: Vec<(NaiveDate, f64)> = result
        .timestamp
        .iter()
        .zip(closes)
        .filter_map(|(ts, close)| {
            let date = DateTime::from_timestamp(ts + result.meta.gmtoffset, 0)?.date_naive();
            Some((date, close.unwrap_or(f64::NAN)))
        })
        .collect();

    if pairs.is_empty() {
        return Err(YahooError::NoData(symbol.to_string()));
    }
    Ok(PriceSeries::from_pairs(pairs))
}

// ---------------------------------------------------------------------------
// Quote summary (ticker info)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryResponse {
    quote_summary: QuoteSummaryBody,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryBody {
    result: Option<Vec<QuoteSummaryResult>>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryResult {
    #[serde(default)]
    asset_profile: Option<AssetProfile>,
    #[serde(default)]
    price: Option<PriceModule>,
    #[serde(default)]
    default_key_statistics: Option<KeyStatistics>,
}

#[derive(Debug, Default, Deserialize)]
struct AssetProfile {
    sector: Option<String>,
    industry: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceModule {
    long_name: Option<String>,
    short_name: Option<String>,
    #[serde(default)]
    market_cap: RawValue,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeyStatistics {
    #[serde(default)]
    shares_outstanding: RawValue,
}

/// A `{"raw": 1.0, "fmt": "1.00"}` number. Yahoo sends `{}` when missing.
#[derive(Debug, Default, Deserialize)]
struct RawValue {
    raw: Option<f64>,
}

/// Parses a quote-summary response into ticker profile information.
pub(crate) fn parse_quote_summary(text: &str, symbol: &str) -> Result<TickerInfo> {
    let response: QuoteSummaryResponse = serde_json::from_str(text)?;
    if let Some(error) = response.quote_summary.error {
        return Err(error.into_error(symbol));
    }

    let result = response
        .quote_summary
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| YahooError::NoData(symbol.to_string()))?;

    let profile = result.asset_profile.unwrap_or_default();
    let price = result.price.unwrap_or_default();
    let stats = result.default_key_statistics.unwrap_or_default();

    Ok(TickerInfo {
        name: price.long_name.or(price.short_name),
        sector: profile.sector.filter(|s| !s.is_empty()),
        industry: profile.industry.filter(|s| !s.is_empty()),
        market_cap: price.market_cap.raw,
        shares_outstanding: stats.shares_outstanding.raw,
    })
}

// ---------------------------------------------------------------------------
// Fundamentals time series (financial statements)
// ---------------------------------------------------------------------------

/// Extracts one metric series from a fundamentals time-series response.
fn timeseries_entries(results: &[Value], key: &str) -> Option<MetricSeries> {
    let entries = results.iter().find_map(|r| {
        let kind = r["meta"]["type"].as_array()?.first()?.as_str()?;
        (kind == key).then(|| r[key].as_array()).flatten()
    })?;

    let pairs = entries
        .iter()
        .filter_map(|entry| {
            let date = NaiveDate::parse_from_str(entry["asOfDate"].as_str()?, "%Y-%m-%d").ok()?;
            let value = entry["reportedValue"]["raw"].as_f64()?;
            Some((date, value))
        })
        .collect();

    Some(MetricSeries::from_pairs(pairs))
}

/// Parses a fundamentals time-series response into quarterly and annual
/// series of `metric`.
pub(crate) fn parse_timeseries(text: &str, symbol: &str, metric: FinancialMetric) -> Result<Financials> {
    let body: Value = serde_json::from_str(text)?;
    let timeseries = &body["timeseries"];

    if let Some(error) = timeseries.get("error").filter(|e| !e.is_null()) {
        let error: ApiErrorBody = serde_json::from_value(error.clone())?;
        return Err(error.into_error(symbol));
    }

    let results = timeseries["result"]
        .as_array()
        .ok_or_else(|| YahooError::NoData(symbol.to_string()))?;

    let quarterly = timeseries_entries(results, &metric.yahoo_key(Frequency::Quarterly)).unwrap_or_default();
    let annual = timeseries_entries(results, &metric.yahoo_key(Frequency::Annual)).unwrap_or_default();

    if quarterly.is_empty() && annual.is_empty() {
        return Err(YahooError::NoData(format!("{symbol} {metric}")));
    }

    Ok(Financials {
        metric,
        quarterly,
        annual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHART: &str = r#"{
        "chart": {
            "result": [{
                "meta": {"currency": "USD", "symbol": "AAPL", "gmtoffset": -14400},
                "timestamp": [1704205800, 1704292200, 1704378600, 1704390000],
                "indicators": {
                    "quote": [{"close": [185.64, 184.25, null, 181.0]}],
                    "adjclose": [{"adjclose": [184.94, 183.55, null, 180.5]}]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn test_parse_chart_prefers_adjclose() {
        let series = parse_chart(CHART, "AAPL").unwrap();
        // the last two timestamps fall on 2024-01-04 local time
        assert_eq!(series.len(), 3);
        assert_eq!(series.dates()[0], NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(series.values()[0], 184.94);
        assert_eq!(series.values()[2], 180.5);
    }

    #[test]
    fn test_parse_chart_falls_back_to_close() {
        let text = r#"{"chart": {"result": [{
            "timestamp": [1704205800, 1704292200],
            "indicators": {"quote": [{"close": [4742.83, null]}]}
        }], "error": null}}"#;
        let series = parse_chart(text, "^GSPC").unwrap();
        assert_eq!(series.values()[0], 4742.83);
        assert!(series.values()[1].is_nan());
    }

    #[test]
    fn test_parse_chart_not_found() {
        let text = r#"{"chart": {"result": null, "error": {
            "code": "Not Found",
            "description": "No data found, symbol may be delisted"
        }}}"#;
        assert!(matches!(
            parse_chart(text, "ZZZZ"),
            Err(YahooError::SymbolNotFound(s)) if s == "ZZZZ"
        ));
    }

    #[test]
    fn test_parse_chart_empty() {
        let text = r#"{"chart": {"result": [{"indicators": {"quote": [{}]}}], "error": null}}"#;
        assert!(matches!(parse_chart(text, "X"), Err(YahooError::NoData(_))));
    }

    #[test]
    fn test_parse_quote_summary() {
        let text = r#"{"quoteSummary": {"result": [{
            "assetProfile": {"sector": "Technology", "industry": "Consumer Electronics", "fullTimeEmployees": 161000},
            "price": {"longName": "Apple Inc.", "shortName": "Apple", "marketCap": {"raw": 3.4e12, "fmt": "3.4T"}},
            "defaultKeyStatistics": {"sharesOutstanding": {"raw": 15204100096, "fmt": "15.2B"}}
        }], "error": null}}"#;

        let info = parse_quote_summary(text, "AAPL").unwrap();
        assert_eq!(info.name.as_deref(), Some("Apple Inc."));
        assert_eq!(info.sector.as_deref(), Some("Technology"));
        assert_eq!(info.industry.as_deref(), Some("Consumer Electronics"));
        assert_eq!(info.market_cap, Some(3.4e12));
        assert_eq!(info.shares_outstanding, Some(15_204_100_096.0));
    }

    #[test]
    fn test_parse_quote_summary_etf_without_profile() {
        let text = r#"{"quoteSummary": {"result": [{
            "price": {"shortName": "SPDR S&P 500", "marketCap": {}}
        }], "error": null}}"#;

        let info = parse_quote_summary(text, "SPY").unwrap();
        assert_eq!(info.name.as_deref(), Some("SPDR S&P 500"));
        assert!(info.sector.is_none());
        assert!(info.market_cap.is_none());
    }

    #[test]
    fn test_parse_timeseries() {
        let text = r#"{"timeseries": {"result": [
            {
                "meta": {"symbol": ["AAPL"], "type": ["quarterlyDilutedEPS"]},
                "timestamp": [1695945600, 1703980800],
                "quarterlyDilutedEPS": [
                    {"asOfDate": "2023-12-31", "periodType": "3M", "reportedValue": {"raw": 2.18, "fmt": "2.18"}},
                    null,
                    {"asOfDate": "2023-09-30", "periodType": "3M", "reportedValue": {"raw": 1.46, "fmt": "1.46"}}
                ]
            },
            {
                "meta": {"symbol": ["AAPL"], "type": ["annualDilutedEPS"]},
                "timestamp": [1695945600],
                "annualDilutedEPS": [
                    {"asOfDate": "2023-09-30", "periodType": "12M", "reportedValue": {"raw": 6.13, "fmt": "6.13"}}
                ]
            }
        ], "error": null}}"#;

        let fin = parse_timeseries(text, "AAPL", FinancialMetric::Eps).unwrap();
        assert_eq!(fin.metric, FinancialMetric::Eps);
        assert_eq!(fin.quarterly.values(), &[1.46, 2.18]);
        assert_eq!(
            fin.quarterly.last_date(),
            NaiveDate::from_ymd_opt(2023, 12, 31)
        );
        assert_eq!(fin.annual.values(), &[6.13]);
    }

    #[test]
    fn test_parse_timeseries_missing_metric() {
        let text = r#"{"timeseries": {"result": [
            {"meta": {"symbol": ["SPY"], "type": ["quarterlyDilutedEPS"]}}
        ], "error": null}}"#;
        assert!(matches!(
            parse_timeseries(text, "SPY", FinancialMetric::Eps),
            Err(YahooError::NoData(_))
        ));
    }
}
