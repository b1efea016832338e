//! Common types used throughout rs-rating.
//!
//! This module defines the data frequency and history-range enums, the
//! per-ticker profile and fundamentals records, and [`MarketData`], the
//! aligned close-price panel that every ranking is computed from.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    Result, RsRatingError,
    series::{MetricSeries, PriceSeries},
};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A market symbol identifier, e.g. `"AAPL"` or `"^GSPC"`.
pub type Symbol = String;

/// Days between 0001-01-01 (CE) and 1970-01-01, used to decode polars dates.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Frequency of the price data points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Interval {
    /// Daily bars (`1d`).
    #[default]
    Daily,
    /// Weekly bars (`1wk`).
    Weekly,
    /// Monthly bars (`1mo`).
    Monthly,
}

impl Interval {
    /// The Yahoo Finance interval parameter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "1d",
            Self::Weekly => "1wk",
            Self::Monthly => "1mo",
        }
    }

    /// Number of bars in one year: 252 trading days, 52 weeks or 12 months.
    #[must_use]
    pub const fn bars_per_year(&self) -> usize {
        match self {
            Self::Daily => 252,
            Self::Weekly => 52,
            Self::Monthly => 12,
        }
    }

    /// Number of bars in one quarter (a quarter of [`Self::bars_per_year`]).
    #[must_use]
    pub const fn bars_per_quarter(&self) -> usize {
        self.bars_per_year() / 4
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = RsRatingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "1d" | "d" | "daily" => Ok(Self::Daily),
            "1wk" | "w" | "weekly" => Ok(Self::Weekly),
            "1mo" | "m" | "monthly" => Ok(Self::Monthly),
            other => Err(RsRatingError::InvalidParameter(format!(
                "interval must be one of '1d', '1wk' or '1mo', got '{other}'"
            ))),
        }
    }
}

/// How much price history to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HistoryRange {
    /// One month.
    OneMonth,
    /// Three months.
    ThreeMonths,
    /// Six months.
    SixMonths,
    /// One year.
    OneYear,
    /// Two years.
    #[default]
    TwoYears,
    /// Five years.
    FiveYears,
    /// Ten years.
    TenYears,
    /// Year to date.
    YearToDate,
    /// All available history.
    Max,
}

impl HistoryRange {
    /// The Yahoo Finance `range` parameter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OneMonth => "1mo",
            Self::ThreeMonths => "3mo",
            Self::SixMonths => "6mo",
            Self::OneYear => "1y",
            Self::TwoYears => "2y",
            Self::FiveYears => "5y",
            Self::TenYears => "10y",
            Self::YearToDate => "ytd",
            Self::Max => "max",
        }
    }
}

impl fmt::Display for HistoryRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryRange {
    type Err = RsRatingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "1mo" => Ok(Self::OneMonth),
            "3mo" => Ok(Self::ThreeMonths),
            "6mo" => Ok(Self::SixMonths),
            "1y" => Ok(Self::OneYear),
            "2y" => Ok(Self::TwoYears),
            "5y" => Ok(Self::FiveYears),
            "10y" => Ok(Self::TenYears),
            "ytd" => Ok(Self::YearToDate),
            "max" => Ok(Self::Max),
            other => Err(RsRatingError::InvalidParameter(format!(
                "unsupported history range '{other}'"
            ))),
        }
    }
}

/// Reporting frequency of a financial metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    /// Quarterly reports.
    Quarterly,
    /// Annual reports.
    Annual,
}

/// Profile information of a ticker. Every field is optional because data
/// providers routinely omit them for ETFs, ADRs and delisted symbols.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickerInfo {
    /// Company long name.
    pub name: Option<String>,
    /// GICS-like sector.
    pub sector: Option<String>,
    /// Industry within the sector.
    pub industry: Option<String>,
    /// Market capitalization.
    pub market_cap: Option<f64>,
    /// Shares outstanding.
    pub shares_outstanding: Option<f64>,
}

/// Financial metrics that can be ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FinancialMetric {
    /// Diluted earnings per share.
    #[default]
    Eps,
    /// Total revenue.
    Revenue,
    /// Net income.
    NetIncome,
    /// Operating income.
    OperatingIncome,
    /// Gross profit.
    GrossProfit,
    /// Free cash flow.
    FreeCashFlow,
}

impl FinancialMetric {
    /// Short display label used in table headers.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Eps => "EPS",
            Self::Revenue => "Revenue",
            Self::NetIncome => "Net Income",
            Self::OperatingIncome => "Operating Income",
            Self::GrossProfit => "Gross Profit",
            Self::FreeCashFlow => "Free Cash Flow",
        }
    }

    /// Field name suffix used by the Yahoo fundamentals time-series API.
    #[must_use]
    pub const fn yahoo_field(&self) -> &'static str {
        match self {
            Self::Eps => "DilutedEPS",
            Self::Revenue => "TotalRevenue",
            Self::NetIncome => "NetIncome",
            Self::OperatingIncome => "OperatingIncome",
            Self::GrossProfit => "GrossProfit",
            Self::FreeCashFlow => "FreeCashFlow",
        }
    }

    /// Yahoo field name for the given frequency, e.g. `quarterlyDilutedEPS`.
    #[must_use]
    pub fn yahoo_key(&self, frequency: Frequency) -> String {
        let prefix = match frequency {
            Frequency::Quarterly => "quarterly",
            Frequency::Annual => "annual",
        };
        format!("{prefix}{}", self.yahoo_field())
    }
}

impl fmt::Display for FinancialMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FinancialMetric {
    type Err = RsRatingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace(['_', '-', ' '], "").as_str() {
            "eps" | "dilutedeps" => Ok(Self::Eps),
            "revenue" | "totalrevenue" | "sales" => Ok(Self::Revenue),
            "netincome" => Ok(Self::NetIncome),
            "operatingincome" => Ok(Self::OperatingIncome),
            "grossprofit" => Ok(Self::GrossProfit),
            "freecashflow" | "fcf" => Ok(Self::FreeCashFlow),
            _ => Err(RsRatingError::MetricNotFound(s.to_string())),
        }
    }
}

/// Quarterly and annual history of one metric for one ticker.
#[derive(Debug, Clone, PartialEq)]
pub struct Financials {
    /// The metric these series hold.
    pub metric: FinancialMetric,
    /// Quarterly values, ascending by report date.
    pub quarterly: MetricSeries,
    /// Annual values, ascending by report date.
    pub annual: MetricSeries,
}

impl Financials {
    /// Returns the series for the requested frequency.
    #[must_use]
    pub const fn series(&self, frequency: Frequency) -> &MetricSeries {
        match frequency {
            Frequency::Quarterly => &self.quarterly,
            Frequency::Annual => &self.annual,
        }
    }
}

/// Aligned close prices for a set of symbols.
///
/// `MarketData` wraps a wide Polars DataFrame with a `date` column followed
/// by one `Float64` column of closes per symbol. All symbols share the date
/// axis; a missing close is null.
///
/// # Example
///
/// ```no_run
/// use rs_rating_traits::MarketData;
/// use chrono::NaiveDate;
///
/// let dates = vec![
///     NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
/// ];
/// let data = MarketData::from_columns(
///     &dates,
///     vec![("AAPL".to_string(), vec![185.6, 184.3])],
/// )
/// .unwrap();
/// assert_eq!(data.symbols(), vec!["AAPL".to_string()]);
/// ```
#[derive(Debug, Clone)]
pub struct MarketData {
    data: DataFrame,
}

impl MarketData {
    /// Name of the date column.
    pub const DATE_COLUMN: &'static str = "date";

    /// Creates a new `MarketData` instance from a DataFrame.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame has no `date` column.
    pub fn new(data: DataFrame) -> Result<Self> {
        if data.column(Self::DATE_COLUMN).is_err() {
            return Err(RsRatingError::MissingColumn(Self::DATE_COLUMN.to_string()));
        }
        Ok(Self { data })
    }

    /// Builds market data from a date axis and per-symbol close columns.
    /// `NaN` closes are stored as null.
    ///
    /// # Errors
    ///
    /// Returns an error if a column length does not match the date axis.
    pub fn from_columns(dates: &[Date], columns: Vec<(Symbol, Vec<f64>)>) -> Result<Self> {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)
            .ok_or_else(|| RsRatingError::InvalidDate("unix epoch".to_string()))?;
        let days: Vec<i32> = dates
            .iter()
            .map(|d| (*d - epoch).num_days() as i32)
            .collect();

        let mut frame_columns = Vec::with_capacity(columns.len() + 1);
        frame_columns.push(Column::new(Self::DATE_COLUMN.into(), days).cast(&DataType::Date)?);

        for (symbol, values) in columns {
            if values.len() != dates.len() {
                return Err(RsRatingError::InvalidData(format!(
                    "{symbol} has {} closes for {} dates",
                    values.len(),
                    dates.len()
                )));
            }
            let values: Vec<Option<f64>> = values
                .into_iter()
                .map(|v| v.is_finite().then_some(v))
                .collect();
            frame_columns.push(Column::new(symbol.as_str().into(), values));
        }

        Ok(Self {
            data: DataFrame::new(frame_columns)?,
        })
    }

    /// Aligns independent price series on the union of their dates.
    ///
    /// # Errors
    ///
    /// Returns an error if the aligned frame cannot be built.
    pub fn align(series: Vec<(Symbol, PriceSeries)>) -> Result<Self> {
        let mut dates: Vec<Date> = series
            .iter()
            .flat_map(|(_, s)| s.dates().iter().copied())
            .collect();
        dates.sort_unstable();
        dates.dedup();

        let columns = series
            .into_iter()
            .map(|(symbol, s)| {
                let mut values = vec![f64::NAN; dates.len()];
                for (date, value) in s.iter() {
                    if let Ok(idx) = dates.binary_search(&date) {
                        values[idx] = value;
                    }
                }
                (symbol, values)
            })
            .collect();

        Self::from_columns(&dates, columns)
    }

    /// Returns a reference to the underlying DataFrame.
    pub const fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Consumes self and returns the underlying DataFrame.
    pub fn into_inner(self) -> DataFrame {
        self.data
    }

    /// Returns the number of dates.
    pub fn len(&self) -> usize {
        self.data.height()
    }

    /// Returns whether there are no dates.
    pub fn is_empty(&self) -> bool {
        self.data.height() == 0
    }

    /// Returns the symbols (every column except `date`).
    pub fn symbols(&self) -> Vec<Symbol> {
        self.data
            .get_column_names()
            .iter()
            .filter(|s| s.as_str() != Self::DATE_COLUMN)
            .map(|s| s.to_string())
            .collect()
    }

    /// Checks if a symbol has a column.
    pub fn has_symbol(&self, symbol: &str) -> bool {
        symbol != Self::DATE_COLUMN
            && self
                .data
                .get_column_names()
                .iter()
                .any(|s| s.as_str() == symbol)
    }

    /// Returns the date axis.
    ///
    /// # Errors
    ///
    /// Returns an error if the `date` column is not a polars `Date` column.
    pub fn dates(&self) -> Result<Vec<Date>> {
        let date_col = self.data.column(Self::DATE_COLUMN)?;
        date_col
            .as_materialized_series()
            .date()?
            .into_iter()
            .map(|d: Option<i32>| {
                d.and_then(|d| NaiveDate::from_num_days_from_ce_opt(d + UNIX_EPOCH_DAYS_FROM_CE))
                    .ok_or_else(|| RsRatingError::InvalidDate("null or out-of-range date".into()))
            })
            .collect()
    }

    /// Extracts the close series of one symbol. Nulls become `NaN`.
    ///
    /// # Errors
    ///
    /// Returns [`RsRatingError::SymbolNotFound`] if the symbol has no column.
    pub fn closes(&self, symbol: &str) -> Result<PriceSeries> {
        if !self.has_symbol(symbol) {
            return Err(RsRatingError::SymbolNotFound(symbol.to_string()));
        }
        let values: Vec<f64> = self
            .data
            .column(symbol)?
            .as_materialized_series()
            .f64()?
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();
        PriceSeries::new(self.dates()?, values)
    }
}

impl AsRef<DataFrame> for MarketData {
    fn as_ref(&self) -> &DataFrame {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_interval_bars() {
        assert_eq!(Interval::Daily.bars_per_quarter(), 63);
        assert_eq!(Interval::Weekly.bars_per_quarter(), 13);
        assert_eq!(Interval::Monthly.bars_per_quarter(), 3);
        assert_eq!(Interval::Weekly.bars_per_year(), 52);
    }

    #[test]
    fn test_interval_parse() {
        assert_eq!("1wk".parse::<Interval>().unwrap(), Interval::Weekly);
        assert_eq!("1MO".parse::<Interval>().unwrap(), Interval::Monthly);
        assert!(matches!(
            "5m".parse::<Interval>(),
            Err(RsRatingError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_history_range_roundtrip() {
        for range in [HistoryRange::OneYear, HistoryRange::TwoYears, HistoryRange::Max] {
            assert_eq!(range.as_str().parse::<HistoryRange>().unwrap(), range);
        }
    }

    #[test]
    fn test_metric_yahoo_key() {
        assert_eq!(
            FinancialMetric::Eps.yahoo_key(Frequency::Quarterly),
            "quarterlyDilutedEPS"
        );
        assert_eq!(
            FinancialMetric::Revenue.yahoo_key(Frequency::Annual),
            "annualTotalRevenue"
        );
        assert_eq!("free-cash-flow".parse::<FinancialMetric>().unwrap(), FinancialMetric::FreeCashFlow);
        assert!("ebitdax".parse::<FinancialMetric>().is_err());
    }

    #[test]
    fn test_market_data_from_columns() {
        let dates = vec![d(2024, 1, 2), d(2024, 1, 3), d(2024, 1, 4)];
        let data = MarketData::from_columns(
            &dates,
            vec![
                ("AAPL".to_string(), vec![1.0, f64::NAN, 3.0]),
                ("^GSPC".to_string(), vec![10.0, 11.0, 12.0]),
            ],
        )
        .unwrap();

        assert_eq!(data.len(), 3);
        assert_eq!(data.symbols(), vec!["AAPL".to_string(), "^GSPC".to_string()]);
        assert!(data.has_symbol("AAPL"));
        assert!(!data.has_symbol("date"));
        assert_eq!(data.dates().unwrap(), dates);

        let closes = data.closes("AAPL").unwrap();
        assert_eq!(closes.len(), 3);
        assert!(closes.values()[1].is_nan());
        assert_eq!(closes.values()[2], 3.0);
    }

    #[test]
    fn test_market_data_missing_symbol() {
        let data = MarketData::from_columns(&[d(2024, 1, 2)], vec![("A".into(), vec![1.0])]).unwrap();
        assert!(matches!(
            data.closes("MSFT"),
            Err(RsRatingError::SymbolNotFound(_))
        ));
    }

    #[test]
    fn test_market_data_length_mismatch() {
        let result = MarketData::from_columns(&[d(2024, 1, 2)], vec![("A".into(), vec![1.0, 2.0])]);
        assert!(matches!(result, Err(RsRatingError::InvalidData(_))));
    }

    #[test]
    fn test_market_data_align_union_of_dates() {
        let a = PriceSeries::new(vec![d(2024, 1, 2), d(2024, 1, 4)], vec![1.0, 2.0]).unwrap();
        let b = PriceSeries::new(vec![d(2024, 1, 3), d(2024, 1, 4)], vec![5.0, 6.0]).unwrap();
        let data = MarketData::align(vec![("A".into(), a), ("B".into(), b)]).unwrap();

        assert_eq!(data.len(), 3);
        let a = data.closes("A").unwrap();
        assert_eq!(a.values()[0], 1.0);
        assert!(a.values()[1].is_nan());
        let b = data.closes("B").unwrap();
        assert!(b.values()[0].is_nan());
        assert_eq!(b.values()[2], 6.0);
    }
}
