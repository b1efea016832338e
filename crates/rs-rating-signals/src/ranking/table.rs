//! Typed stock and industry ranking tables.
//!
//! A ranking starts from one [`StockSnapshot`] per ticker: the latest
//! rating and its values one, three and six months earlier. Snapshots are
//! scored into percentiles, sorted and ranked into [`StockRanking`] rows,
//! which are then grouped into [`IndustryRanking`] rows.

use std::{cmp::Ordering, collections::BTreeMap};

use polars::prelude::*;
use rs_rating_traits::{
    PriceSeries, Result, RsRatingError, Symbol, TickerInfo,
    stats::{nan_mean, round_to},
};
use serde::{Deserialize, Serialize};

use super::percentile::{PercentileMethod, calc_percentile};

/// Display name of the rating column.
pub const RS_COLUMN: &str = "Relative Strength";

/// Orders `a` before `b` when it is larger; `NaN` sorts last.
pub fn desc_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.total_cmp(&a),
    }
}

fn finite_or_null(values: impl Iterator<Item = f64>) -> Vec<Option<f64>> {
    values.map(|v| v.is_finite().then_some(v)).collect()
}

/// The rating of one ticker at the latest date and at three look-backs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSnapshot {
    /// Ticker symbol.
    pub ticker: Symbol,
    /// Latest close, rounded to 2 decimals.
    pub price: f64,
    /// Sector, if known.
    pub sector: Option<String>,
    /// Industry, if known.
    pub industry: Option<String>,
    /// Latest rating.
    pub rs: f64,
    /// Rating one month before the latest date.
    pub rs_1m: f64,
    /// Rating three months before the latest date.
    pub rs_3m: f64,
    /// Rating six months before the latest date.
    pub rs_6m: f64,
}

impl StockSnapshot {
    /// Samples a rating series at its last date and 1, 3 and 6 calendar
    /// months before it.
    ///
    /// # Errors
    ///
    /// Returns [`RsRatingError::InsufficientData`] if the rating series is
    /// empty.
    pub fn from_series(
        ticker: &str,
        closes: &PriceSeries,
        rs: &PriceSeries,
        info: Option<&TickerInfo>,
    ) -> Result<Self> {
        let end = rs
            .last_date()
            .ok_or_else(|| RsRatingError::InsufficientData(format!("no ratings for {ticker}")))?;

        Ok(Self {
            ticker: ticker.to_string(),
            price: round_to(closes.asof(end), 2),
            sector: info.and_then(|i| i.sector.clone()),
            industry: info.and_then(|i| i.industry.clone()),
            rs: rs.asof(end),
            rs_1m: rs.asof_months_before(end, 1),
            rs_3m: rs.asof_months_before(end, 3),
            rs_6m: rs.asof_months_before(end, 6),
        })
    }
}

/// One row of the stock ranking table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRanking {
    /// 1-based position by rating.
    pub rank: u32,
    /// The sampled ratings.
    pub snapshot: StockSnapshot,
    /// Percentile of the latest rating.
    pub percentile: Option<i64>,
    /// Percentile of the rating one month ago.
    pub percentile_1m: Option<i64>,
    /// Percentile of the rating three months ago.
    pub percentile_3m: Option<i64>,
    /// Percentile of the rating six months ago.
    pub percentile_6m: Option<i64>,
}

/// One row of the industry ranking table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryRanking {
    /// 1-based position by mean rating.
    pub rank: u32,
    /// Industry name.
    pub industry: String,
    /// Sector of the first member with one.
    pub sector: Option<String>,
    /// Mean latest rating.
    pub rs: f64,
    /// Mean rating one month ago.
    pub rs_1m: f64,
    /// Mean rating three months ago.
    pub rs_3m: f64,
    /// Mean rating six months ago.
    pub rs_6m: f64,
    /// Members ordered by rating, joined with `,`.
    pub tickers: String,
    /// Percentile of the mean latest rating.
    pub percentile: Option<i64>,
    /// Percentile of the mean rating one month ago.
    pub percentile_1m: Option<i64>,
    /// Percentile of the mean rating three months ago.
    pub percentile_3m: Option<i64>,
    /// Percentile of the mean rating six months ago.
    pub percentile_6m: Option<i64>,
}

/// Scores, sorts and ranks the snapshots by latest rating.
pub fn rank_stocks(snapshots: Vec<StockSnapshot>, method: PercentileMethod) -> Vec<StockRanking> {
    let pct = |f: fn(&StockSnapshot) -> f64| {
        let values: Vec<f64> = snapshots.iter().map(f).collect();
        calc_percentile(&values, method)
    };
    let p0 = pct(|s| s.rs);
    let p1 = pct(|s| s.rs_1m);
    let p3 = pct(|s| s.rs_3m);
    let p6 = pct(|s| s.rs_6m);

    let mut rows: Vec<StockRanking> = snapshots
        .into_iter()
        .enumerate()
        .map(|(i, snapshot)| StockRanking {
            rank: 0,
            snapshot,
            percentile: p0[i],
            percentile_1m: p1[i],
            percentile_3m: p3[i],
            percentile_6m: p6[i],
        })
        .collect();

    rows.sort_by(|a, b| desc_nan_last(a.snapshot.rs, b.snapshot.rs));
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i as u32 + 1;
    }
    rows
}

/// Groups ranked stocks by industry.
///
/// Stocks without an industry are left out, and industries with fewer than
/// `min_size` members are dropped before scoring.
pub fn rank_industries(
    stocks: &[StockRanking],
    min_size: usize,
    method: PercentileMethod,
) -> Vec<IndustryRanking> {
    let mut groups: BTreeMap<&str, Vec<&StockSnapshot>> = BTreeMap::new();
    for row in stocks {
        if let Some(industry) = row.snapshot.industry.as_deref() {
            groups.entry(industry).or_default().push(&row.snapshot);
        }
    }

    let mut rows: Vec<IndustryRanking> = groups
        .into_iter()
        .filter(|(_, members)| members.len() >= min_size.max(1))
        .map(|(industry, mut members)| {
            let mean = |f: fn(&StockSnapshot) -> f64| {
                let values: Vec<f64> = members.iter().map(|s| f(s)).collect();
                round_to(nan_mean(&values), 2)
            };
            let (rs, rs_1m, rs_3m, rs_6m) =
                (mean(|s| s.rs), mean(|s| s.rs_1m), mean(|s| s.rs_3m), mean(|s| s.rs_6m));

            members.sort_by(|a, b| desc_nan_last(a.rs, b.rs));
            IndustryRanking {
                rank: 0,
                industry: industry.to_string(),
                sector: members.iter().find_map(|s| s.sector.clone()),
                rs,
                rs_1m,
                rs_3m,
                rs_6m,
                tickers: members
                    .iter()
                    .map(|s| s.ticker.as_str())
                    .collect::<Vec<_>>()
                    .join(","),
                percentile: None,
                percentile_1m: None,
                percentile_3m: None,
                percentile_6m: None,
            }
        })
        .collect();

    let pct = |f: fn(&IndustryRanking) -> f64, rows: &[IndustryRanking]| {
        let values: Vec<f64> = rows.iter().map(f).collect();
        calc_percentile(&values, method)
    };
    let p0 = pct(|r| r.rs, &rows);
    let p1 = pct(|r| r.rs_1m, &rows);
    let p3 = pct(|r| r.rs_3m, &rows);
    let p6 = pct(|r| r.rs_6m, &rows);
    for (i, row) in rows.iter_mut().enumerate() {
        row.percentile = p0[i];
        row.percentile_1m = p1[i];
        row.percentile_3m = p3[i];
        row.percentile_6m = p6[i];
    }

    rows.sort_by(|a, b| desc_nan_last(a.rs, b.rs));
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i as u32 + 1;
    }
    rows
}

/// Converts stock rows into a DataFrame with display column names.
///
/// # Errors
///
/// Returns an error if the DataFrame cannot be built.
pub fn stocks_frame(rows: &[StockRanking]) -> Result<DataFrame> {
    let snap = |f: fn(&StockSnapshot) -> f64| finite_or_null(rows.iter().map(|r| f(&r.snapshot)));
    let pct = |f: fn(&StockRanking) -> Option<i64>| rows.iter().map(f).collect::<Vec<_>>();

    let columns = vec![
        Column::new("Rank".into(), rows.iter().map(|r| r.rank).collect::<Vec<u32>>()),
        Column::new(
            "Ticker".into(),
            rows.iter().map(|r| r.snapshot.ticker.clone()).collect::<Vec<String>>(),
        ),
        Column::new("Price".into(), snap(|s| s.price)),
        Column::new(
            "Sector".into(),
            rows.iter().map(|r| r.snapshot.sector.clone()).collect::<Vec<Option<String>>>(),
        ),
        Column::new(
            "Industry".into(),
            rows.iter().map(|r| r.snapshot.industry.clone()).collect::<Vec<Option<String>>>(),
        ),
        Column::new(RS_COLUMN.into(), snap(|s| s.rs)),
        Column::new("1 Month Ago".into(), snap(|s| s.rs_1m)),
        Column::new("3 Months Ago".into(), snap(|s| s.rs_3m)),
        Column::new("6 Months Ago".into(), snap(|s| s.rs_6m)),
        Column::new("Percentile".into(), pct(|r| r.percentile)),
        Column::new("Percentile (1M)".into(), pct(|r| r.percentile_1m)),
        Column::new("Percentile (3M)".into(), pct(|r| r.percentile_3m)),
        Column::new("Percentile (6M)".into(), pct(|r| r.percentile_6m)),
    ];
    Ok(DataFrame::new(columns)?)
}

/// Converts industry rows into a DataFrame with display column names.
///
/// # Errors
///
/// Returns an error if the DataFrame cannot be built.
pub fn industries_frame(rows: &[IndustryRanking]) -> Result<DataFrame> {
    let num = |f: fn(&IndustryRanking) -> f64| finite_or_null(rows.iter().map(f));
    let pct = |f: fn(&IndustryRanking) -> Option<i64>| rows.iter().map(f).collect::<Vec<_>>();

    let columns = vec![
        Column::new("Rank".into(), rows.iter().map(|r| r.rank).collect::<Vec<u32>>()),
        Column::new(
            "Industry".into(),
            rows.iter().map(|r| r.industry.clone()).collect::<Vec<String>>(),
        ),
        Column::new(
            "Sector".into(),
            rows.iter().map(|r| r.sector.clone()).collect::<Vec<Option<String>>>(),
        ),
        Column::new(RS_COLUMN.into(), num(|r| r.rs)),
        Column::new("1 Month Ago".into(), num(|r| r.rs_1m)),
        Column::new("3 Months Ago".into(), num(|r| r.rs_3m)),
        Column::new("6 Months Ago".into(), num(|r| r.rs_6m)),
        Column::new(
            "Tickers".into(),
            rows.iter().map(|r| r.tickers.clone()).collect::<Vec<String>>(),
        ),
        Column::new("Percentile".into(), pct(|r| r.percentile)),
        Column::new("Percentile (1M)".into(), pct(|r| r.percentile_1m)),
        Column::new("Percentile (3M)".into(), pct(|r| r.percentile_3m)),
        Column::new("Percentile (6M)".into(), pct(|r| r.percentile_6m)),
    ];
    Ok(DataFrame::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn snap(ticker: &str, industry: Option<&str>, rs: f64) -> StockSnapshot {
        StockSnapshot {
            ticker: ticker.to_string(),
            price: 10.0,
            sector: industry.map(|_| "Tech".to_string()),
            industry: industry.map(str::to_string),
            rs,
            rs_1m: rs - 1.0,
            rs_3m: rs - 2.0,
            rs_6m: f64::NAN,
        }
    }

    #[test]
    fn test_desc_nan_last() {
        let mut v = vec![1.0, f64::NAN, 3.0, 2.0];
        v.sort_by(|a, b| desc_nan_last(*a, *b));
        assert_eq!(&v[..3], &[3.0, 2.0, 1.0]);
        assert!(v[3].is_nan());
    }

    #[test]
    fn test_snapshot_from_series() {
        let dates: Vec<NaiveDate> = (0..8)
            .map(|m| NaiveDate::from_ymd_opt(2024, 1 + m, 15).unwrap())
            .collect();
        let closes = PriceSeries::new(dates.clone(), (1..=8).map(|v| v as f64 + 0.123).collect()).unwrap();
        let rs = PriceSeries::new(dates, vec![90.0, 91.0, 92.0, 93.0, 94.0, 95.0, f64::NAN, 97.0]).unwrap();
        let info = TickerInfo {
            sector: Some("Tech".into()),
            industry: Some("Chips".into()),
            ..Default::default()
        };

        let s = StockSnapshot::from_series("NVDA", &closes, &rs, Some(&info)).unwrap();
        assert_eq!(s.price, 8.12);
        assert_eq!(s.rs, 97.0);
        // 2024-07-15 is NaN, so asof falls back to 2024-06-15
        assert_eq!(s.rs_1m, 95.0);
        assert_eq!(s.rs_3m, 94.0);
        assert_eq!(s.rs_6m, 91.0);
        assert_eq!(s.industry.as_deref(), Some("Chips"));
    }

    #[test]
    fn test_snapshot_empty_series() {
        let empty = PriceSeries::default();
        assert!(matches!(
            StockSnapshot::from_series("X", &empty, &empty, None),
            Err(RsRatingError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_rank_stocks_sorted_with_nan_last() {
        let rows = rank_stocks(
            vec![
                snap("A", Some("Chips"), 100.0),
                snap("B", Some("Chips"), f64::NAN),
                snap("C", Some("Oil"), 120.0),
            ],
            PercentileMethod::Rank,
        );
        let tickers: Vec<&str> = rows.iter().map(|r| r.snapshot.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["C", "A", "B"]);
        assert_eq!(rows.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(rows[0].percentile, Some(99));
        assert_eq!(rows[1].percentile, Some(50));
        assert_eq!(rows[2].percentile, None);
        assert_eq!(rows[0].percentile_6m, None);
    }

    #[test]
    fn test_rank_industries() {
        let stocks = rank_stocks(
            vec![
                snap("A", Some("Chips"), 100.0),
                snap("B", Some("Chips"), 110.0),
                snap("C", Some("Oil"), 120.0),
                snap("D", None, 200.0),
            ],
            PercentileMethod::Rank,
        );
        let industries = rank_industries(&stocks, 1, PercentileMethod::Rank);

        assert_eq!(industries.len(), 2);
        assert_eq!(industries[0].industry, "Oil");
        assert_eq!(industries[0].rank, 1);
        assert_eq!(industries[1].industry, "Chips");
        assert_eq!(industries[1].rs, 105.0);
        assert_eq!(industries[1].tickers, "B,A");
        assert_eq!(industries[1].sector.as_deref(), Some("Tech"));
        assert!(industries[1].rs_6m.is_nan());

        let filtered = rank_industries(&stocks, 2, PercentileMethod::Rank);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].industry, "Chips");
    }

    #[test]
    fn test_frames_have_display_columns() {
        let stocks = rank_stocks(vec![snap("A", Some("Chips"), 100.0)], PercentileMethod::Qcut);
        let df = stocks_frame(&stocks).unwrap();
        let names: Vec<&str> = df.get_column_names().iter().map(|s| s.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Rank",
                "Ticker",
                "Price",
                "Sector",
                "Industry",
                "Relative Strength",
                "1 Month Ago",
                "3 Months Ago",
                "6 Months Ago",
                "Percentile",
                "Percentile (1M)",
                "Percentile (3M)",
                "Percentile (6M)",
            ]
        );

        let industries = rank_industries(&stocks, 1, PercentileMethod::Qcut);
        let df = industries_frame(&industries).unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(df.get_column_names()[7].as_str(), "Tickers");
    }
}
