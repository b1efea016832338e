//! IBD-style relative-strength ratings.
//!
//! The 12-month rating compares quarter-weighted returns of a stock and a
//! benchmark over the last year, with the most recent quarter counted
//! twice:
//!
//! ```text
//! weighted return = (2·P1 + P2 + P3 + P4) / 5
//! RS              = (1 + return_stock) / (1 + return_ref) · 100
//! ```
//!
//! where `Pn` is the return over the last `n` quarters. The 3-month rating
//! instead compares exponentially smoothed one-bar returns over a quarter.
//! A value of 100 means the stock kept pace with the benchmark.

use std::{fmt, str::FromStr};

use rs_rating_traits::{
    Interval, PriceSeries, RatingMethod, Result, RsRatingError,
    stats::{ewm_mean, finite_or_nan, round_to},
};
use serde::{Deserialize, Serialize};

/// Which IBD rating a ranking uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RsPeriod {
    /// Quarter-weighted 12-month rating (`12mo`).
    #[default]
    TwelveMonths,
    /// Smoothed 3-month rating (`3mo`).
    ThreeMonths,
}

impl RsPeriod {
    /// The period label, `12mo` or `3mo`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TwelveMonths => "12mo",
            Self::ThreeMonths => "3mo",
        }
    }
}

impl fmt::Display for RsPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RsPeriod {
    type Err = RsRatingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "12mo" | "12m" => Ok(Self::TwelveMonths),
            "3mo" | "3m" => Ok(Self::ThreeMonths),
            other => Err(RsRatingError::InvalidParameter(format!(
                "rs period must be '12mo' or '3mo', got '{other}'"
            ))),
        }
    }
}

/// Return over the last `n` quarters at every bar.
///
/// The closes are forward-filled first. The look-back is capped at the
/// series length, bars without a full look-back are 0, and non-finite
/// returns are 0.
///
/// # Errors
///
/// Returns [`RsRatingError::InsufficientData`] for an empty series.
pub fn quarters_return(closes: &PriceSeries, n: usize, interval: Interval) -> Result<Vec<f64>> {
    if closes.is_empty() {
        return Err(RsRatingError::InsufficientData(
            "cannot compute returns of an empty series".to_string(),
        ));
    }
    let periods = (closes.len() - 1).min(interval.bars_per_quarter() * n);
    Ok(closes
        .ffill()
        .pct_change(periods)
        .into_iter()
        .map(|r| if r.is_finite() { r } else { 0.0 })
        .collect())
}

/// Quarter-weighted return over the last year: `(2·P1 + P2 + P3 + P4) / 5`.
///
/// # Errors
///
/// Returns [`RsRatingError::InsufficientData`] for an empty series.
pub fn weighted_return(closes: &PriceSeries, interval: Interval) -> Result<Vec<f64>> {
    let p1 = quarters_return(closes, 1, interval)?;
    let p2 = quarters_return(closes, 2, interval)?;
    let p3 = quarters_return(closes, 3, interval)?;
    let p4 = quarters_return(closes, 4, interval)?;

    Ok((0..closes.len())
        .map(|i| (2.0 * p1[i] + p2[i] + p3[i] + p4[i]) / 5.0)
        .collect())
}

/// 12-month IBD relative strength of `closes` against `closes_ref`,
/// rounded to 2 decimals.
///
/// # Errors
///
/// Returns an error if the series are empty or not on the same dates.
pub fn relative_strength(
    closes: &PriceSeries,
    closes_ref: &PriceSeries,
    interval: Interval,
) -> Result<PriceSeries> {
    closes.ensure_aligned(closes_ref)?;
    let ret = weighted_return(closes, interval)?;
    let ret_ref = weighted_return(closes_ref, interval)?;

    let rs = ret
        .iter()
        .zip(&ret_ref)
        .map(|(r, r_ref)| finite_or_nan(round_to((1.0 + r) / (1.0 + r_ref) * 100.0, 2)))
        .collect();
    closes.with_values(rs)
}

/// 3-month relative strength: the ratio of the quarter-span EMAs of one-bar
/// returns, `ema_stock / |ema_ref| · 100`, rounded to 2 decimals.
///
/// The first bar has no return and is `NaN`.
///
/// # Errors
///
/// Returns an error if the series are empty or not on the same dates.
pub fn relative_strength_3m(
    closes: &PriceSeries,
    closes_ref: &PriceSeries,
    interval: Interval,
) -> Result<PriceSeries> {
    closes.ensure_aligned(closes_ref)?;
    if closes.is_empty() {
        return Err(RsRatingError::InsufficientData(
            "cannot compute returns of an empty series".to_string(),
        ));
    }
    let span = interval.bars_per_quarter();

    let ema = ewm_mean(&closes.ffill().pct_change(1), span, false);
    let ema_ref = ewm_mean(&closes_ref.ffill().pct_change(1), span, false);

    let rs = ema
        .iter()
        .zip(&ema_ref)
        .map(|(e, e_ref)| finite_or_nan(round_to(e / e_ref.abs() * 100.0, 2)))
        .collect();
    closes.with_values(rs)
}

/// The 12-month IBD rating as a [`RatingMethod`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IbdRelativeStrength;

impl RatingMethod for IbdRelativeStrength {
    fn name(&self) -> &str {
        "ibd_rs"
    }

    fn description(&self) -> &str {
        "IBD relative strength: quarter-weighted 12-month return vs benchmark"
    }

    fn lookback(&self, interval: Interval) -> usize {
        interval.bars_per_quarter() * 4
    }

    fn compute(
        &self,
        closes: &PriceSeries,
        closes_ref: &PriceSeries,
        interval: Interval,
    ) -> Result<PriceSeries> {
        relative_strength(closes, closes_ref, interval)
    }
}

/// The 3-month IBD rating as a [`RatingMethod`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IbdRelativeStrength3m;

impl RatingMethod for IbdRelativeStrength3m {
    fn name(&self) -> &str {
        "ibd_rs_3m"
    }

    fn description(&self) -> &str {
        "IBD 3-month relative strength: smoothed returns vs benchmark"
    }

    fn lookback(&self, interval: Interval) -> usize {
        interval.bars_per_quarter()
    }

    fn compute(
        &self,
        closes: &PriceSeries,
        closes_ref: &PriceSeries,
        interval: Interval,
    ) -> Result<PriceSeries> {
        relative_strength_3m(closes, closes_ref, interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, NaiveDate};

    fn series(values: Vec<f64>) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let dates = (0..values.len()).map(|i| start + Duration::days(i as i64)).collect();
        PriceSeries::new(dates, values).unwrap()
    }

    #[test]
    fn test_rs_period_parse() {
        assert_eq!("12mo".parse::<RsPeriod>().unwrap(), RsPeriod::TwelveMonths);
        assert_eq!("3mo".parse::<RsPeriod>().unwrap(), RsPeriod::ThreeMonths);
        assert!("6mo".parse::<RsPeriod>().is_err());
    }

    #[test]
    fn test_quarters_return_monthly() {
        let closes = series(vec![1.0, 2.0, 4.0, 8.0, 16.0]);

        // one quarter = 3 monthly bars
        let one = quarters_return(&closes, 1, Interval::Monthly).unwrap();
        assert_eq!(one, vec![0.0, 0.0, 0.0, 7.0, 7.0]);

        // two quarters exceed the series, so the look-back caps at 4 bars
        let two = quarters_return(&closes, 2, Interval::Monthly).unwrap();
        assert_eq!(two, vec![0.0, 0.0, 0.0, 0.0, 15.0]);
    }

    #[test]
    fn test_quarters_return_fills_gaps() {
        let closes = series(vec![1.0, f64::NAN, 2.0, f64::NAN]);
        let ret = quarters_return(&closes, 1, Interval::Monthly).unwrap();
        // c[3] is filled with 2.0
        assert_eq!(ret, vec![0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_quarters_return_empty() {
        assert!(matches!(
            quarters_return(&PriceSeries::default(), 1, Interval::Daily),
            Err(RsRatingError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_weighted_return_short_series() {
        // every quarter caps at the same 4-bar look-back, so the weights sum to 1
        let closes = series(vec![100.0, 102.0, 105.0, 103.0, 110.0]);
        let ret = weighted_return(&closes, Interval::Daily).unwrap();
        assert_relative_eq!(ret[4], 0.1, epsilon = 1e-12);
        assert_eq!(ret[0], 0.0);
    }

    #[test]
    fn test_relative_strength() {
        let closes = series(vec![100.0, 102.0, 105.0, 103.0, 110.0]);
        let closes_ref = series(vec![1000.0, 1010.0, 1015.0, 1005.0, 1050.0]);

        let rs = relative_strength(&closes, &closes_ref, Interval::Daily).unwrap();
        assert_eq!(rs.len(), 5);
        assert_eq!(rs.values()[0], 100.0);
        // 1.10 / 1.05 * 100
        assert_eq!(rs.values()[4], 104.76);
    }

    #[test]
    fn test_relative_strength_misaligned() {
        let closes = series(vec![1.0, 2.0]);
        let closes_ref = series(vec![1.0, 2.0, 3.0]);
        assert!(matches!(
            relative_strength(&closes, &closes_ref, Interval::Daily),
            Err(RsRatingError::InvalidData(_))
        ));
    }

    #[test]
    fn test_relative_strength_3m_constant_growth() {
        let closes = series((0..30).map(|i| 100.0 * 1.01f64.powi(i)).collect());
        let closes_ref = series((0..30).map(|i| 100.0 * 1.005f64.powi(i)).collect());

        let rs = relative_strength_3m(&closes, &closes_ref, Interval::Weekly).unwrap();
        assert!(rs.values()[0].is_nan());
        assert_relative_eq!(rs.values()[29], 200.0, epsilon = 0.01);
    }

    #[test]
    fn test_relative_strength_3m_falling_benchmark() {
        let closes = series((0..10).map(|i| 100.0 * 1.01f64.powi(i)).collect());
        let closes_ref = series((0..10).map(|i| 100.0 * 0.99f64.powi(i)).collect());

        let rs = relative_strength_3m(&closes, &closes_ref, Interval::Monthly).unwrap();
        // stock +1% per bar against |-1%| per bar
        assert_relative_eq!(rs.values()[9], 100.0, epsilon = 0.01);
    }

    #[test]
    fn test_rating_methods() {
        let method = IbdRelativeStrength;
        assert_eq!(method.name(), "ibd_rs");
        assert_eq!(method.lookback(Interval::Daily), 252);

        let method = IbdRelativeStrength3m;
        assert_eq!(method.lookback(Interval::Weekly), 13);

        let closes = series(vec![100.0, 110.0]);
        let out = method.compute(&closes, &closes, Interval::Weekly).unwrap();
        assert_eq!(out.values()[1], 100.0);
    }
}
