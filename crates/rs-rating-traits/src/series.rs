//! Time-indexed numeric series.
//!
//! [`PriceSeries`] is the working representation of closing prices, ratings
//! and financial metrics. Missing observations are `NaN`, which keeps the
//! numeric transforms branch-free and mirrors how market data arrives.

use chrono::Months;

use crate::{Date, Result, RsRatingError};

/// An ascending sequence of dated `f64` observations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    dates: Vec<Date>,
    values: Vec<f64>,
}

/// Financial metric history shares the price series representation.
pub type MetricSeries = PriceSeries;

impl PriceSeries {
    /// Creates a series from parallel date and value vectors.
    ///
    /// # Errors
    ///
    /// Returns [`RsRatingError::InvalidData`] if the lengths differ or the
    /// dates are not strictly ascending.
    pub fn new(dates: Vec<Date>, values: Vec<f64>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(RsRatingError::InvalidData(format!(
                "{} dates but {} values",
                dates.len(),
                values.len()
            )));
        }
        if dates.windows(2).any(|w| w[0] >= w[1]) {
            return Err(RsRatingError::InvalidData(
                "dates must be strictly ascending".to_string(),
            ));
        }
        Ok(Self { dates, values })
    }

    /// Builds a series from unordered `(date, value)` pairs, sorting by date
    /// and keeping the last value for duplicated dates.
    pub fn from_pairs(mut pairs: Vec<(Date, f64)>) -> Self {
        pairs.sort_by_key(|(d, _)| *d);
        let mut dates: Vec<Date> = Vec::with_capacity(pairs.len());
        let mut values: Vec<f64> = Vec::with_capacity(pairs.len());
        for (date, value) in pairs {
            if dates.last() == Some(&date) {
                if let Some(last) = values.last_mut() {
                    *last = value;
                }
            } else {
                dates.push(date);
                values.push(value);
            }
        }
        Self { dates, values }
    }

    /// Returns a series on the same dates with new values.
    ///
    /// # Errors
    ///
    /// Returns an error if the number of values differs from the dates.
    pub fn with_values(&self, values: Vec<f64>) -> Result<Self> {
        Self::new(self.dates.clone(), values)
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series has no observations.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The date axis.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// The observations.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterates over `(date, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// The last date, if any.
    pub fn last_date(&self) -> Option<Date> {
        self.dates.last().copied()
    }

    /// Values with only the finite observations kept, in order.
    pub fn finite_values(&self) -> Vec<f64> {
        self.values.iter().copied().filter(|v| v.is_finite()).collect()
    }

    /// Checks that two series share the same date axis.
    ///
    /// # Errors
    ///
    /// Returns [`RsRatingError::InvalidData`] if the axes differ.
    pub fn ensure_aligned(&self, other: &Self) -> Result<()> {
        if self.dates != other.dates {
            return Err(RsRatingError::InvalidData(format!(
                "series are not aligned ({} vs {} dates)",
                self.len(),
                other.len()
            )));
        }
        Ok(())
    }

    /// Propagates the last observation forward over `NaN` gaps. Infinite
    /// values are kept as they are. Leading `NaN`s stay `NaN`.
    #[must_use]
    pub fn ffill(&self) -> Self {
        let mut last = f64::NAN;
        let values = self
            .values
            .iter()
            .map(|&v| {
                if !v.is_nan() {
                    last = v;
                }
                last
            })
            .collect();
        Self {
            dates: self.dates.clone(),
            values,
        }
    }

    /// Fractional change over `periods` observations:
    /// `v[i] / v[i - periods] - 1`. The first `periods` entries are `NaN`.
    pub fn pct_change(&self, periods: usize) -> Vec<f64> {
        (0..self.values.len())
            .map(|i| {
                if i < periods {
                    f64::NAN
                } else {
                    self.values[i] / self.values[i - periods] - 1.0
                }
            })
            .collect()
    }

    /// The last finite value at or before `date`, or `NaN`.
    pub fn asof(&self, date: Date) -> f64 {
        let end = self.dates.partition_point(|d| *d <= date);
        self.values[..end]
            .iter()
            .rev()
            .copied()
            .find(|v| v.is_finite())
            .unwrap_or(f64::NAN)
    }

    /// The value as of `months` calendar months before `date`. The month
    /// arithmetic clamps to the end of shorter months.
    pub fn asof_months_before(&self, date: Date, months: u32) -> f64 {
        date.checked_sub_months(Months::new(months))
            .map_or(f64::NAN, |d| self.asof(d))
    }

    /// The most recent `n` observations.
    #[must_use]
    pub fn tail(&self, n: usize) -> Self {
        let start = self.len().saturating_sub(n);
        Self {
            dates: self.dates[start..].to_vec(),
            values: self.values[start..].to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> Date {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn series(values: Vec<f64>) -> PriceSeries {
        let dates = (0..values.len())
            .map(|i| d(2024, 1, 1) + chrono::Duration::days(i as i64))
            .collect();
        PriceSeries::new(dates, values).unwrap()
    }

    #[test]
    fn test_new_rejects_mismatch_and_unsorted() {
        assert!(PriceSeries::new(vec![d(2024, 1, 1)], vec![]).is_err());
        assert!(PriceSeries::new(vec![d(2024, 1, 2), d(2024, 1, 1)], vec![1.0, 2.0]).is_err());
    }

    #[test]
    fn test_from_pairs_sorts_and_dedups() {
        let s = PriceSeries::from_pairs(vec![
            (d(2024, 3, 1), 3.0),
            (d(2024, 1, 1), 1.0),
            (d(2024, 3, 1), 4.0),
        ]);
        assert_eq!(s.dates(), &[d(2024, 1, 1), d(2024, 3, 1)]);
        assert_eq!(s.values(), &[1.0, 4.0]);
    }

    #[test]
    fn test_ffill() {
        let s = series(vec![f64::NAN, 1.0, f64::NAN, f64::NAN, 4.0]).ffill();
        assert!(s.values()[0].is_nan());
        assert_eq!(&s.values()[1..], &[1.0, 1.0, 1.0, 4.0]);

        let s = series(vec![1.0, f64::INFINITY, f64::NAN, 2.0]).ffill();
        assert_eq!(s.values(), &[1.0, f64::INFINITY, f64::INFINITY, 2.0]);
    }

    #[test]
    fn test_pct_change() {
        let s = series(vec![100.0, 110.0, 121.0]);
        let one = s.pct_change(1);
        assert!(one[0].is_nan());
        assert!((one[1] - 0.1).abs() < 1e-12);
        assert!((one[2] - 0.1).abs() < 1e-12);

        let zero = s.pct_change(0);
        assert!(zero.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_asof_skips_nan() {
        let s = series(vec![1.0, 2.0, f64::NAN, 4.0]);
        assert_eq!(s.asof(d(2024, 1, 3)), 2.0);
        assert_eq!(s.asof(d(2024, 1, 10)), 4.0);
        assert!(s.asof(d(2023, 12, 31)).is_nan());
    }

    #[test]
    fn test_asof_months_before_clamps() {
        let s = PriceSeries::new(
            vec![d(2024, 2, 28), d(2024, 2, 29), d(2024, 3, 31)],
            vec![1.0, 2.0, 3.0],
        )
        .unwrap();
        // 2024-03-31 minus one month is 2024-02-29
        assert_eq!(s.asof_months_before(d(2024, 3, 31), 1), 2.0);
    }

    #[test]
    fn test_tail() {
        let s = series(vec![1.0, 2.0, 3.0]);
        assert_eq!(s.tail(2).values(), &[2.0, 3.0]);
        assert_eq!(s.tail(10).len(), 3);
    }

    #[test]
    fn test_ensure_aligned() {
        let a = series(vec![1.0, 2.0]);
        let b = series(vec![3.0, 4.0]);
        let c = series(vec![3.0]);
        assert!(a.ensure_aligned(&b).is_ok());
        assert!(a.ensure_aligned(&c).is_err());
    }
}
