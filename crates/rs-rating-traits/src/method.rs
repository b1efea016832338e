//! Rating method trait for benchmark-relative strength measures.
//!
//! A [`RatingMethod`] turns a stock's close series and a benchmark's close
//! series into a rating series on the same dates. The IBD relative-strength
//! rating, its 3-month variant and the Mansfield and Dorsey measures all
//! implement it, which lets one ranking pipeline serve every method.

use crate::{Interval, PriceSeries, Result};

/// A relative-strength measure of a stock against a benchmark.
///
/// Implementations should be thread-safe (`Send + Sync`) so that rankings
/// can be computed across tickers in parallel.
///
/// # Example
///
/// ```no_run
/// use rs_rating_traits::{Interval, PriceSeries, RatingMethod, Result};
///
/// struct PriceRatio;
///
/// impl RatingMethod for PriceRatio {
///     fn name(&self) -> &str {
///         "price_ratio"
///     }
///
///     fn description(&self) -> &str {
///         "Close divided by benchmark close"
///     }
///
///     fn lookback(&self, _interval: Interval) -> usize {
///         1
///     }
///
///     fn compute(
///         &self,
///         closes: &PriceSeries,
///         closes_ref: &PriceSeries,
///         _interval: Interval,
///     ) -> Result<PriceSeries> {
///         closes.ensure_aligned(closes_ref)?;
///         let values = closes
///             .values()
///             .iter()
///             .zip(closes_ref.values())
///             .map(|(a, b)| a / b)
///             .collect();
///         closes.with_values(values)
///     }
/// }
/// ```
pub trait RatingMethod: Send + Sync {
    /// Returns the unique name of this method, used in logs and file names.
    fn name(&self) -> &str;

    /// Returns a one-line human-readable description.
    fn description(&self) -> &str;

    /// Returns the number of bars of history the method needs at the given
    /// interval before its output is fully warmed up.
    fn lookback(&self, interval: Interval) -> usize;

    /// Computes the rating series of `closes` against `closes_ref`.
    ///
    /// Both series must share the same date axis; the output is on that axis.
    ///
    /// # Errors
    ///
    /// Returns an error if the series are misaligned or empty, or if a
    /// parameter of the method is invalid.
    fn compute(
        &self,
        closes: &PriceSeries,
        closes_ref: &PriceSeries,
        interval: Interval,
    ) -> Result<PriceSeries>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    struct Ratio;

    impl RatingMethod for Ratio {
        fn name(&self) -> &str {
            "ratio"
        }

        fn description(&self) -> &str {
            "ratio of closes"
        }

        fn lookback(&self, interval: Interval) -> usize {
            interval.bars_per_quarter()
        }

        fn compute(
            &self,
            closes: &PriceSeries,
            closes_ref: &PriceSeries,
            _interval: Interval,
        ) -> Result<PriceSeries> {
            closes.ensure_aligned(closes_ref)?;
            let values = closes
                .values()
                .iter()
                .zip(closes_ref.values())
                .map(|(a, b)| a / b)
                .collect();
            closes.with_values(values)
        }
    }

    #[test]
    fn test_method_compute() {
        let dates = vec![
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        ];
        let a = PriceSeries::new(dates.clone(), vec![2.0, 4.0]).unwrap();
        let b = PriceSeries::new(dates, vec![1.0, 2.0]).unwrap();

        let method = Ratio;
        assert_eq!(method.name(), "ratio");
        assert_eq!(method.lookback(Interval::Weekly), 13);
        let out = method.compute(&a, &b, Interval::Daily).unwrap();
        assert_eq!(out.values(), &[2.0, 2.0]);
    }

    #[test]
    fn test_method_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn RatingMethod>();
    }
}
