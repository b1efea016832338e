//! Mansfield and Dorsey relative strength.
//!
//! The Dorsey measure is the plain price ratio of a stock to its benchmark:
//!
//! ```text
//! RSD = close / close_index · 100
//! ```
//!
//! Mansfield normalises it against its own moving average, so that zero
//! marks the long-run relationship and positive values mark outperformance:
//!
//! ```text
//! RSM = (RSD / MA(RSD, window) - 1) · 100
//! ```

use std::{fmt, str::FromStr};

use rs_rating_traits::{
    Interval, PriceSeries, RatingMethod, Result, RsRatingError,
    stats::{ewm_mean, finite_or_nan, rolling_mean, round_to},
};
use serde::{Deserialize, Serialize};

/// Moving-average kind used by the Mansfield measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovingAverage {
    /// Simple moving average over a full window.
    #[default]
    Sma,
    /// Exponential moving average with `span = window`.
    Ema,
}

impl MovingAverage {
    /// Lowercase name, `sma` or `ema`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sma => "sma",
            Self::Ema => "ema",
        }
    }

    /// Applies the moving average to `values`.
    #[must_use]
    pub fn apply(&self, values: &[f64], window: usize) -> Vec<f64> {
        match self {
            Self::Sma => rolling_mean(values, window),
            Self::Ema => ewm_mean(values, window, false),
        }
    }
}

impl fmt::Display for MovingAverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovingAverage {
    type Err = RsRatingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sma" => Ok(Self::Sma),
            "ema" => Ok(Self::Ema),
            other => Err(RsRatingError::InvalidParameter(format!(
                "moving average must be 'sma' or 'ema', got '{other}'"
            ))),
        }
    }
}

/// Configuration for the Mansfield measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MansfieldConfig {
    /// Moving-average kind (default: SMA).
    pub ma: MovingAverage,

    /// Moving-average window in bars. `None` uses one year of bars for the
    /// interval: 252 daily, 52 weekly or 12 monthly.
    pub window: Option<usize>,
}

impl MansfieldConfig {
    /// The effective window for `interval`.
    #[must_use]
    pub fn window_for(&self, interval: Interval) -> usize {
        self.window.unwrap_or_else(|| interval.bars_per_year())
    }
}

/// Dorsey relative strength: the ratio of forward-filled closes, times 100.
///
/// # Errors
///
/// Returns an error if the series are not on the same dates.
pub fn dorsey_relative_strength(
    closes: &PriceSeries,
    closes_index: &PriceSeries,
) -> Result<PriceSeries> {
    closes.ensure_aligned(closes_index)?;
    let rsd = closes
        .ffill()
        .values()
        .iter()
        .zip(closes_index.ffill().values())
        .map(|(c, ci)| finite_or_nan(c / ci * 100.0))
        .collect();
    closes.with_values(rsd)
}

/// Mansfield relative strength, rounded to 2 decimals.
///
/// # Errors
///
/// Returns [`RsRatingError::InvalidParameter`] for a zero window, or an
/// error if the series are not on the same dates.
pub fn mansfield_relative_strength(
    closes: &PriceSeries,
    closes_index: &PriceSeries,
    window: usize,
    ma: MovingAverage,
) -> Result<PriceSeries> {
    if window == 0 {
        return Err(RsRatingError::InvalidParameter(
            "moving-average window must be positive".to_string(),
        ));
    }
    let rsd = dorsey_relative_strength(closes, closes_index)?;
    let baseline = ma.apply(rsd.values(), window);

    let rsm = rsd
        .values()
        .iter()
        .zip(&baseline)
        .map(|(r, m)| finite_or_nan(round_to((r / m - 1.0) * 100.0, 2)))
        .collect();
    closes.with_values(rsm)
}

/// The Mansfield measure as a [`RatingMethod`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MansfieldRelativeStrength {
    config: MansfieldConfig,
}

impl MansfieldRelativeStrength {
    /// Create a new Mansfield method with the given configuration.
    #[must_use]
    pub const fn new(config: MansfieldConfig) -> Self {
        Self { config }
    }

    /// The configuration.
    #[must_use]
    pub const fn config(&self) -> &MansfieldConfig {
        &self.config
    }
}

impl RatingMethod for MansfieldRelativeStrength {
    fn name(&self) -> &str {
        "mansfield"
    }

    fn description(&self) -> &str {
        "Mansfield relative strength: price ratio vs its moving average"
    }

    fn lookback(&self, interval: Interval) -> usize {
        self.config.window_for(interval)
    }

    fn compute(
        &self,
        closes: &PriceSeries,
        closes_ref: &PriceSeries,
        interval: Interval,
    ) -> Result<PriceSeries> {
        mansfield_relative_strength(
            closes,
            closes_ref,
            self.config.window_for(interval),
            self.config.ma,
        )
    }
}

/// The Dorsey measure as a [`RatingMethod`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DorseyRelativeStrength;

impl RatingMethod for DorseyRelativeStrength {
    fn name(&self) -> &str {
        "dorsey"
    }

    fn description(&self) -> &str {
        "Dorsey relative strength: price ratio vs benchmark"
    }

    fn lookback(&self, _interval: Interval) -> usize {
        1
    }

    fn compute(
        &self,
        closes: &PriceSeries,
        closes_ref: &PriceSeries,
        _interval: Interval,
    ) -> Result<PriceSeries> {
        dorsey_relative_strength(closes, closes_ref)
    }
}
