//! Percentile scoring of cross-sectional values.

use std::{fmt, str::FromStr};

use rs_rating_traits::{
    RsRatingError,
    stats::{average_ranks, quantile_sorted},
};
use serde::{Deserialize, Serialize};

/// Number of quantile bins used by [`PercentileMethod::Qcut`].
const QUANTILE_BINS: usize = 99;

/// How values are mapped onto the 1..=99 percentile scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PercentileMethod {
    /// Average rank scaled linearly onto 1..=99.
    Rank,
    /// 99 equal-frequency bins; duplicate bin edges are merged.
    #[default]
    Qcut,
}

impl PercentileMethod {
    /// Lowercase name, as used on the command line and in file names.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rank => "rank",
            Self::Qcut => "qcut",
        }
    }
}

impl fmt::Display for PercentileMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PercentileMethod {
    type Err = RsRatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rank" => Ok(Self::Rank),
            "qcut" => Ok(Self::Qcut),
            _ => Err(RsRatingError::InvalidParameter(
                "method must be either 'rank' or 'qcut'".to_string(),
            )),
        }
    }
}

/// Computes the percentile (1..=99) of every value. `NaN` values get `None`.
///
/// # Examples
///
/// ```
/// use rs_rating_signals::ranking::{PercentileMethod, calc_percentile};
///
/// let pct = calc_percentile(&[10.0, 20.0, f64::NAN], PercentileMethod::Rank);
/// assert_eq!(pct, vec![Some(50), Some(99), None]);
/// ```
pub fn calc_percentile(values: &[f64], method: PercentileMethod) -> Vec<Option<i64>> {
    match method {
        PercentileMethod::Rank => rank_percentile(values),
        PercentileMethod::Qcut => qcut_percentile(values),
    }
}

fn rank_percentile(values: &[f64]) -> Vec<Option<i64>> {
    let count = values.iter().filter(|v| !v.is_nan()).count() as f64;
    average_ranks(values)
        .into_iter()
        .map(|rank| {
            if rank.is_nan() {
                None
            } else {
                Some((rank / count * 98.0 + 1.0).round_ties_even() as i64)
            }
        })
        .collect()
}

fn qcut_percentile(values: &[f64]) -> Vec<Option<i64>> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    sorted.sort_by(f64::total_cmp);

    let mut edges: Vec<f64> = (0..=QUANTILE_BINS)
        .map(|i| quantile_sorted(&sorted, i as f64 / QUANTILE_BINS as f64))
        .collect();
    edges.dedup();
    let last_bin = edges.len().saturating_sub(2);

    values
        .iter()
        .map(|&v| {
            if v.is_nan() {
                return None;
            }
            // Bins are (e[j], e[j+1]] with the lowest edge included.
            let bin = edges.partition_point(|e| *e < v).max(1) - 1;
            Some(bin.min(last_bin) as i64 + 1)
        })
        .collect()
}
