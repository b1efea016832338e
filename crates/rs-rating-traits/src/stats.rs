//! Statistical utility functions shared by the rating methods.
//!
//! These follow pandas semantics where the rating formulas were first
//! written against pandas: half-to-even rounding, `ewm(adjust=False)` NaN
//! handling, `rolling(window).mean()` with a full window, and average ranks
//! for ties.

use ndarray::Array1;

/// Rounds to `decimals` places with round-half-to-even, as pandas does.
/// Non-finite values are returned unchanged.
///
/// # Examples
///
/// ```
/// use rs_rating_traits::stats::round_to;
///
/// assert_eq!(round_to(2.5, 0), 2.0);
/// assert_eq!(round_to(0.125, 2), 0.12);
/// ```
pub fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

/// Replaces non-finite values with `NaN`.
pub fn finite_or_nan(value: f64) -> f64 {
    if value.is_finite() { value } else { f64::NAN }
}

/// Exponentially weighted mean with smoothing `alpha = 2 / (span + 1)`.
///
/// Matches pandas `ewm(span=span, adjust=adjust).mean()` with the default
/// `ignore_na=False`: a `NaN` observation repeats the previous output and
/// decays the weight of the running value, and output before the first
/// observation is `NaN`.
pub fn ewm_mean(values: &[f64], span: usize, adjust: bool) -> Vec<f64> {
    let alpha = 2.0 / (span as f64 + 1.0);
    let old_wt_factor = 1.0 - alpha;
    let new_wt = if adjust { 1.0 } else { alpha };

    let mut output = Vec::with_capacity(values.len());
    let mut weighted = f64::NAN;
    let mut old_wt = 1.0;

    for &cur in values {
        let is_observation = !cur.is_nan();
        if !weighted.is_nan() {
            old_wt *= old_wt_factor;
            if is_observation {
                if weighted != cur {
                    weighted = (old_wt * weighted + new_wt * cur) / (old_wt + new_wt);
                }
                if adjust {
                    old_wt += new_wt;
                } else {
                    old_wt = 1.0;
                }
            }
        } else if is_observation {
            weighted = cur;
        }
        output.push(weighted);
    }

    output
}

/// Simple moving average over a full window.
///
/// Matches pandas `rolling(window).mean()`: a window containing any `NaN`,
/// and the first `window - 1` positions, yield `NaN`.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 {
        return vec![f64::NAN; values.len()];
    }
    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return f64::NAN;
            }
            let slice = &values[i + 1 - window..=i];
            if slice.iter().any(|v| v.is_nan()) {
                f64::NAN
            } else {
                slice.iter().sum::<f64>() / window as f64
            }
        })
        .collect()
}

/// Mean of the finite values, or `NaN` if there are none.
pub fn nan_mean(values: &[f64]) -> f64 {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        f64::NAN
    } else {
        finite.iter().sum::<f64>() / finite.len() as f64
    }
}

/// 1-based ranks with ties sharing their average rank. `NaN` inputs get a
/// `NaN` rank and are excluded from the ranking.
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut indexed: Vec<(usize, f64)> = values
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .collect();

    indexed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut ranks = vec![f64::NAN; values.len()];
    let n = indexed.len();
    let mut i = 0;

    while i < n {
        let mut j = i;
        // Find ties
        while j < n && indexed[j].1 == indexed[i].1 {
            j += 1;
        }

        // Average of the 1-based ranks i+1..=j
        let avg_rank = (i + 1 + j) as f64 / 2.0;
        for item in &indexed[i..j] {
            ranks[item.0] = avg_rank;
        }

        i = j;
    }

    ranks
}

/// Quantile of ascending `sorted` values with linear interpolation
/// (numpy's default method). Returns `NaN` for empty input.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Weighted mean over the pairs where the value is finite and the weight is
/// finite and positive. Returns `None` when no pair qualifies.
///
/// # Examples
///
/// ```
/// use rs_rating_traits::stats::weighted_mean;
/// use ndarray::array;
///
/// let mean = weighted_mean(&array![1.0, 3.0, f64::NAN], &array![1.0, 3.0, 5.0]);
/// assert_eq!(mean, Some(2.5));
/// ```
pub fn weighted_mean(values: &Array1<f64>, weights: &Array1<f64>) -> Option<f64> {
    let effective: Array1<f64> = values
        .iter()
        .zip(weights.iter())
        .map(|(v, w)| {
            if v.is_finite() && w.is_finite() && *w > 0.0 {
                *w
            } else {
                0.0
            }
        })
        .collect();

    let total = effective.sum();
    if total <= 0.0 {
        return None;
    }

    let clean = values.mapv(|v| if v.is_finite() { v } else { 0.0 });
    Some(clean.dot(&effective) / total)
}
