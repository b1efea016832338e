//! Configuration of the price-based ranking drivers.

use rs_rating_signals::{FinancialStrengthConfig, PercentileMethod, RsPeriod};
use rs_rating_traits::{HistoryRange, Interval, Symbol};
use serde::{Deserialize, Serialize};

/// Default benchmark of relative-strength rankings.
pub const DEFAULT_REFERENCE: &str = "^GSPC";

/// Settings shared by the IBD and Mansfield ranking drivers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Benchmark ticker (default: `^GSPC`).
    pub reference: Symbol,

    /// History to fetch (default: `2y`).
    pub range: HistoryRange,

    /// Bar interval (default: `1d`).
    pub interval: Interval,

    /// Percentile scoring (default: `qcut`).
    pub method: PercentileMethod,

    /// IBD rating period (default: `12mo`).
    pub rs_period: RsPeriod,

    /// Industries with fewer members are dropped (default: 1).
    pub min_industry_size: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            reference: DEFAULT_REFERENCE.to_string(),
            range: HistoryRange::TwoYears,
            interval: Interval::Daily,
            method: PercentileMethod::Qcut,
            rs_period: RsPeriod::TwelveMonths,
            min_industry_size: 1,
        }
    }
}

impl RankingConfig {
    /// Defaults for Mansfield rankings: weekly bars over two years.
    #[must_use]
    pub fn weekly() -> Self {
        Self {
            interval: Interval::Weekly,
            ..Self::default()
        }
    }

    /// Sets the benchmark ticker.
    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<Symbol>) -> Self {
        self.reference = reference.into();
        self
    }

    /// Sets the history range and bar interval.
    #[must_use]
    pub const fn with_history(mut self, range: HistoryRange, interval: Interval) -> Self {
        self.range = range;
        self.interval = interval;
        self
    }

    /// Sets the percentile method.
    #[must_use]
    pub const fn with_method(mut self, method: PercentileMethod) -> Self {
        self.method = method;
        self
    }
}

/// Settings of the financial-metric ranking driver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialRankingConfig {
    /// Percentile scoring (default: `qcut`).
    pub method: PercentileMethod,

    /// Growth weighting of the strength score.
    pub strength: FinancialStrengthConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranking_config_defaults() {
        let config = RankingConfig::default();
        assert_eq!(config.reference, "^GSPC");
        assert_eq!(config.range, HistoryRange::TwoYears);
        assert_eq!(config.interval, Interval::Daily);
        assert_eq!(config.method, PercentileMethod::Qcut);
        assert_eq!(config.rs_period, RsPeriod::TwelveMonths);
        assert_eq!(config.min_industry_size, 1);

        let weekly = RankingConfig::weekly();
        assert_eq!(weekly.interval, Interval::Weekly);
        assert_eq!(weekly.range, HistoryRange::TwoYears);
    }

    #[test]
    fn test_ranking_config_partial_json() {
        let config: RankingConfig =
            serde_json::from_str(r#"{"reference": "^NDX", "min_industry_size": 3}"#).unwrap();
        assert_eq!(config.reference, "^NDX");
        assert_eq!(config.min_industry_size, 3);
        assert_eq!(config.method, PercentileMethod::Qcut);
    }

    #[test]
    fn test_builders() {
        let config = RankingConfig::default()
            .with_reference("^DJI")
            .with_history(HistoryRange::OneYear, Interval::Monthly)
            .with_method(PercentileMethod::Rank);
        assert_eq!(config.reference, "^DJI");
        assert_eq!(config.range, HistoryRange::OneYear);
        assert_eq!(config.interval, Interval::Monthly);
        assert_eq!(config.method, PercentileMethod::Rank);
    }
}
