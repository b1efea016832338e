//! Mansfield relative strength: the rating functions and the ranking driver.

pub use rs_rating_signals::rsm::*;

use rs_rating_traits::{DataProvider, Result, RsRatingError, Symbol};

use crate::{
    config::RankingConfig,
    pipeline::{RankingTables, rank_prices},
};

/// Ranks `tickers` and their industries by Mansfield relative strength.
///
/// Produces the same tables as [`crate::ibd_rs::rankings`], with the
/// Mansfield value in place of the IBD rating. [`RankingConfig::weekly`]
/// gives the usual weekly setup.
///
/// # Errors
///
/// Returns [`RsRatingError::InvalidParameter`] for a zero moving-average
/// window, otherwise the same errors as [`crate::ibd_rs::rankings`].
pub async fn ranking<P: DataProvider>(
    provider: &P,
    tickers: &[Symbol],
    config: &RankingConfig,
    mansfield: MansfieldConfig,
) -> Result<RankingTables> {
    if mansfield.window == Some(0) {
        return Err(RsRatingError::InvalidParameter(
            "moving-average window must be positive".to_string(),
        ));
    }
    let method = MansfieldRelativeStrength::new(mansfield);
    rank_prices(provider, tickers, config, &method).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{StaticProvider, compounding, symbols};
    use rs_rating_signals::PercentileMethod;
    use rs_rating_signals::ranking::frame::{column_strings, column_values};
    use rs_rating_traits::{HistoryRange, Interval};

    fn provider() -> StaticProvider {
        StaticProvider::default()
            .with_closes("^GSPC", compounding(4000.0, 0.01, 24))
            .with_closes("AAA", compounding(100.0, 0.03, 24))
            .with_closes("BBB", compounding(50.0, 0.02, 24))
            .with_closes("CCC", compounding(80.0, -0.01, 24))
            .with_info("AAA", "Technology", "Semiconductors", None)
            .with_info("BBB", "Technology", "Software", None)
    }

    fn config() -> RankingConfig {
        RankingConfig::weekly()
            .with_history(HistoryRange::TwoYears, Interval::Monthly)
            .with_method(PercentileMethod::Rank)
    }

    #[tokio::test]
    async fn test_ranking_sma() {
        let mansfield = MansfieldConfig {
            ma: MovingAverage::Sma,
            window: Some(6),
        };
        let tickers = symbols(&["AAA", "BBB", "CCC"]);
        let tables = ranking(&provider(), &tickers, &config(), mansfield).await.unwrap();

        assert_eq!(
            column_strings(&tables.stocks, "Ticker").unwrap(),
            vec![Some("AAA".into()), Some("BBB".into()), Some("CCC".into())]
        );
        let rs = column_values(&tables.stocks, "Relative Strength").unwrap();
        assert!(rs[0] > 0.0 && rs[2] < 0.0);
        assert_eq!(column_values(&tables.stocks, "Percentile").unwrap(), vec![99.0, 66.0, 34.0]);

        // CCC has no industry
        assert_eq!(tables.industries.height(), 2);
    }

    #[tokio::test]
    async fn test_ranking_ema_default_window() {
        let tickers = symbols(&["AAA", "CCC"]);
        let mansfield = MansfieldConfig {
            ma: MovingAverage::Ema,
            window: None,
        };
        let tables = ranking(&provider(), &tickers, &config(), mansfield).await.unwrap();
        assert_eq!(tables.stocks.height(), 2);
    }

    #[tokio::test]
    async fn test_ranking_zero_window() {
        let mansfield = MansfieldConfig {
            ma: MovingAverage::Sma,
            window: Some(0),
        };
        let err = ranking(&provider(), &symbols(&["AAA"]), &config(), mansfield)
            .await
            .unwrap_err();
        assert!(matches!(err, RsRatingError::InvalidParameter(_)));
    }
}
