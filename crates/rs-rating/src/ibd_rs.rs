//! IBD relative strength: the rating functions and the ranking driver.

pub use rs_rating_signals::ibd_rs::*;

use rs_rating_traits::{DataProvider, Result, Symbol};

use crate::{
    config::RankingConfig,
    pipeline::{RankingTables, rank_prices},
};

/// Ranks `tickers` and their industries by IBD relative strength against
/// `config.reference`.
///
/// `config.rs_period` selects the 12-month or the 3-month rating. Tickers
/// missing from the fetched data are skipped with a warning.
///
/// # Errors
///
/// Returns [`InsufficientData`](rs_rating_traits::RsRatingError::InsufficientData)
/// if `tickers` is empty or no ticker could be rated, and propagates
/// provider errors, including a missing reference.
///
/// # Example
///
/// ```no_run
/// use rs_rating::{RankingConfig, YahooClient, ibd_rs};
///
/// # async fn run() -> rs_rating::Result<()> {
/// let client = YahooClient::from_env()?;
/// let tickers = vec!["AAPL".to_string(), "MSFT".to_string(), "NVDA".to_string()];
/// let tables = ibd_rs::rankings(&client, &tickers, &RankingConfig::default()).await?;
/// println!("{}", tables.stocks);
/// # Ok(())
/// # }
/// ```
pub async fn rankings<P: DataProvider>(
    provider: &P,
    tickers: &[Symbol],
    config: &RankingConfig,
) -> Result<RankingTables> {
    match config.rs_period {
        RsPeriod::TwelveMonths => rank_prices(provider, tickers, config, &IbdRelativeStrength).await,
        RsPeriod::ThreeMonths => {
            rank_prices(provider, tickers, config, &IbdRelativeStrength3m).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{StaticProvider, compounding, symbols};
    use rs_rating_signals::ranking::frame::{column_strings, column_values};
    use rs_rating_traits::{HistoryRange, Interval, RsRatingError};

    fn provider() -> StaticProvider {
        StaticProvider::default()
            .with_closes("^GSPC", compounding(4000.0, 0.01, 24))
            .with_closes("AAA", compounding(100.0, 0.03, 24))
            .with_closes("BBB", compounding(50.0, 0.02, 24))
            .with_closes("CCC", compounding(80.0, -0.01, 24))
            .with_info("AAA", "Technology", "Semiconductors", Some(3.0e12))
            .with_info("BBB", "Technology", "Semiconductors", Some(1.0e12))
            .with_info("CCC", "Financial Services", "Banks", Some(2.0e11))
    }

    fn monthly() -> RankingConfig {
        RankingConfig::default().with_history(HistoryRange::TwoYears, Interval::Monthly)
    }

    #[tokio::test]
    async fn test_rankings_orders_by_strength() {
        let tickers = symbols(&["CCC", "AAA", "ZZZ", "BBB"]);
        let tables = rankings(&provider(), &tickers, &monthly()).await.unwrap();

        let stocks = &tables.stocks;
        assert_eq!(stocks.height(), 3);
        assert_eq!(
            column_strings(stocks, "Ticker").unwrap(),
            vec![Some("AAA".into()), Some("BBB".into()), Some("CCC".into())]
        );
        assert_eq!(column_values(stocks, "Rank").unwrap(), vec![1.0, 2.0, 3.0]);
        assert_eq!(column_values(stocks, "Percentile").unwrap(), vec![99.0, 50.0, 1.0]);

        let rs = column_values(stocks, "Relative Strength").unwrap();
        assert!(rs[0] > rs[1] && rs[1] > 100.0 && rs[2] < 100.0);
        assert!(column_values(stocks, "6 Months Ago").unwrap().iter().all(|v| v.is_finite()));

        let industries = &tables.industries;
        assert_eq!(industries.height(), 2);
        assert_eq!(
            column_strings(industries, "Industry").unwrap(),
            vec![Some("Semiconductors".into()), Some("Banks".into())]
        );
        assert_eq!(
            column_strings(industries, "Tickers").unwrap()[0].as_deref(),
            Some("AAA,BBB")
        );
        assert!(!tables.is_empty());
    }

    #[tokio::test]
    async fn test_rankings_three_month_period() {
        let config = RankingConfig {
            rs_period: RsPeriod::ThreeMonths,
            ..monthly()
        };
        let tickers = symbols(&["AAA", "BBB", "CCC"]);
        let tables = rankings(&provider(), &tickers, &config).await.unwrap();

        assert_eq!(
            column_strings(&tables.stocks, "Ticker").unwrap()[0].as_deref(),
            Some("AAA")
        );
    }

    #[tokio::test]
    async fn test_rankings_min_industry_size() {
        let config = RankingConfig {
            min_industry_size: 2,
            ..monthly()
        };
        let tickers = symbols(&["AAA", "BBB", "CCC"]);
        let tables = rankings(&provider(), &tickers, &config).await.unwrap();

        assert_eq!(tables.stocks.height(), 3);
        assert_eq!(tables.industries.height(), 1);
    }

    #[tokio::test]
    async fn test_rankings_errors() {
        let err = rankings(&provider(), &[], &monthly()).await.unwrap_err();
        assert!(matches!(err, RsRatingError::InsufficientData(_)));

        let err = rankings(&provider(), &symbols(&["ZZZ"]), &monthly())
            .await
            .unwrap_err();
        assert!(matches!(err, RsRatingError::InsufficientData(_)));

        let config = monthly().with_reference("^NDX");
        let err = rankings(&provider(), &symbols(&["AAA"]), &config)
            .await
            .unwrap_err();
        assert!(matches!(err, RsRatingError::SymbolNotFound(s) if s == "^NDX"));
    }
}
