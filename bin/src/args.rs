//! Arguments shared by the ranking commands.

use anyhow::{Result, bail};
use clap::Args;
use rs_rating::{HistoryRange, Interval, PercentileMethod, YahooClient, YahooConfig, indices};
use std::path::PathBuf;

/// Which tickers to rank.
#[derive(Debug, Args)]
pub(crate) struct UniverseArgs {
    /// Ticker symbols (space or comma separated)
    #[arg(value_delimiter = ',')]
    pub(crate) tickers: Vec<String>,

    /// Rank the constituents of an index (^GSPC/SPX, ^NDX/NDX, ^DJI/DJIA, ^SOX/SOX)
    #[arg(short, long)]
    pub(crate) index: Option<String>,
}

impl UniverseArgs {
    /// The tickers to rank: the explicit list plus the index constituents.
    pub(crate) async fn resolve(&self) -> Result<Vec<String>> {
        let mut tickers: Vec<String> = self
            .tickers
            .iter()
            .map(|t| t.trim().to_uppercase())
            .filter(|t| !t.is_empty())
            .collect();

        if let Some(index) = &self.index {
            let symbol = indices::ticker_from_name(index).unwrap_or(index.as_str());
            println!("Index:     {} ({})", indices::get_name(symbol), symbol);
            tickers.extend(indices::get_tickers(symbol).await?);
        }

        if tickers.is_empty() {
            bail!("no tickers given; pass ticker symbols or --index");
        }
        Ok(tickers)
    }
}

/// Price history settings.
#[derive(Debug, Args)]
pub(crate) struct PriceArgs {
    /// Benchmark ticker
    #[arg(short, long, env = "RS_RATING_REFERENCE", default_value = rs_rating::DEFAULT_REFERENCE)]
    pub(crate) reference: String,

    /// History range (1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max)
    #[arg(long, default_value = "2y")]
    pub(crate) range: HistoryRange,

    /// Bar interval (1d, 1wk, 1mo; default: 1d for rs, 1wk for rsm)
    #[arg(long)]
    pub(crate) interval: Option<Interval>,

    /// Drop industries with fewer members
    #[arg(long, default_value = "1")]
    pub(crate) min_industry_size: usize,
}

/// Ranking output settings.
#[derive(Debug, Args)]
pub(crate) struct OutputArgs {
    /// Percentile method (qcut or rank)
    #[arg(short, long, default_value = "qcut")]
    pub(crate) method: PercentileMethod,

    /// Only print stocks at or above this percentile
    #[arg(short = 'p', long, default_value = "80")]
    pub(crate) min_percentile: i64,

    /// Directory of the CSV files
    #[arg(short, long, env = "RS_RATING_OUT_DIR", default_value = "out")]
    pub(crate) out_dir: PathBuf,
}

/// Yahoo Finance client settings.
#[derive(Debug, Args)]
pub(crate) struct ClientArgs {
    /// Concurrent requests
    #[arg(long, env = "RS_RATING_MAX_WORKERS")]
    pub(crate) max_workers: Option<usize>,

    /// HTTP user agent
    #[arg(long, env = "RS_RATING_USER_AGENT")]
    pub(crate) user_agent: Option<String>,
}

impl ClientArgs {
    pub(crate) fn client(&self) -> Result<YahooClient> {
        let mut config = YahooConfig::default();
        if let Some(workers) = self.max_workers {
            config.max_workers = workers;
        }
        if let Some(agent) = &self.user_agent {
            config.user_agent = agent.clone();
        }
        Ok(YahooClient::new(config)?)
    }
}
