//! Constituent lists of the supported indices.
//!
//! The S&P 500, NASDAQ-100 and DJIA lists are scraped from their Wikipedia
//! pages. The PHLX Semiconductor index has no maintained table there and is
//! served from a fixed list.

use crate::error::IndicesError;
use reqwest::Client;
use rs_rating_traits::Symbol;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, info};

/// Default user agent for Wikipedia requests.
pub const DEFAULT_USER_AGENT: &str = concat!("rs-rating/", env!("CARGO_PKG_VERSION"));

/// Members of the PHLX Semiconductor Sector index.
pub const SOX_TICKERS: &[&str] = &[
    "AMD", "ADI", "AMAT", "ASML", "AZTA", "AVGO", "COHR", "ENTG", "GFS", "INTC", "IPGP", "KLAC",
    "LRCX", "LSCC", "MRVL", "MCHP", "MU", "MPWR", "NOVT", "NVDA", "NXPI", "ON", "QRVO", "QCOM",
    "SWKS", "SYNA", "TSM", "TER", "TXN", "WOLF",
];

/// Where the members of an index come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstituentSource {
    /// A table on a Wikipedia page.
    Wikipedia {
        /// Page URL.
        url: &'static str,
        /// CSS selector of the constituents table.
        table: &'static str,
        /// Header of the ticker column.
        column: &'static str,
    },
    /// A fixed list.
    Static(&'static [&'static str]),
}

/// Indices whose constituents can be listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Index {
    /// S&P 500 (`^GSPC`, `SPX`).
    Sp500,
    /// NASDAQ-100 (`^NDX`, `NDX`).
    Nasdaq100,
    /// Dow Jones Industrial Average (`^DJI`, `DJIA`).
    Djia,
    /// PHLX Semiconductor Sector (`^SOX`, `SOX`).
    Sox,
}

impl Index {
    /// All indices with a constituent source.
    pub const ALL: [Self; 4] = [Self::Sp500, Self::Nasdaq100, Self::Djia, Self::Sox];

    /// Resolve a Yahoo symbol or common abbreviation.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim() {
            "^GSPC" | "SPX" => Some(Self::Sp500),
            "^NDX" | "NDX" => Some(Self::Nasdaq100),
            "^DJI" | "DJIA" => Some(Self::Djia),
            "^SOX" | "SOX" => Some(Self::Sox),
            _ => None,
        }
    }

    /// The Yahoo symbol of the index.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Sp500 => "^GSPC",
            Self::Nasdaq100 => "^NDX",
            Self::Djia => "^DJI",
            Self::Sox => "^SOX",
        }
    }

    /// Where the constituents are read from.
    #[must_use]
    pub const fn source(self) -> ConstituentSource {
        match self {
            Self::Sp500 => ConstituentSource::Wikipedia {
                url: "https://en.wikipedia.org/wiki/List_of_S%26P_500_companies",
                table: "table.wikitable",
                column: "Symbol",
            },
            Self::Nasdaq100 => ConstituentSource::Wikipedia {
                url: "https://en.wikipedia.org/wiki/Nasdaq-100",
                table: "table#constituents",
                column: "Ticker",
            },
            Self::Djia => ConstituentSource::Wikipedia {
                url: "https://en.wikipedia.org/wiki/Dow_Jones_Industrial_Average",
                table: "table.wikitable#constituents",
                column: "Symbol",
            },
            Self::Sox => ConstituentSource::Static(SOX_TICKERS),
        }
    }
}

fn selector(css: &str) -> Result<Selector, IndicesError> {
    Selector::parse(css).map_err(|e| IndicesError::Selector(format!("{css}: {e}")))
}

fn cell_text(cell: ElementRef<'_>) -> String {
    let text: String = cell.text().collect();
    // Drop footnote markers such as "Symbol[3]"
    text.split('[').next().unwrap_or_default().trim().to_string()
}

/// Normalize a listed ticker to its Yahoo form (`BRK.B` -> `BRK-B`).
#[must_use]
pub fn normalize_ticker(ticker: &str) -> Symbol {
    ticker.trim().replace('.', "-")
}

/// Extract the tickers of the first table matching `table` from an HTML page.
///
/// The ticker column is located by its header text. Rows without data cells
/// and blank tickers are skipped.
///
/// # Errors
///
/// Returns an error if no table matches or it has no `column` header.
pub fn parse_constituents(
    html: &str,
    table: &str,
    column: &str,
) -> Result<Vec<Symbol>, IndicesError> {
    let document = Html::parse_document(html);
    let table_sel = selector(table)?;
    let row_sel = selector("tr")?;
    let cell_sel = selector("th, td")?;
    let data_sel = selector("td")?;

    let table_el = document
        .select(&table_sel)
        .next()
        .ok_or_else(|| IndicesError::TableNotFound(table.to_string()))?;

    let mut rows = table_el.select(&row_sel);
    let col_idx = rows
        .by_ref()
        .find_map(|row| {
            row.select(&cell_sel)
                .position(|cell| cell.value().name() == "th" && cell_text(cell) == column)
        })
        .ok_or_else(|| IndicesError::ColumnNotFound(column.to_string()))?;

    let tickers = rows
        .filter(|row| row.select(&data_sel).next().is_some())
        .filter_map(|row| row.select(&cell_sel).nth(col_idx).map(cell_text))
        .filter(|ticker| !ticker.is_empty())
        .map(|ticker| normalize_ticker(&ticker))
        .collect();

    Ok(tickers)
}

/// Client listing index constituents.
#[derive(Debug, Clone)]
pub struct IndicesClient {
    client: Client,
}

impl IndicesClient {
    /// Create a client with the given user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(user_agent: &str) -> Result<Self, IndicesError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { client })
    }

    /// Wrap an existing HTTP client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// List the constituents of an index given its symbol or abbreviation.
    ///
    /// # Errors
    ///
    /// Returns [`IndicesError::IndexNotFound`] for unsupported symbols, or an
    /// error if the page cannot be fetched or parsed.
    pub async fn get_tickers(&self, symbol: &str) -> Result<Vec<Symbol>, IndicesError> {
        let index = Index::from_symbol(symbol)
            .ok_or_else(|| IndicesError::IndexNotFound(symbol.to_string()))?;

        let tickers = match index.source() {
            ConstituentSource::Static(list) => list.iter().map(|t| (*t).to_string()).collect(),
            ConstituentSource::Wikipedia { url, table, column } => {
                debug!(url, "Fetching constituents page");
                let html = self
                    .client
                    .get(url)
                    .send()
                    .await?
                    .error_for_status()?
                    .text()
                    .await?;
                parse_constituents(&html, table, column)?
            }
        };

        info!(index = index.symbol(), count = tickers.len(), "Listed constituents");
        Ok(tickers)
    }
}

/// List the constituents of an index with a default client.
///
/// # Errors
///
/// See [`IndicesClient::get_tickers`].
pub async fn get_tickers(symbol: &str) -> Result<Vec<Symbol>, IndicesError> {
    IndicesClient::new(DEFAULT_USER_AGENT)?
        .get_tickers(symbol)
        .await
}
