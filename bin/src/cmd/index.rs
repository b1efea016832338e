//! Index constituents command.

use anyhow::Result;
use rs_rating::indices;

/// Print the constituents or the display name of an index.
pub(crate) async fn run(symbol: &str, name: bool) -> Result<()> {
    let symbol = indices::ticker_from_name(symbol).unwrap_or(symbol);

    if name {
        println!("{}", indices::get_name(symbol));
        return Ok(());
    }

    let tickers = indices::get_tickers(symbol).await?;
    println!("{} ({}): {} tickers", indices::get_name(symbol), symbol, tickers.len());
    println!("{}", tickers.join(" "));
    Ok(())
}
