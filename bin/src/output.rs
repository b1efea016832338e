//! Printing and saving ranking tables.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use polars::prelude::*;
use rs_rating::{PercentileMethod, RankingTables};
use std::{
    fs::{self, File},
    path::{Path, PathBuf},
    time::Instant,
};
use tracing::info;

/// Identifies a ranking run in the CSV file names.
#[derive(Debug, Clone)]
pub(crate) struct RunLabel {
    /// Ranking kind: `rs`, `rsm` or `fin`.
    pub(crate) kind: &'static str,
    /// Rating variant, e.g. `12mo`, `sma52` or `eps`.
    pub(crate) variant: String,
    /// Percentile method.
    pub(crate) method: PercentileMethod,
}

impl RunLabel {
    /// `<kind>_<table>_<variant>_<method>_<YYYYMMDD>.csv`
    pub(crate) fn file_name(&self, table: &str, date: NaiveDate) -> String {
        format!(
            "{}_{}_{}_{}_{}.csv",
            self.kind,
            table,
            self.variant,
            self.method,
            date.format("%Y%m%d")
        )
    }
}

/// Keeps the rows whose `Percentile` is at least `min_percentile`.
pub(crate) fn filter_percentile(df: &DataFrame, min_percentile: i64) -> Result<DataFrame> {
    let mask = df
        .column("Percentile")?
        .as_materialized_series()
        .cast(&DataType::Int64)?
        .i64()?
        .gt_eq(min_percentile);
    Ok(df.filter(&mask)?)
}

fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Unable to create {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Writes both tables to `out_dir`, returning the file paths.
pub(crate) fn save_tables(
    tables: &mut RankingTables,
    out_dir: &Path,
    label: &RunLabel,
    date: NaiveDate,
) -> Result<[PathBuf; 2]> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Unable to create {}", out_dir.display()))?;

    let stocks = out_dir.join(label.file_name("stocks", date));
    let industries = out_dir.join(label.file_name("industries", date));
    write_csv(&mut tables.stocks, &stocks)?;
    write_csv(&mut tables.industries, &industries)?;
    info!(stocks = %stocks.display(), industries = %industries.display(), "Saved rankings");
    Ok([stocks, industries])
}

fn banner(title: &str) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{title:^62}║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
}

/// Prints the run header.
pub(crate) fn print_header(title: &str, tickers: usize) {
    banner(title);
    println!("Tickers:   {tickers}");
}

/// Prints the filtered stock table and the industry table, saves both and
/// reports the elapsed time.
pub(crate) fn report(
    mut tables: RankingTables,
    min_percentile: i64,
    out_dir: &Path,
    label: &RunLabel,
    started: Instant,
) -> Result<()> {
    if tables.is_empty() {
        println!("Not enough data to generate rankings.");
        return Ok(());
    }

    let top = filter_percentile(&tables.stocks, min_percentile)?;
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(
        "STOCKS (Percentile >= {min_percentile}: {} of {})",
        top.height(),
        tables.stocks.height()
    );
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    println!("{top}\n");

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("INDUSTRIES ({})", tables.industries.height());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    println!("{}\n", tables.industries);

    let [stocks, industries] =
        save_tables(&mut tables, out_dir, label, Local::now().date_naive())?;
    println!("Saved:     {}", stocks.display());
    println!("           {}", industries.display());
    println!("Elapsed:   {:.2}s\n", started.elapsed().as_secs_f64());
    Ok(())
}
