//! DataFrame-level ranking utilities.
//!
//! These operate on ranking tables with display column names and are used
//! for tables whose columns are only known at runtime, such as the
//! financial-metric ranking where column names carry the metric label.

use std::collections::BTreeMap;

use polars::prelude::*;
use rs_rating_traits::{
    Result, RsRatingError,
    stats::{nan_mean, round_to},
};

use super::{
    percentile::{PercentileMethod, calc_percentile},
    table::desc_nan_last,
};

/// Name of the grouping column.
pub const INDUSTRY_COLUMN: &str = "Industry";

/// Reads a numeric column as `f64`, with nulls as `NaN`.
///
/// # Errors
///
/// Returns an error if the column is missing or cannot be cast to `f64`.
pub fn column_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let series = df
        .column(name)
        .map_err(|_| RsRatingError::MissingColumn(name.to_string()))?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(series
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect())
}

/// Reads a column as optional strings, casting non-string columns.
///
/// # Errors
///
/// Returns an error if the column is missing.
pub fn column_strings(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = df
        .column(name)
        .map_err(|_| RsRatingError::MissingColumn(name.to_string()))?
        .as_materialized_series()
        .cast(&DataType::String)?;
    Ok(series
        .str()?
        .into_iter()
        .map(|s| s.map(str::to_string))
        .collect())
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float64
            | DataType::Float32
            | DataType::Int64
            | DataType::Int32
            | DataType::Int16
            | DataType::Int8
            | DataType::UInt64
            | DataType::UInt32
            | DataType::UInt16
            | DataType::UInt8
    )
}

/// Appends a `Pctl (<col>)` column for each named numeric column.
///
/// # Errors
///
/// Returns an error if a column is missing or not numeric.
pub fn append_percentile(df: &mut DataFrame, columns: &[&str], method: PercentileMethod) -> Result<()> {
    for col in columns {
        let values = column_values(df, col)?;
        let percentiles = calc_percentile(&values, method);
        df.with_column(Column::new(format!("Pctl ({col})").into(), percentiles))?;
    }
    Ok(())
}

/// Groups a ranking table by industry and aggregates the listed columns.
///
/// `Ticker` and `Name` become a `,`-joined list ordered by `key`
/// descending with unrated members last, numeric columns become their mean rounded to 2 decimals,
/// and anything else takes its first non-null value. Rows without an
/// industry are dropped. The result is ordered by industry name.
///
/// # Errors
///
/// Returns an error if `Industry`, `key` or a listed column is missing.
pub fn groupby_industry(df: &DataFrame, columns: &[&str], key: &str) -> Result<DataFrame> {
    let industries = column_strings(df, INDUSTRY_COLUMN)?;
    let keys = column_values(df, key)?;

    let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (idx, industry) in industries.iter().enumerate() {
        if let Some(industry) = industry {
            groups.entry(industry.clone()).or_default().push(idx);
        }
    }

    let mut out = Vec::with_capacity(columns.len() + 1);
    out.push(Column::new(
        INDUSTRY_COLUMN.into(),
        groups.keys().cloned().collect::<Vec<String>>(),
    ));

    for col in columns {
        let dtype = df
            .column(col)
            .map_err(|_| RsRatingError::MissingColumn((*col).to_string()))?
            .dtype()
            .clone();

        let column = if *col == "Ticker" || *col == "Name" {
            let items = column_strings(df, col)?;
            let joined: Vec<String> = groups
                .values()
                .map(|members| {
                    let mut members = members.clone();
                    members.sort_by(|a, b| desc_nan_last(keys[*a], keys[*b]));
                    members
                        .iter()
                        .filter_map(|i| items[*i].as_deref())
                        .collect::<Vec<_>>()
                        .join(",")
                })
                .collect();
            Column::new((*col).into(), joined)
        } else if is_numeric(&dtype) {
            let values = column_values(df, col)?;
            let means: Vec<Option<f64>> = groups
                .values()
                .map(|members| {
                    let group: Vec<f64> = members.iter().map(|i| values[*i]).collect();
                    let mean = round_to(nan_mean(&group), 2);
                    mean.is_finite().then_some(mean)
                })
                .collect();
            Column::new((*col).into(), means)
        } else {
            let items = column_strings(df, col)?;
            let firsts: Vec<Option<String>> = groups
                .values()
                .map(|members| members.iter().find_map(|i| items[*i].clone()))
                .collect();
            Column::new((*col).into(), firsts)
        };
        out.push(column);
    }

    Ok(DataFrame::new(out)?)
}

/// Sorts a table by `column` descending with nulls last and prepends a
/// 1-based `Rank` column.
///
/// # Errors
///
/// Returns an error if the column is missing.
pub fn sort_and_rank(df: &DataFrame, column: &str) -> Result<DataFrame> {
    let mut sorted = df.sort(
        [column],
        SortMultipleOptions::default()
            .with_order_descending(true)
            .with_nulls_last(true)
            .with_maintain_order(true),
    )?;
    let ranks: Vec<u32> = (1..=sorted.height() as u32).collect();
    sorted.insert_column(0, Column::new("Rank".into(), ranks))?;
    Ok(sorted)
}
