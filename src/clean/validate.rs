//! Row validator.
//!
//! Detects structurally invalid rows via a designated anchor column and
//! removes them (drop policy), or annotates logically-suspect rows without
//! removing them (flag policy). Every removal is counted so routines can
//! report per-stage drop counts.

use crate::error::Result;
use crate::models::CleaningReport;
use crate::schema::{RepairPolicy, TableRules, TemporalParse};
use polars::prelude::*;

/// Drop every row where `column` is null, returning the surviving frame and
/// the number of rows removed.
pub fn drop_where_null(df: DataFrame, column: &str) -> Result<(DataFrame, usize)> {
    let before = df.height();
    let out = df.lazy().filter(col(column).is_not_null()).collect()?;
    let dropped = before - out.height();
    Ok((out, dropped))
}

/// Drop every row where the text in `column` fails to parse against
/// `format`. The column itself is left as text; only the parse check is
/// temporal.
pub fn drop_unparseable(
    df: DataFrame,
    column: &str,
    format: &str,
    kind: TemporalParse,
) -> Result<(DataFrame, usize)> {
    let options = StrptimeOptions {
        format: Some(format.into()),
        strict: false,
        ..Default::default()
    };
    let parsed = match kind {
        TemporalParse::Date => col(column).cast(DataType::String).str().to_date(options),
        TemporalParse::Time => col(column).cast(DataType::String).str().to_time(options),
    };
    let before = df.height();
    let out = df.lazy().filter(parsed.is_not_null()).collect()?;
    let dropped = before - out.height();
    Ok((out, dropped))
}

/// Flag policy: add a boolean column that is true where `predicate` holds.
/// Rows are never removed; nulls in the predicate flag as false. Returns the
/// annotated frame and the flagged count.
pub fn flag_where(
    df: DataFrame,
    predicate: Expr,
    flag_column: &str,
) -> Result<(DataFrame, usize)> {
    let out = df
        .lazy()
        .with_columns([predicate.fill_null(lit(false)).alias(flag_column)])
        .collect()?;
    let flagged = out
        .column(flag_column)?
        .as_materialized_series()
        .bool()?
        .sum()
        .unwrap_or(0) as usize;
    Ok((out, flagged))
}

/// Drop rows where every field is missing. Literal `"NULL"` text must be
/// mapped to null first (see [`null_text_to_missing`]) or such rows slip
/// through.
pub fn drop_all_null_rows(df: DataFrame) -> Result<(DataFrame, usize)> {
    drop_sparse_rows(df, 1)
}

/// Drop rows with fewer than `min_non_null` non-null values.
pub fn drop_sparse_rows(df: DataFrame, min_non_null: u32) -> Result<(DataFrame, usize)> {
    let before = df.height();
    let non_null = sum_horizontal([all().is_not_null().cast(DataType::UInt32)], true)?;
    let out = df
        .lazy()
        .filter(non_null.gt_eq(lit(min_non_null)))
        .collect()?;
    let dropped = before - out.height();
    Ok((out, dropped))
}

/// Map literal `"NULL"` text to a real missing value in every text column.
pub fn null_text_to_missing(df: DataFrame, sentinel: &str) -> Result<DataFrame> {
    let exprs: Vec<Expr> = df
        .get_columns()
        .iter()
        .filter(|c| c.dtype() == &DataType::String)
        .map(|c| {
            let name = c.name().as_str();
            when(col(name).eq(lit(sentinel)))
                .then(lit(NULL))
                .otherwise(col(name))
                .alias(name)
        })
        .collect();
    if exprs.is_empty() {
        return Ok(df);
    }
    Ok(df.lazy().with_columns(exprs).collect()?)
}

/// Apply every drop-policy rule in `rules` to the frame, recording one stage
/// count per anchor in the report. Drop-policy date columns are expected to
/// be normalized already (invalid values null); parse-check anchors stay
/// text.
pub fn apply_drop_policies(
    df: DataFrame,
    rules: &TableRules,
    report: &mut CleaningReport,
) -> Result<DataFrame> {
    let mut df = df;
    for rule in &rules.columns {
        match rule.policy {
            Some(RepairPolicy::DropRow) => {
                let (out, dropped) = drop_where_null(df, rule.name)?;
                report.record_drop(rule.name, dropped);
                df = out;
            }
            Some(RepairPolicy::DropRowUnparseable { format, kind }) => {
                let (out, dropped) = drop_unparseable(df, rule.name, format, kind)?;
                report.record_drop(rule.name, dropped);
                df = out;
            }
            Some(RepairPolicy::FlagRow { .. }) | None => {}
        }
    }
    Ok(df)
}
