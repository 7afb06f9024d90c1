//! Type normalizer.
//!
//! Coerces raw column values to their declared semantic types. Conversions
//! are lenient: a value that cannot be converted becomes the frame's native
//! null, never an error. Integer columns are narrowed only after checking
//! that the observed minimum and maximum both fit the target range.

use crate::error::{EtlError, Result};
use crate::schema::{SemanticType, TableRules};
use polars::prelude::*;
use tracing::warn;

/// Check whether every value in an integer column fits the signed 32-bit
/// range. An empty or all-null column trivially fits.
pub fn is_within_int32_range(df: &DataFrame, column: &str) -> Result<bool> {
    fits_range(df, column, i64::from(i32::MIN), i64::from(i32::MAX))
}

/// Check whether every value in an integer column fits the signed 16-bit
/// range.
pub fn is_within_int16_range(df: &DataFrame, column: &str) -> Result<bool> {
    fits_range(df, column, i64::from(i16::MIN), i64::from(i16::MAX))
}

fn fits_range(df: &DataFrame, column: &str, lo: i64, hi: i64) -> Result<bool> {
    let series = df
        .column(column)?
        .as_materialized_series()
        .cast(&DataType::Int64)?;
    let (Some(min), Some(max)) = (series.min::<i64>()?, series.max::<i64>()?) else {
        return Ok(true);
    };
    Ok(min >= lo && max <= hi)
}

/// Coerce every column named in `rules` to its declared semantic type.
///
/// Columns present in the frame but absent from the rules are left
/// untouched; a rule naming a column the frame lacks is an error, since the
/// schema is fixed per source.
pub fn apply_rules(df: DataFrame, rules: &TableRules) -> Result<DataFrame> {
    let mut df = df;
    for rule in &rules.columns {
        if df.column(rule.name).is_err() {
            return Err(EtlError::missing_column(rules.source.as_str(), rule.name));
        }
        df = match rule.ty {
            SemanticType::Text => cast_lenient(df, rule.name, &DataType::String)?,
            SemanticType::Category => cast_lenient(
                df,
                rule.name,
                &DataType::Categorical(None, Default::default()),
            )?,
            SemanticType::Float64 => cast_lenient(df, rule.name, &DataType::Float64)?,
            SemanticType::Date => parse_date_column(df, rule.name, None)?,
            SemanticType::Int32 => narrow_integer(df, rule.name, SemanticType::Int32)?,
            SemanticType::Int16 => narrow_integer(df, rule.name, SemanticType::Int16)?,
        };
    }
    Ok(df)
}

/// Lenient cast of one column; unconvertible values become null.
pub fn cast_lenient(mut df: DataFrame, column: &str, dtype: &DataType) -> Result<DataFrame> {
    let casted = df.column(column)?.as_materialized_series().cast(dtype)?;
    df.with_column(casted)?;
    Ok(df)
}

/// Parse a text column to calendar dates. `format` of `None` lets the parser
/// infer the layout; values that fail to parse become null rather than
/// raising.
pub fn parse_date_column(df: DataFrame, column: &str, format: Option<&str>) -> Result<DataFrame> {
    if df.column(column)?.dtype() == &DataType::Date {
        return Ok(df);
    }
    let options = StrptimeOptions {
        format: format.map(|f| f.into()),
        strict: false,
        ..Default::default()
    };
    let out = df
        .lazy()
        .with_columns([col(column)
            .cast(DataType::String)
            .str()
            .to_date(options)
            .alias(column)])
        .collect()?;
    Ok(out)
}

/// Narrow an integer column to 32 or 16 bits, but only when the observed
/// minimum and maximum both fit; otherwise the 64-bit width is retained
/// rather than silently overflowing.
pub fn narrow_integer(df: DataFrame, column: &str, target: SemanticType) -> Result<DataFrame> {
    // Go through Int64 first so text input gets a lenient numeric parse
    // before the range check.
    let df = cast_lenient(df, column, &DataType::Int64)?;
    let fits = match target {
        SemanticType::Int32 => is_within_int32_range(&df, column)?,
        SemanticType::Int16 => is_within_int16_range(&df, column)?,
        _ => false,
    };
    if fits {
        cast_lenient(df, column, &target.dtype())
    } else {
        warn!(
            "column '{}' exceeds {:?} range, keeping 64-bit width",
            column, target
        );
        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceId;
    use crate::schema::ColumnRule;

    #[test]
    fn narrows_when_observed_range_fits() {
        let df = df!("index" => [0i64, 42, 15319]).unwrap();
        let out = narrow_integer(df, "index", SemanticType::Int32).unwrap();
        assert_eq!(out.column("index").unwrap().dtype(), &DataType::Int32);
    }

    #[test]
    fn keeps_wide_width_when_out_of_range() {
        let df = df!("index" => [0i64, 3_000_000_000]).unwrap();
        let out = narrow_integer(df, "index", SemanticType::Int32).unwrap();
        assert_eq!(out.column("index").unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn narrows_text_input_to_int16() {
        let df = df!("month" => ["1", "7", "12"]).unwrap();
        let out = narrow_integer(df, "month", SemanticType::Int16).unwrap();
        assert_eq!(out.column("month").unwrap().dtype(), &DataType::Int16);
    }

    #[test]
    fn unparseable_dates_become_null() {
        let df = df!("opened" => ["2019-05-04", "not a date", "2001-11-23"]).unwrap();
        let out = parse_date_column(df, "opened", None).unwrap();
        assert_eq!(out.column("opened").unwrap().dtype(), &DataType::Date);
        assert_eq!(out.column("opened").unwrap().null_count(), 1);
    }

    #[test]
    fn all_null_column_trivially_fits() {
        let df = df!("n" => [None::<i64>, None]).unwrap();
        assert!(is_within_int32_range(&df, "n").unwrap());
    }

    #[test]
    fn missing_rule_column_is_an_error() {
        let rules = TableRules::new(
            SourceId::Orders,
            None,
            vec![ColumnRule::typed("absent", SemanticType::Text)],
        );
        let df = df!("present" => ["x"]).unwrap();
        assert!(apply_rules(df, &rules).is_err());
    }

    #[test]
    fn lenient_numeric_cast_nulls_junk() {
        let df = df!("staff" => ["30", "J78", ""]).unwrap();
        let out = cast_lenient(df, "staff", &DataType::Int64).unwrap();
        // "J78" and "" do not parse
        assert_eq!(out.column("staff").unwrap().null_count(), 2);
    }
}
