//! Weight normalization.
//!
//! Parses free-text magnitude expressions like `"200g"`, `"1.5kg"`, or
//! `"6 x 100g"` (a multi-pack: six units of 100 grams) and converts them to
//! kilograms. An unrecognised unit token is a distinct outcome: the value
//! passes through unconverted, but the caller can count it instead of
//! mistaking it for a successful conversion.

use crate::constants::units;
use crate::error::Result;
use polars::prelude::*;
use regex::Regex;
use tracing::debug;

/// Outcome of parsing one weight expression.
#[derive(Debug, Clone, PartialEq)]
pub enum WeightParse {
    /// Converted to kilograms.
    Kilograms(f64),
    /// Numeric part parsed but the unit token is not recognised; the value
    /// is kept as-is with no conversion applied.
    Unconverted { value: f64, unit: String },
    /// No numeric group matched at all.
    Unparseable,
}

/// Parser for `<number>[ x <number>] <unit>` weight expressions.
#[derive(Debug)]
pub struct WeightParser {
    pattern: Regex,
}

impl WeightParser {
    pub fn new() -> Self {
        // Up to two numeric groups (pack count x per-unit weight) and a
        // trailing unit token.
        let pattern = Regex::new(r"(?i)^\s*(\d+(?:\.\d+)?)\s*(?:x\s*(\d+(?:\.\d+)?))?\s*([a-z]+)")
            .expect("weight pattern is valid");
        Self { pattern }
    }

    pub fn parse(&self, raw: &str) -> WeightParse {
        let Some(caps) = self.pattern.captures(raw) else {
            return WeightParse::Unparseable;
        };
        let Ok(first) = caps[1].parse::<f64>() else {
            return WeightParse::Unparseable;
        };
        // Two numeric groups multiply: pack count x per-unit weight.
        let value = match caps.get(2) {
            Some(second) => match second.as_str().parse::<f64>() {
                Ok(per_unit) => first * per_unit,
                Err(_) => return WeightParse::Unparseable,
            },
            None => first,
        };
        let unit = caps[3].to_lowercase();
        match unit.as_str() {
            "kg" => WeightParse::Kilograms(value),
            "g" => WeightParse::Kilograms(value / units::G_PER_KG),
            "oz" => WeightParse::Kilograms(value * units::OZ_TO_KG),
            "ml" => WeightParse::Kilograms(value / units::ML_PER_KG),
            _ => WeightParse::Unconverted { value, unit },
        }
    }
}

impl Default for WeightParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a text weight column to kilograms in place. Missing values pass
/// through unchanged, unparseable values become null, and unrecognised units
/// pass through unconverted; the unrecognised count is returned for the
/// report.
pub fn convert_weight_column(df: DataFrame, column: &str) -> Result<(DataFrame, usize)> {
    let series = df.column(column)?.as_materialized_series().clone();
    if series.dtype() != &DataType::String {
        // Already numeric upstream; nothing to parse.
        let out = crate::clean::normalize::cast_lenient(df, column, &DataType::Float64)?;
        return Ok((out, 0));
    }

    let parser = WeightParser::new();
    let ca = series.str()?;
    let mut unrecognised = 0usize;
    let mut values: Vec<Option<f64>> = Vec::with_capacity(ca.len());
    for opt in ca.into_iter() {
        match opt {
            None => values.push(None),
            Some(raw) => match parser.parse(raw) {
                WeightParse::Kilograms(kg) => values.push(Some(kg)),
                WeightParse::Unconverted { value, unit } => {
                    debug!("weight '{}': unit '{}' not recognised, value kept", raw, unit);
                    unrecognised += 1;
                    values.push(Some(value));
                }
                WeightParse::Unparseable => values.push(None),
            },
        }
    }

    let converted = Float64Chunked::from_slice_options(column.into(), &values).into_series();
    let mut df = df;
    df.with_column(converted)?;
    Ok((df, unrecognised))
}
