//! Cleaning routine for the store details source.

use crate::clean::{CleaningRoutine, normalize, validate};
use crate::constants::{CONTINENT_FIXES, NOT_AVAILABLE, NULL_TEXT, STORE_MIN_NON_NULL};
use crate::error::Result;
use crate::models::{CleanOutcome, CleaningReport, SourceId};
use crate::schema::{ColumnRule, RepairPolicy, SemanticType, TableRules};
use polars::prelude::*;
use tracing::info;

/// Cleans the store API payload into `dim_store_details`.
///
/// The `lat` column never held valid entries and is removed outright. Some
/// rows carry literal `"NULL"` text in every field; those are swept after
/// mapping the sentinel to a real missing value. Staff numbers contain
/// alphabetic typos in otherwise valid rows, so the letters are stripped
/// rather than the rows dropped.
#[derive(Debug, Default)]
pub struct StoreRoutine;

impl CleaningRoutine for StoreRoutine {
    fn source(&self) -> SourceId {
        SourceId::StoreDetails
    }

    fn rules(&self) -> TableRules {
        TableRules::new(
            SourceId::StoreDetails,
            None,
            vec![
                ColumnRule::typed("index", SemanticType::Int32),
                ColumnRule::typed("address", SemanticType::Text),
                ColumnRule::typed("locality", SemanticType::Text),
                ColumnRule::typed("store_code", SemanticType::Text),
                ColumnRule::typed("longitude", SemanticType::Float64),
                ColumnRule::typed("latitude", SemanticType::Float64),
                ColumnRule::typed("staff_numbers", SemanticType::Int32),
                ColumnRule::with_policy(
                    "opening_date",
                    SemanticType::Date,
                    RepairPolicy::DropRow,
                ),
                ColumnRule::typed("store_type", SemanticType::Category),
                ColumnRule::typed("country_code", SemanticType::Category),
                ColumnRule::typed("continent", SemanticType::Category),
            ],
        )
    }

    fn clean(&self, raw: DataFrame) -> Result<CleanOutcome> {
        let rules = self.rules();
        let mut report = CleaningReport::new(self.source(), raw.height());

        // 'lat' holds a handful of junk values and nothing else.
        let df = if raw.column("lat").is_ok() {
            raw.drop("lat")?
        } else {
            raw
        };

        let df = validate::null_text_to_missing(df, NULL_TEXT)?;
        let (df, dropped) = validate::drop_sparse_rows(df, STORE_MIN_NON_NULL)?;
        report.record_drop("all-null rows", dropped);

        // Text-level repairs before the casts that depend on them.
        let df = df
            .lazy()
            .with_columns([
                // "N/A" coordinates mean absent, not a parse failure
                when(col("longitude").eq(lit(NOT_AVAILABLE)))
                    .then(lit(NULL))
                    .otherwise(col("longitude"))
                    .alias("longitude"),
                when(col("latitude").eq(lit(NOT_AVAILABLE)))
                    .then(lit(NULL))
                    .otherwise(col("latitude"))
                    .alias("latitude"),
                // alphabetic typos in otherwise valid rows
                col("staff_numbers")
                    .str()
                    .replace_all(lit("[^0-9]"), lit(""), false),
                fix_continents(col("continent")),
            ])
            .collect()?;

        let df = normalize::apply_rules(df, &rules)?;
        let df = validate::apply_drop_policies(df, &rules, &mut report)?;

        report.rows_out = df.height();
        info!("{}", report.summary());
        Ok(CleanOutcome { frame: df, report })
    }
}

/// Repair the two known corrupted continent spellings.
fn fix_continents(expr: Expr) -> Expr {
    let mut out = expr.clone();
    for (corrupt, fixed) in CONTINENT_FIXES {
        out = when(expr.clone().eq(lit(*corrupt)))
            .then(lit(*fixed))
            .otherwise(out);
    }
    out.alias("continent")
}
