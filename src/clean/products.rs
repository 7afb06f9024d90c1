//! Cleaning routine for the products source.

use crate::clean::{CleaningRoutine, dedupe, normalize, validate, weights};
use crate::constants::NULL_TEXT;
use crate::error::Result;
use crate::models::{CleanOutcome, CleaningReport, SourceId};
use crate::schema::{ColumnRule, RepairPolicy, SemanticType, TableRules};
use polars::prelude::*;
use tracing::{info, warn};

/// Cleans the object-storage products CSV into `dim_products`.
///
/// Products is the strictest source: a row with any missing field is dropped
/// outright, before anything else runs. Weight conversion happens last so
/// that a weight the parser cannot read becomes a missing value without
/// costing the row.
#[derive(Debug, Default)]
pub struct ProductRoutine;

impl CleaningRoutine for ProductRoutine {
    fn source(&self) -> SourceId {
        SourceId::Products
    }

    fn rules(&self) -> TableRules {
        TableRules::new(
            SourceId::Products,
            Some("uuid"),
            vec![
                ColumnRule::typed("product_name", SemanticType::Text),
                ColumnRule::typed("product_price", SemanticType::Text),
                ColumnRule::typed("category", SemanticType::Category),
                ColumnRule::typed("EAN", SemanticType::Text),
                ColumnRule::typed("uuid", SemanticType::Text),
                ColumnRule::typed("removed", SemanticType::Category),
                ColumnRule::typed("product_code", SemanticType::Text),
                ColumnRule::with_policy("date_added", SemanticType::Date, RepairPolicy::DropRow),
            ],
        )
    }

    fn clean(&self, raw: DataFrame) -> Result<CleanOutcome> {
        let rules = self.rules();
        let mut report = CleaningReport::new(self.source(), raw.height());

        let df = validate::null_text_to_missing(raw, NULL_TEXT)?;
        let before = df.height();
        let df = df.lazy().drop_nulls(None).collect()?;
        report.record_drop("rows with missing fields", before - df.height());

        let df = normalize::apply_rules(df, &rules)?;
        let df = validate::apply_drop_policies(df, &rules, &mut report)?;

        let (df, removed) = dedupe::dedupe_by_key(df, "uuid")?;
        report.record_drop("duplicate uuid", removed);

        let (df, unrecognised) = weights::convert_weight_column(df, "weight")?;
        report.unrecognised_units = unrecognised;
        if unrecognised > 0 {
            warn!(
                "{} product weights carried an unrecognised unit and were kept unconverted",
                unrecognised
            );
        }

        report.rows_out = df.height();
        info!("{}", report.summary());
        Ok(CleanOutcome { frame: df, report })
    }
}
