//! Cleaning routine for the orders fact source.

use crate::clean::{CleaningRoutine, normalize};
use crate::error::Result;
use crate::models::{CleanOutcome, CleaningReport, SourceId};
use crate::schema::{ColumnRule, SemanticType, TableRules};
use polars::prelude::*;
use tracing::info;

/// Columns carried over from an upstream join that do not belong in the
/// fact table, plus the unnamed `"1"` artifact column.
const PRUNED_COLUMNS: &[&str] = &["1", "first_name", "last_name"];

/// Cleans the denormalized orders table into `orders_table`.
///
/// Orders arrive pre-validated upstream: this routine only prunes foreign
/// text columns and retypes the identifier columns. No row is ever dropped;
/// the pipeline asserts the row count is unchanged.
#[derive(Debug, Default)]
pub struct OrderRoutine;

impl CleaningRoutine for OrderRoutine {
    fn source(&self) -> SourceId {
        SourceId::Orders
    }

    fn rules(&self) -> TableRules {
        TableRules::new(
            SourceId::Orders,
            None,
            vec![
                ColumnRule::typed("index", SemanticType::Int32),
                ColumnRule::typed("date_uuid", SemanticType::Text),
                ColumnRule::typed("user_uuid", SemanticType::Text),
                ColumnRule::typed("card_number", SemanticType::Text),
                ColumnRule::typed("store_code", SemanticType::Text),
                ColumnRule::typed("product_code", SemanticType::Text),
            ],
        )
    }

    fn clean(&self, raw: DataFrame) -> Result<CleanOutcome> {
        let rules = self.rules();
        let mut report = CleaningReport::new(self.source(), raw.height());

        let mut df = raw;
        for name in PRUNED_COLUMNS {
            if df.column(name).is_ok() {
                df = df.drop(name)?;
            }
        }

        let df = normalize::apply_rules(df, &rules)?;

        report.rows_out = df.height();
        debug_assert_eq!(report.rows_out, report.rows_in);
        info!("{}", report.summary());
        Ok(CleanOutcome { frame: df, report })
    }
}
