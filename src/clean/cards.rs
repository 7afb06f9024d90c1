//! Cleaning routine for the card details source.

use crate::clean::{CleaningRoutine, dedupe, normalize, validate};
use crate::error::Result;
use crate::models::{CleanOutcome, CleaningReport, SourceId};
use crate::schema::{ColumnRule, RepairPolicy, SemanticType, TableRules, TemporalParse};
use polars::prelude::*;
use tracing::info;

/// Cleans the PDF-extracted card table into `dim_card_details`.
///
/// Rows whose expiry date fails the MM/YY parse are corrupt in every other
/// column too, so the expiry date is the drop anchor. Card numbers are
/// normalized to digits only before deduplication so formatting noise never
/// hides a duplicate.
#[derive(Debug, Default)]
pub struct CardRoutine;

impl CleaningRoutine for CardRoutine {
    fn source(&self) -> SourceId {
        SourceId::CardDetails
    }

    fn rules(&self) -> TableRules {
        TableRules::new(
            SourceId::CardDetails,
            Some("card_number"),
            vec![
                ColumnRule::typed("card_number", SemanticType::Text),
                ColumnRule::with_policy(
                    "expiry_date",
                    SemanticType::Text,
                    RepairPolicy::DropRowUnparseable {
                        format: "%m/%y",
                        kind: TemporalParse::Date,
                    },
                ),
                ColumnRule::typed("card_provider", SemanticType::Category),
                ColumnRule::typed("date_payment_confirmed", SemanticType::Date),
            ],
        )
    }

    fn clean(&self, raw: DataFrame) -> Result<CleanOutcome> {
        let rules = self.rules();
        let mut report = CleaningReport::new(self.source(), raw.height());

        let df = normalize::apply_rules(raw, &rules)?;
        let df = validate::apply_drop_policies(df, &rules, &mut report)?;

        // Strip separators and other non-digit characters.
        let df = df
            .lazy()
            .with_columns([col("card_number")
                .str()
                .replace_all(lit("[^0-9]"), lit(""), false)])
            .collect()?;

        let (df, removed) = dedupe::dedupe_by_key(df, "card_number")?;
        report.record_drop("duplicate card_number", removed);

        report.rows_out = df.height();
        info!("{}", report.summary());
        Ok(CleanOutcome { frame: df, report })
    }
}
