//! Cleaning routine for the date/time detail source.

use crate::clean::{CleaningRoutine, dedupe, normalize, validate};
use crate::error::Result;
use crate::models::{CleanOutcome, CleaningReport, SourceId};
use crate::schema::{ColumnRule, RepairPolicy, SemanticType, TableRules, TemporalParse};
use polars::prelude::*;
use tracing::info;

/// Cleans the object-storage date details JSON into `dim_date_times`.
///
/// The timestamp is the drop anchor: a row whose timestamp does not parse as
/// a time of day is corrupt throughout. Month, day, and year all fit 16-bit
/// integers.
#[derive(Debug, Default)]
pub struct TimeDetailRoutine;

impl CleaningRoutine for TimeDetailRoutine {
    fn source(&self) -> SourceId {
        SourceId::DateDetails
    }

    fn rules(&self) -> TableRules {
        TableRules::new(
            SourceId::DateDetails,
            Some("date_uuid"),
            vec![
                ColumnRule::with_policy(
                    "timestamp",
                    SemanticType::Text,
                    RepairPolicy::DropRowUnparseable {
                        format: "%H:%M:%S",
                        kind: TemporalParse::Time,
                    },
                ),
                ColumnRule::typed("month", SemanticType::Int16),
                ColumnRule::typed("year", SemanticType::Int16),
                ColumnRule::typed("day", SemanticType::Int16),
                ColumnRule::typed("time_period", SemanticType::Category),
                ColumnRule::typed("date_uuid", SemanticType::Text),
            ],
        )
    }

    fn clean(&self, raw: DataFrame) -> Result<CleanOutcome> {
        let rules = self.rules();
        let mut report = CleaningReport::new(self.source(), raw.height());

        // Anchor check first: junk rows would otherwise survive the lenient
        // integer casts as nulls.
        let df = validate::apply_drop_policies(raw, &rules, &mut report)?;
        let df = normalize::apply_rules(df, &rules)?;

        let (df, removed) = dedupe::dedupe_by_key(df, "date_uuid")?;
        report.record_drop("duplicate date_uuid", removed);

        report.rows_out = df.height();
        info!("{}", report.summary());
        Ok(CleanOutcome { frame: df, report })
    }
}
