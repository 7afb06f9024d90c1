//! Cleaning routine for the legacy user source.

use crate::clean::{CleaningRoutine, dedupe, normalize, validate};
use crate::config::SuspectDatePolicy;
use crate::error::Result;
use crate::models::{CleanOutcome, CleaningReport, SourceId};
use crate::schema::{ColumnRule, RepairPolicy, SemanticType, TableRules};
use polars::prelude::*;
use tracing::info;

/// Boolean column recording a join date that precedes the date of birth.
pub const INVALID_DATE_FLAG: &str = "invalid_date_flag";

/// Cleans `legacy_users` into `dim_users`.
///
/// Rows with an invalid date of birth are corrupt throughout and get
/// dropped. A join date preceding the date of birth is suspicious but the
/// rest of the row holds valid data, so the default remediation flags
/// instead of dropping; the policy is configurable.
#[derive(Debug)]
pub struct UserRoutine {
    suspect_join_date: SuspectDatePolicy,
}

impl UserRoutine {
    pub fn new(suspect_join_date: SuspectDatePolicy) -> Self {
        Self { suspect_join_date }
    }
}

impl CleaningRoutine for UserRoutine {
    fn source(&self) -> SourceId {
        SourceId::LegacyUsers
    }

    fn rules(&self) -> TableRules {
        TableRules::new(
            SourceId::LegacyUsers,
            Some("user_uuid"),
            vec![
                ColumnRule::typed("index", SemanticType::Int32),
                ColumnRule::typed("first_name", SemanticType::Text),
                ColumnRule::typed("last_name", SemanticType::Text),
                ColumnRule::typed("company", SemanticType::Text),
                ColumnRule::typed("email_address", SemanticType::Text),
                ColumnRule::typed("address", SemanticType::Text),
                ColumnRule::typed("phone_number", SemanticType::Text),
                ColumnRule::typed("user_uuid", SemanticType::Text),
                ColumnRule::typed("country", SemanticType::Category),
                ColumnRule::typed("country_code", SemanticType::Category),
                ColumnRule::with_policy(
                    "date_of_birth",
                    SemanticType::Date,
                    RepairPolicy::DropRow,
                ),
                ColumnRule::with_policy(
                    "join_date",
                    SemanticType::Date,
                    RepairPolicy::FlagRow {
                        flag_column: INVALID_DATE_FLAG,
                    },
                ),
            ],
        )
    }

    fn clean(&self, raw: DataFrame) -> Result<CleanOutcome> {
        let rules = self.rules();
        let mut report = CleaningReport::new(self.source(), raw.height());

        // join_date is parsed independently of date_of_birth; an invalid
        // join date becomes null and never drops the row.
        let df = normalize::apply_rules(raw, &rules)?;
        let df = validate::apply_drop_policies(df, &rules, &mut report)?;

        let (df, removed) = dedupe::dedupe_by_key(df, "user_uuid")?;
        report.record_drop("duplicate user_uuid", removed);

        // Parses fine but is logically impossible: flag-policy territory.
        let suspect = col("join_date").lt(col("date_of_birth"));
        let df = match self.suspect_join_date {
            SuspectDatePolicy::Flag => {
                let (df, flagged) = validate::flag_where(df, suspect, INVALID_DATE_FLAG)?;
                report.flagged = flagged;
                df
            }
            SuspectDatePolicy::Drop => {
                let before = df.height();
                let df = df
                    .lazy()
                    .filter(suspect.fill_null(lit(false)).not())
                    .collect()?;
                report.record_drop("join_date precedes date_of_birth", before - df.height());
                df
            }
        };

        report.rows_out = df.height();
        info!("{}", report.summary());
        Ok(CleanOutcome { frame: df, report })
    }
}
