//! Per-source data cleaning.
//!
//! Six independent routines share one shape: read in a raw record set,
//! normalize types, detect and drop (or flag) invalid rows, deduplicate by
//! natural key, and return the cleaned frame with a structured report. The
//! shared primitives live in [`normalize`], [`validate`], [`dedupe`], and
//! [`weights`]; each routine composes them with its source's fixed rules.

pub mod dedupe;
pub mod normalize;
pub mod validate;
pub mod weights;

pub mod cards;
pub mod orders;
pub mod products;
pub mod stores;
pub mod time_details;
pub mod users;

#[cfg(test)]
mod tests;

use crate::config::EtlConfig;
use crate::error::Result;
use crate::models::{CleanOutcome, SourceId};
use crate::schema::TableRules;
use polars::prelude::DataFrame;
use std::collections::HashMap;
use std::sync::Arc;

pub use cards::CardRoutine;
pub use orders::OrderRoutine;
pub use products::ProductRoutine;
pub use stores::StoreRoutine;
pub use time_details::TimeDetailRoutine;
pub use users::UserRoutine;

/// One source's cleaning capability: a pure transformation from the raw
/// record set to a cleaned one plus its report.
pub trait CleaningRoutine: Send + Sync {
    fn source(&self) -> SourceId;

    /// Warehouse table the cleaned output is loaded into.
    fn target_table(&self) -> &'static str {
        self.source().target_table()
    }

    /// The source's fixed column rules (types, natural key, repair policies).
    fn rules(&self) -> TableRules;

    /// Clean a raw record set. Pure: no I/O, no mutation visible outside the
    /// call.
    fn clean(&self, raw: DataFrame) -> Result<CleanOutcome>;
}

/// Registry mapping each source to its cleaning routine.
pub fn registry(config: &EtlConfig) -> HashMap<SourceId, Arc<dyn CleaningRoutine>> {
    let routines: [Arc<dyn CleaningRoutine>; 6] = [
        Arc::new(UserRoutine::new(config.suspect_join_date)),
        Arc::new(CardRoutine),
        Arc::new(StoreRoutine),
        Arc::new(ProductRoutine),
        Arc::new(OrderRoutine),
        Arc::new(TimeDetailRoutine),
    ];
    routines.into_iter().map(|r| (r.source(), r)).collect()
}
