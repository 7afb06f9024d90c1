//! Core data structures for the retail ETL pipeline.
//!
//! Defines the source identifiers, the per-routine cleaning report, and the
//! per-run summary returned by the pipeline.

use crate::constants::tables;
use chrono::{DateTime, Utc};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The six record sources feeding the warehouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceId {
    /// Legacy user table in the upstream relational store.
    LegacyUsers,
    /// Card details embedded in a published PDF document.
    CardDetails,
    /// Store details served by a paginated REST API.
    StoreDetails,
    /// Products CSV file in object storage.
    Products,
    /// Denormalized orders table in the upstream relational store.
    Orders,
    /// Date details JSON file in object storage.
    DateDetails,
}

impl SourceId {
    /// All sources in their conventional load order.
    pub fn all() -> [SourceId; 6] {
        [
            SourceId::LegacyUsers,
            SourceId::CardDetails,
            SourceId::StoreDetails,
            SourceId::Products,
            SourceId::Orders,
            SourceId::DateDetails,
        ]
    }

    /// Stable identifier used in logs, config, and the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceId::LegacyUsers => "legacy_users",
            SourceId::CardDetails => "card_details",
            SourceId::StoreDetails => "store_details",
            SourceId::Products => "products",
            SourceId::Orders => "orders",
            SourceId::DateDetails => "date_details",
        }
    }

    /// Warehouse table the cleaned record set is loaded into.
    pub fn target_table(&self) -> &'static str {
        match self {
            SourceId::LegacyUsers => tables::DIM_USERS,
            SourceId::CardDetails => tables::DIM_CARD_DETAILS,
            SourceId::StoreDetails => tables::DIM_STORE_DETAILS,
            SourceId::Products => tables::DIM_PRODUCTS,
            SourceId::Orders => tables::ORDERS_TABLE,
            SourceId::DateDetails => tables::DIM_DATE_TIMES,
        }
    }

    /// Parse a source identifier as written in config or on the command line.
    pub fn parse(name: &str) -> Option<SourceId> {
        // Table names are accepted as aliases, people reach for either.
        Self::all()
            .into_iter()
            .find(|s| s.as_str() == name || s.target_table() == name)
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rows removed at one named validation stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageCount {
    pub stage: &'static str,
    pub dropped: usize,
}

/// Structured observability result returned beside every cleaned record set.
///
/// Counts are collected by the routine as it runs; logging and the CLI
/// consume the report, the core never prints.
#[derive(Debug, Clone, PartialEq)]
pub struct CleaningReport {
    pub source: SourceId,
    /// Rows in the raw record set as read.
    pub rows_in: usize,
    /// Rows in the cleaned record set.
    pub rows_out: usize,
    /// Per-stage drop counts, in pipeline order.
    pub stages: Vec<StageCount>,
    /// Rows kept but annotated under the flag policy.
    pub flagged: usize,
    /// Weight values whose unit token was not recognised and passed through
    /// unconverted.
    pub unrecognised_units: usize,
}

impl CleaningReport {
    pub fn new(source: SourceId, rows_in: usize) -> Self {
        Self {
            source,
            rows_in,
            rows_out: rows_in,
            stages: Vec::new(),
            flagged: 0,
            unrecognised_units: 0,
        }
    }

    /// Record rows dropped at a named stage.
    pub fn record_drop(&mut self, stage: &'static str, dropped: usize) {
        self.stages.push(StageCount { stage, dropped });
    }

    /// Total rows dropped across all stages.
    pub fn total_dropped(&self) -> usize {
        self.stages.iter().map(|s| s.dropped).sum()
    }

    /// One-line summary for logging.
    pub fn summary(&self) -> String {
        format!(
            "{}: {} -> {} rows ({} dropped, {} flagged)",
            self.source,
            self.rows_in,
            self.rows_out,
            self.total_dropped(),
            self.flagged
        )
    }
}

/// A cleaned record set together with its report.
#[derive(Debug, Clone)]
pub struct CleanOutcome {
    pub frame: DataFrame,
    pub report: CleaningReport,
}

/// Outcome of one source's read -> clean -> write run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub source: SourceId,
    pub table: &'static str,
    pub report: CleaningReport,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u128,
}

impl RunSummary {
    pub fn rows_loaded(&self) -> usize {
        self.report.rows_out
    }
}
