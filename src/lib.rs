//! Retail ETL Library
//!
//! A Rust library for extracting multinational retail sales records from
//! heterogeneous sources, cleaning each record set per its source's rules,
//! and loading the results into a star-schema warehouse.
//!
//! This library provides tools for:
//! - Normalizing raw column values to canonical semantic types
//! - Detecting and dropping structurally invalid rows, or flagging
//!   logically-suspect ones without removing them
//! - Deduplicating records by natural key, keeping the first occurrence
//! - Parsing free-text weight expressions into kilograms
//! - Orchestrating the six per-source cleaning routines behind collaborator
//!   seams for source reads and warehouse writes

pub mod clean;
pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod schema;

pub mod cli;

// Re-export commonly used types
pub use config::{EtlConfig, SuspectDatePolicy};
pub use error::{EtlError, Result};
pub use models::{CleanOutcome, CleaningReport, RunSummary, SourceId};
pub use pipeline::Pipeline;
