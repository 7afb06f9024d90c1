//! Error handling for the retail ETL pipeline.
//!
//! Provides error types for collaborator failures (source reads, warehouse
//! writes) and configuration problems, with a crate-wide `Result` alias.
//! Row-level defects are not errors: they are resolved by the per-column
//! repair policy and reported through [`crate::models::CleaningReport`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("source '{source_id}' unavailable: {reason}")]
    SourceUnavailable { source_id: String, reason: String },

    #[error("source '{source_id}' returned data that is not tabular: {reason}")]
    SourceFormat { source_id: String, reason: String },

    #[error("write to table '{table}' failed: {reason}")]
    WriteError { table: String, reason: String },

    #[error("source '{source_id}' is missing expected column '{column}'")]
    MissingColumn { source_id: String, column: String },

    #[error("{operation} timed out after {seconds}s")]
    Timeout { operation: String, seconds: u64 },

    #[error("{operation} failed after {attempts} attempts: {reason}")]
    RetriesExhausted {
        operation: String,
        attempts: u32,
        reason: String,
    },

    #[error("configuration error: {message}")]
    Configuration { message: String },

    #[error("run interrupted: {reason}")]
    Interrupted { reason: String },
}

impl EtlError {
    /// Create a source-unavailable error with context.
    pub fn source_unavailable(source_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            source_id: source_id.into(),
            reason: reason.into(),
        }
    }

    /// Create a source-format error with context.
    pub fn source_format(source_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceFormat {
            source_id: source_id.into(),
            reason: reason.into(),
        }
    }

    /// Create a write error with context.
    pub fn write_error(table: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::WriteError {
            table: table.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing-column error.
    pub fn missing_column(source_id: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            source_id: source_id.into(),
            column: column.into(),
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an interrupted error.
    pub fn interrupted(reason: impl Into<String>) -> Self {
        Self::Interrupted {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
