//! Collaborator interfaces for source reads and warehouse writes.
//!
//! The cleaning core never talks to a database, API, or object store
//! directly: it sees a [`SourceReader`] that produces raw record sets and a
//! [`TableWriter`] that replaces a warehouse table's content. Every call
//! through these seams gets an explicit timeout and a bounded retry with
//! backoff, so a dead collaborator surfaces as an error instead of a hang.

pub mod file_store;
pub mod paged;
pub mod warehouse;

pub use file_store::FileStore;
pub use paged::{StorePageFetcher, fetch_all_stores, pages_to_frame};
pub use warehouse::{MemoryWriter, ParquetWarehouse};

use crate::config::IoConfig;
use crate::error::{EtlError, Result};
use crate::models::SourceId;
use async_trait::async_trait;
use polars::prelude::DataFrame;
use std::future::Future;
use tracing::{debug, warn};

/// Produces the raw record set for a named source.
///
/// Fails with [`EtlError::SourceUnavailable`] when the underlying store or
/// API cannot be reached, or [`EtlError::SourceFormat`] when the returned
/// data cannot be parsed into a tabular shape at all. Per-row validity is
/// the cleaning core's business, not the reader's.
#[async_trait]
pub trait SourceReader: Send + Sync {
    async fn read(&self, source: SourceId) -> Result<DataFrame>;
}

/// Persists a cleaned record set, replacing the named table's entire
/// content. There are no partial-table write semantics.
#[async_trait]
pub trait TableWriter: Send + Sync {
    async fn write(&self, table: &str, frame: DataFrame) -> Result<()>;
}

/// Run a collaborator call under the configured timeout, retrying with
/// exponential backoff up to the configured attempt limit.
pub async fn with_retries<T, F, Fut>(operation: &str, io: &IoConfig, mut call: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let attempts = io.retry.max_attempts.max(1);
    let mut last_error: Option<EtlError> = None;

    for attempt in 1..=attempts {
        if attempt > 1 {
            let delay = io.retry.delay_for(attempt - 1);
            debug!(
                "retrying {} (attempt {}/{}) after {:?}",
                operation, attempt, attempts, delay
            );
            tokio::time::sleep(delay).await;
        }
        match tokio::time::timeout(io.timeout(), call()).await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(err)) => {
                warn!("{} failed: {}", operation, err);
                last_error = Some(err);
            }
            Err(_) => {
                warn!("{} timed out after {}s", operation, io.timeout_secs);
                last_error = Some(EtlError::Timeout {
                    operation: operation.to_string(),
                    seconds: io.timeout_secs,
                });
            }
        }
    }

    Err(EtlError::RetriesExhausted {
        operation: operation.to_string(),
        attempts,
        reason: last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unknown".to_string()),
    })
}
