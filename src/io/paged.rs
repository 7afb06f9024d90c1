//! Paginated store fetch and PDF page assembly.
//!
//! The store API serves one store per index; the card document yields one
//! table per PDF page. Both collaborators deliver fragments that get
//! assembled into a single record set here before cleaning.

use crate::error::{EtlError, Result};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use polars::prelude::*;
use tracing::{info, warn};

/// Concurrent in-flight store fetches.
const FETCH_CONCURRENCY: usize = 8;

/// Collaborator serving the store API: a count endpoint plus one fetch per
/// store index.
#[async_trait]
pub trait StorePageFetcher: Send + Sync {
    /// Total number of stores, from the count endpoint.
    async fn total(&self) -> Result<usize>;

    /// Fetch the store at `index` as a JSON object.
    async fn fetch(&self, index: usize) -> Result<serde_json::Value>;
}

/// Fetch every store by index and assemble one record set.
///
/// A non-success response for an individual index is logged and that store
/// is omitted; it never aborts the whole fetch.
pub async fn fetch_all_stores(fetcher: &dyn StorePageFetcher) -> Result<DataFrame> {
    let total = fetcher.total().await?;
    info!("fetching {} stores from the store API", total);

    let rows: Vec<serde_json::Value> = stream::iter(0..total)
        .map(|index| async move {
            match fetcher.fetch(index).await {
                Ok(value) => Some(value),
                Err(err) => {
                    warn!("store {} fetch failed, omitting: {}", index, err);
                    None
                }
            }
        })
        .buffered(FETCH_CONCURRENCY)
        .filter_map(|row| async move { row })
        .collect()
        .await;

    if rows.len() < total {
        warn!("{} of {} stores omitted after fetch failures", total - rows.len(), total);
    }
    rows_to_frame(rows)
}

fn rows_to_frame(rows: Vec<serde_json::Value>) -> Result<DataFrame> {
    if rows.is_empty() {
        return Ok(DataFrame::empty());
    }
    let payload = serde_json::Value::Array(rows).to_string();
    let cursor = std::io::Cursor::new(payload);
    JsonReader::new(cursor)
        .with_json_format(JsonFormat::Json)
        .finish()
        .map_err(|e| EtlError::source_format("store_details", e.to_string()))
}

/// Combine per-page tables from the card document into one frame. Pages may
/// disagree on column order or carry ragged extras, so the concat is
/// diagonal.
pub fn pages_to_frame(pages: Vec<DataFrame>) -> Result<DataFrame> {
    if pages.is_empty() {
        return Ok(DataFrame::empty());
    }
    let frames: Vec<LazyFrame> = pages.into_iter().map(|page| page.lazy()).collect();
    let combined = concat_lf_diagonal(frames, UnionArgs::default())?;
    Ok(combined.collect()?)
}
