//! Pipeline orchestration.
//!
//! Drives each source through read -> clean -> write. Routines are mutually
//! independent, so the pipeline runs them concurrently up to the configured
//! worker limit; each owns its record set outright and nothing is shared or
//! aliased between them. A write happens only after its routine fully
//! completes, so aborting a run discards partial work with no side effect.

use crate::clean::{self, CleaningRoutine};
use crate::config::EtlConfig;
use crate::error::{EtlError, Result};
use crate::io::{SourceReader, TableWriter, with_retries};
use crate::models::{CleanOutcome, RunSummary, SourceId};
use chrono::Utc;
use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::task;
use tracing::{debug, info};

pub struct Pipeline {
    reader: Arc<dyn SourceReader>,
    writer: Arc<dyn TableWriter>,
    config: EtlConfig,
    routines: HashMap<SourceId, Arc<dyn CleaningRoutine>>,
}

impl Pipeline {
    pub fn new(
        reader: Arc<dyn SourceReader>,
        writer: Arc<dyn TableWriter>,
        config: EtlConfig,
    ) -> Self {
        let routines = clean::registry(&config);
        Self {
            reader,
            writer,
            config,
            routines,
        }
    }

    /// Run the given sources concurrently, bounded by the worker limit.
    ///
    /// A source-level failure is fatal to that source's run only; the other
    /// routines are unaffected. Results come back per source for the caller
    /// to report.
    pub async fn run(
        &self,
        sources: &[SourceId],
        progress: Option<&ProgressBar>,
    ) -> Vec<(SourceId, Result<RunSummary>)> {
        info!("starting pipeline run for {} sources", sources.len());

        stream::iter(sources.iter().copied())
            .map(|source| {
                let progress = progress.cloned();
                async move {
                    let result = self.run_source(source).await;
                    if let Some(pb) = &progress {
                        pb.inc(1);
                    }
                    (source, result)
                }
            })
            .buffer_unordered(self.config.workers.max(1))
            .collect()
            .await
    }

    /// Run one source through read -> clean -> write.
    pub async fn run_source(&self, source: SourceId) -> Result<RunSummary> {
        let started_at = Utc::now();
        let start = Instant::now();

        let routine = self
            .routines
            .get(&source)
            .cloned()
            .ok_or_else(|| {
                EtlError::configuration(format!("no cleaning routine registered for '{source}'"))
            })?;

        let read_op = format!("read '{source}'");
        let raw = with_retries(&read_op, &self.config.io, || {
            let reader = Arc::clone(&self.reader);
            async move { reader.read(source).await }
        })
        .await?;
        debug!("read {} raw rows from '{}'", raw.height(), source);

        // Cleaning is pure CPU work on an owned frame.
        let CleanOutcome { frame, report } = task::spawn_blocking(move || routine.clean(raw))
            .await
            .map_err(|e| EtlError::interrupted(e.to_string()))??;

        let table = source.target_table();
        let write_op = format!("write '{table}'");
        with_retries(&write_op, &self.config.io, || {
            let writer = Arc::clone(&self.writer);
            let frame = frame.clone();
            async move { writer.write(table, frame).await }
        })
        .await?;

        info!(
            "loaded {} rows into '{}' ({} dropped, {} flagged)",
            report.rows_out,
            table,
            report.total_dropped(),
            report.flagged
        );

        Ok(RunSummary {
            source,
            table,
            report,
            started_at,
            duration_ms: start.elapsed().as_millis(),
        })
    }
}
