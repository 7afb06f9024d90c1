//! File-backed source reader.
//!
//! Reads local source dumps (CSV and JSON) from a data directory. Used for
//! local runs and tests; the production readers for the relational store,
//! the PDF document, and the store API sit behind the same [`SourceReader`]
//! seam.

use crate::error::{EtlError, Result};
use crate::io::SourceReader;
use crate::models::SourceId;
use async_trait::async_trait;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tokio::task;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The dump file backing a source: `<source_id>.json` for the date
    /// details, `<source_id>.csv` for everything else.
    pub fn path_for(&self, source: SourceId) -> PathBuf {
        let extension = match source {
            SourceId::DateDetails => "json",
            _ => "csv",
        };
        self.data_dir
            .join(format!("{}.{}", source.as_str(), extension))
    }
}

#[async_trait]
impl SourceReader for FileStore {
    async fn read(&self, source: SourceId) -> Result<DataFrame> {
        let path = self.path_for(source);
        if !path.exists() {
            return Err(EtlError::source_unavailable(
                source.as_str(),
                format!("no dump at {}", path.display()),
            ));
        }

        debug!("reading {} from {}", source, path.display());
        let frame = task::spawn_blocking(move || read_table(&path))
            .await
            .map_err(|e| EtlError::source_unavailable(source.as_str(), e.to_string()))?
            .map_err(|e| EtlError::source_format(source.as_str(), e.to_string()))?;

        Ok(frame)
    }
}

/// Read a dump as an all-text frame, leaving every type decision to the
/// cleaning routines.
fn read_table(path: &Path) -> PolarsResult<DataFrame> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => {
            let file = std::fs::File::open(path)?;
            JsonReader::new(file)
                .with_json_format(JsonFormat::Json)
                .finish()
        }
        _ => {
            CsvReadOptions::default()
                .with_has_header(true)
                // infer nothing: every column comes back as text
                .with_infer_schema_length(Some(0))
                .try_into_reader_with_file_path(Some(path.to_path_buf()))?
                .finish()
        }
    }
}
