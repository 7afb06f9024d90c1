//! Table writers for the target warehouse.
//!
//! Writes are whole-table replace only: the previous content of the named
//! table is gone once the write succeeds, and a failed write leaves nothing
//! half-loaded.

use crate::error::{EtlError, Result};
use crate::io::TableWriter;
use async_trait::async_trait;
use polars::prelude::{DataFrame, ParquetCompression, ParquetWriter as PolarsParquetWriter};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use tokio::task;
use tracing::info;

/// Warehouse backed by one parquet file per table, replaced on every write.
#[derive(Debug, Clone)]
pub struct ParquetWarehouse {
    output_dir: PathBuf,
}

impl ParquetWarehouse {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// The file backing a table.
    pub fn table_path(&self, table: &str) -> PathBuf {
        self.output_dir.join(format!("{table}.parquet"))
    }
}

#[async_trait]
impl TableWriter for ParquetWarehouse {
    async fn write(&self, table: &str, frame: DataFrame) -> Result<()> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| EtlError::write_error(table, e.to_string()))?;

        let path = self.table_path(table);
        let rows = frame.height();
        let table_name = table.to_string();

        task::spawn_blocking(move || -> Result<()> {
            let mut frame = frame;
            let file = std::fs::File::create(&path)
                .map_err(|e| EtlError::write_error(&table_name, e.to_string()))?;
            PolarsParquetWriter::new(file)
                .with_compression(ParquetCompression::Snappy)
                .finish(&mut frame)
                .map_err(|e| EtlError::write_error(&table_name, e.to_string()))?;
            Ok(())
        })
        .await
        .map_err(|e| EtlError::write_error(table, e.to_string()))??;

        info!("replaced table '{}' with {} rows", table, rows);
        Ok(())
    }
}

/// In-memory writer for tests: keeps the last frame written per table.
#[derive(Debug, Default)]
pub struct MemoryWriter {
    tables: Mutex<HashMap<String, DataFrame>>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current content of a table, if it has been written.
    pub fn table(&self, name: &str) -> Option<DataFrame> {
        self.tables.lock().expect("writer lock").get(name).cloned()
    }

    pub fn table_names(&self) -> Vec<String> {
        self.tables.lock().expect("writer lock").keys().cloned().collect()
    }
}

#[async_trait]
impl TableWriter for MemoryWriter {
    async fn write(&self, table: &str, frame: DataFrame) -> Result<()> {
        self.tables
            .lock()
            .expect("writer lock")
            .insert(table.to_string(), frame);
        Ok(())
    }
}
