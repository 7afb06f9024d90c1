//! Command-line argument definitions for the retail ETL tool.

use crate::config::{EtlConfig, SuspectDatePolicy};
use crate::error::{EtlError, Result};
use crate::models::SourceId;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the retail warehouse ETL tool.
///
/// Extracts retail sales records from their sources, cleans each record set
/// per its source's rules, and loads the results into the star-schema
/// warehouse.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "retail-etl",
    version,
    about = "Extract, clean, and load multinational retail sales data into a star-schema warehouse",
    long_about = "Processes the six retail record sources (users, cards, stores, products, orders, \
                  date details) through per-source cleaning rules and loads the cleaned tables \
                  into the warehouse. Each source reports its input rows, per-stage drop counts, \
                  and final row count."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Extract, clean, and load sources into the warehouse
    Run(RunArgs),
    /// List the sources and their warehouse target tables
    Tables,
}

/// Arguments for the run command.
#[derive(Debug, Clone, Parser)]
pub struct RunArgs {
    /// Directory holding the local source dumps
    #[arg(short = 'd', long = "data", value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Directory the warehouse tables are written to
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output_dir: Option<PathBuf>,

    /// Comma-separated list of sources to process (default: all six)
    ///
    /// Source names and table names are both accepted, e.g.
    /// `legacy_users,card_details` or `dim_users,dim_card_details`.
    #[arg(short = 's', long = "sources", value_name = "LIST")]
    pub sources: Option<String>,

    /// Maximum cleaning routines run concurrently
    #[arg(long = "workers", value_name = "N")]
    pub workers: Option<usize>,

    /// Per-call timeout in seconds for source reads and table writes
    #[arg(long = "timeout", value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Drop user rows whose join date precedes the date of birth instead of
    /// flagging them
    #[arg(long = "drop-suspect-join-dates")]
    pub drop_suspect_join_dates: bool,

    /// Increase logging verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress output
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl RunArgs {
    /// The sources selected for this run, in their conventional load order.
    pub fn selected_sources(&self) -> Result<Vec<SourceId>> {
        let Some(list) = &self.sources else {
            return Ok(SourceId::all().to_vec());
        };
        let mut selected = Vec::new();
        for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let source = SourceId::parse(name).ok_or_else(|| {
                EtlError::configuration(format!(
                    "unknown source '{}'; expected one of: {}",
                    name,
                    SourceId::all().map(|s| s.as_str()).join(", ")
                ))
            })?;
            if !selected.contains(&source) {
                selected.push(source);
            }
        }
        if selected.is_empty() {
            return Err(EtlError::configuration("no sources selected"));
        }
        Ok(selected)
    }

    /// Build the run configuration from defaults plus CLI overrides.
    pub fn to_config(&self) -> EtlConfig {
        let mut config = EtlConfig::default();
        if let Some(dir) = &self.data_dir {
            config = config.with_data_dir(dir);
        }
        if let Some(dir) = &self.output_dir {
            config = config.with_output_dir(dir);
        }
        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout_secs(secs);
        }
        if self.drop_suspect_join_dates {
            config = config.with_suspect_join_date(SuspectDatePolicy::Drop);
        }
        config
    }
}
