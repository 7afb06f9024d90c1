//! Command implementations for the retail ETL CLI.

use crate::cli::args::{Args, Commands, RunArgs};
use crate::error::{EtlError, Result};
use crate::io::{FileStore, ParquetWarehouse};
use crate::models::{RunSummary, SourceId};
use crate::pipeline::Pipeline;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Main command dispatcher.
pub async fn run(args: Args, cancel: CancellationToken) -> Result<()> {
    match args.command {
        Some(Commands::Run(run_args)) => run_pipeline(run_args, cancel).await,
        Some(Commands::Tables) => {
            list_tables();
            Ok(())
        }
        None => Ok(()),
    }
}

/// Print the source-to-table mapping.
fn list_tables() {
    println!("{}", "Sources and warehouse tables".bright_green().bold());
    for source in SourceId::all() {
        println!(
            "  {:<16} {} {}",
            source.as_str().bright_cyan(),
            "->".dimmed(),
            source.target_table().bright_white()
        );
    }
}

/// Run the pipeline for the selected sources and report the outcome.
async fn run_pipeline(args: RunArgs, cancel: CancellationToken) -> Result<()> {
    setup_logging(args.verbose)?;

    let start = Instant::now();
    let config = args.to_config();
    let sources = args.selected_sources()?;
    debug!("run configuration: {:?}", config);
    info!(
        "processing {} sources: {:?}",
        sources.len(),
        sources.iter().map(|s| s.as_str()).collect::<Vec<_>>()
    );

    let reader = Arc::new(FileStore::new(&config.data_dir));
    let writer = Arc::new(ParquetWarehouse::new(&config.output_dir));
    let pipeline = Pipeline::new(reader, writer, config);

    let progress = if args.quiet {
        None
    } else {
        let pb = ProgressBar::new(sources.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.set_message("Cleaning and loading...");
        Some(pb)
    };

    let results = tokio::select! {
        results = pipeline.run(&sources, progress.as_ref()) => results,
        _ = cancel.cancelled() => {
            return Err(EtlError::interrupted("cancelled before completion, nothing written for in-flight sources"));
        }
    };

    if let Some(pb) = progress {
        pb.finish_with_message("Run complete");
    }

    report_results(&results, start.elapsed().as_millis());

    let failures = results.iter().filter(|(_, r)| r.is_err()).count();
    if failures > 0 {
        return Err(EtlError::configuration(format!(
            "{failures} of {} sources failed",
            results.len()
        )));
    }
    Ok(())
}

/// Print the per-source run summary table.
fn report_results(results: &[(SourceId, Result<RunSummary>)], elapsed_ms: u128) {
    println!("\n{}", "Run Summary".bright_green().bold());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        elapsed_ms.to_string().bright_white()
    );

    for (source, result) in results {
        match result {
            Ok(summary) => {
                let report = &summary.report;
                println!(
                    "  {} {} -> {}: {} of {} rows loaded ({} dropped, {} flagged)",
                    "ok".bright_green(),
                    source.as_str().bright_cyan(),
                    summary.table.bright_white(),
                    report.rows_out.to_string().bright_white().bold(),
                    report.rows_in,
                    report.total_dropped(),
                    report.flagged
                );
                for stage in &report.stages {
                    if stage.dropped > 0 {
                        println!(
                            "      {} {} rows: {}",
                            "dropped".dimmed(),
                            stage.dropped,
                            stage.stage
                        );
                    }
                }
                if report.unrecognised_units > 0 {
                    println!(
                        "      {} {} weights kept with unrecognised units",
                        "note".dimmed(),
                        report.unrecognised_units
                    );
                }
            }
            Err(error) => {
                println!(
                    "  {} {}: {}",
                    "failed".bright_red().bold(),
                    source.as_str().bright_cyan(),
                    error
                );
            }
        }
    }
}

/// Initialise tracing with a verbosity-derived filter. `RUST_LOG` wins when
/// set.
fn setup_logging(verbose: u8) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let default_level = match verbose {
        0 => "retail_etl=info",
        1 => "retail_etl=debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .try_init()
        .map_err(|e| EtlError::configuration(format!("failed to initialise logging: {e}")))?;

    Ok(())
}
