use clap::Parser;
use retail_etl::cli::{args::Args, commands};
use std::process;
use tokio_util::sync::CancellationToken;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Coordinate graceful shutdown: aborting discards in-flight record
        // sets, writes only ever happen after a routine fully completes.
        let cancellation_token = CancellationToken::new();

        let shutdown_signal = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install CTRL+C signal handler");
            cancellation_token.cancel();
        };

        tokio::select! {
            result = commands::run(args, cancellation_token.clone()) => {
                result
            }
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                Err(retail_etl::EtlError::interrupted(
                    "run interrupted by user".to_string()
                ))
            }
        }
    });

    match result {
        Ok(()) => {
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information when no subcommand is provided.
fn show_help_and_commands() {
    println!("Retail ETL - Multinational Retail Warehouse Loader");
    println!("==================================================");
    println!();
    println!("Extract retail sales records from their sources, clean each record set");
    println!("per its source's rules, and load the results into the warehouse.");
    println!();
    println!("USAGE:");
    println!("    retail-etl <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    run         Extract, clean, and load sources into the warehouse");
    println!("    tables      List the sources and their warehouse target tables");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Process all six sources:");
    println!("    retail-etl run --data ./data --output ./warehouse");
    println!();
    println!("    # Process selected sources only:");
    println!("    retail-etl run --sources dim_users,dim_card_details");
    println!();
    println!("For detailed help on any command, use:");
    println!("    retail-etl <COMMAND> --help");
}
