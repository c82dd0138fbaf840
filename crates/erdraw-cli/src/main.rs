//! erdraw CLI entry point.

use std::{io, process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, info};

use erdraw_cli::{Args, error_adapter::write_reports};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting erdraw");
    debug!(args:?; "Parsed arguments");

    if let Err(err) = erdraw_cli::run(&args) {
        debug!(err:% = err; "Diagram generation failed");

        // Written to stderr directly, independent of the log filter
        if let Err(write_err) = write_reports(&err, &mut io::stderr().lock()) {
            eprintln!("{err} (could not render report: {write_err})");
        }

        process::exit(1);
    }

    info!("Completed successfully");
}
