//! Command-line argument definitions for the erdraw CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. The diagram itself takes no input: the schema is built in
//! and the output path comes from configuration.

use clap::Parser;

/// Command-line arguments for the erdraw diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["erdraw"]);

        assert_eq!(args.config, None);
        assert_eq!(args.log_level, "warn");
    }

    #[test]
    fn test_explicit_values() {
        let args = Args::parse_from(["erdraw", "-c", "erd.toml", "--log-level", "debug"]);

        assert_eq!(args.config.as_deref(), Some("erd.toml"));
        assert_eq!(args.log_level, "debug");
    }

    #[test]
    fn test_positional_arguments_are_rejected() {
        assert!(Args::try_parse_from(["erdraw", "schema.txt"]).is_err());
    }
}
