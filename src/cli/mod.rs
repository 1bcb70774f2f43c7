//! Command Line Interface module
//!
//! Implements the CLI commands and argument parsing for goldtrack.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "goldtrack")]
#[command(about = "Gold price tracker")]
#[command(long_about = "Fetches gold-price series into a date-partitioned JSON store and reads them back")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, default_value = "config.toml")]
    pub config_file: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run an ingestion run: fetch today's payloads and update the store
    Fetch {
        /// Run date override (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// Show the intraday series and statistics for a date
    Day {
        /// Date to show (YYYY-MM-DD)
        date: String,
    },

    /// Show the yearly series and statistics
    Year {
        /// Year to show, defaults to the current year
        year: Option<i32>,
    },

    /// Show the latest price snapshot recorded for a date
    Latest {
        /// Date to show (YYYY-MM-DD)
        date: String,
    },

    /// List dates with available data
    Dates {
        /// Show the previous/next available dates around this date
        #[arg(long)]
        around: Option<String>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Adjust log level based on verbose flag
    pub fn effective_log_level(&self) -> String {
        if self.verbose {
            "debug".to_string()
        } else {
            self.log_level.clone()
        }
    }
}
