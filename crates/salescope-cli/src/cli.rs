//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Salescope: clean and summarize sales data for one country
#[derive(Parser)]
#[command(name = "salescope")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the countries present in a data file
    Countries {
        /// Path to the data file (CSV/TSV/XLSX)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Parser and cleaning configuration (JSON)
        #[arg(long, value_name = "JSON")]
        config: Option<PathBuf>,
    },

    /// Clean one country's rows and write the snapshot
    Clean {
        /// Path to the data file (CSV/TSV/XLSX)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Country to keep
        #[arg(short, long)]
        country: String,

        /// JSON object of city to postal range, replacing the built-in table
        #[arg(long, value_name = "JSON")]
        postal_codes: Option<PathBuf>,

        /// Directory for Updated_<country>_data.csv (default: current directory)
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Parser and cleaning configuration (JSON)
        #[arg(long, value_name = "JSON")]
        config: Option<PathBuf>,

        /// Don't write the cleaned snapshot
        #[arg(long)]
        no_snapshot: bool,
    },

    /// Clean one country's rows and show the aggregate tables
    Report {
        /// Path to the data file (CSV/TSV/XLSX)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Country to keep
        #[arg(short, long)]
        country: String,

        /// Print the report as JSON instead of tables
        #[arg(long)]
        json: bool,

        /// Save the JSON report to a file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Rows shown per table
        #[arg(long, default_value = "10")]
        top: usize,

        /// JSON object of city to postal range, replacing the built-in table
        #[arg(long, value_name = "JSON")]
        postal_codes: Option<PathBuf>,

        /// Parser and cleaning configuration (JSON)
        #[arg(long, value_name = "JSON")]
        config: Option<PathBuf>,
    },
}
