//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "shunt", version, about = "Multi-range current sense resistor planner")]
pub struct Cli {
    /// Path to config TOML (typed); built-in defaults when omitted
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print JSON instead of tables and log as JSON lines
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Select resistors and print the range table
    Plan {
        /// Exit with code 3 unless every range is valid and the span is covered
        #[arg(long, action = ArgAction::SetTrue)]
        strict: bool,
    },
    /// Write the plan as a versioned JSON document
    Export {
        /// Output file
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },
    /// Re-import an exported document and verify it
    Check {
        /// Previously exported JSON document
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Exit with code 3 unless the imported plan is complete
        #[arg(long, action = ArgAction::SetTrue)]
        strict: bool,
    },
    /// List catalog resistances and tolerance grades
    Catalog,
}
