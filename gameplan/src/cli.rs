// gameplan/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gameplan")]
#[command(about = "Taxonomy consistency & validation engine for game plan uploads", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ✅ Validates game plan CSV uploads against the reference data
    Validate {
        /// Reference snapshot (.json, .yaml, .yml)
        #[arg(long, short, env = "GAMEPLAN_REFERENCE")]
        reference: PathBuf,

        /// CSV file, or a directory scanned recursively for *.csv
        #[arg(long, short)]
        input: PathBuf,

        /// Directory holding gameplan.yaml
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Max issues listed per file (overrides report_limit)
        #[arg(long)]
        limit: Option<usize>,

        /// Output format: table | json
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Also write the JSON report to this file
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// 🔍 Shows reference graph counts and data-quality diagnostics
    Inspect {
        /// Reference snapshot (.json, .yaml, .yml)
        #[arg(long, short, env = "GAMEPLAN_REFERENCE")]
        reference: PathBuf,

        /// Exit with error if the snapshot has anomalies
        #[arg(long)]
        check: bool,
    },
}
