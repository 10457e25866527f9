use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cyco", author, version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    /// TOML configuration file; command-line flags take precedence
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rewrite a simulation case with its co-simulation interface
    Run {
        /// Directory holding the JOBS file and the files it references
        #[arg(long, value_hint = ValueHint::DirPath)]
        dynawo_dir: Option<PathBuf>,

        /// Directory holding the federate descriptor (.xml or .json)
        #[arg(long, value_hint = ValueHint::DirPath)]
        helics_dir: Option<PathBuf>,

        /// JOBS file name inside the Dynawo directory (default: first .jobs file)
        #[arg(long)]
        jobs: Option<String>,

        /// Output directory (default: <dynawo dir>/serialized)
        #[arg(short, long, value_hint = ValueHint::DirPath)]
        output: Option<PathBuf>,

        /// Name given to the power-system federate
        #[arg(long)]
        federate_name: Option<String>,

        /// Parse and synthesize, but write nothing
        #[arg(long)]
        dry_run: bool,
    },
    /// Parse one file and write it back through the mapper
    Convert {
        /// Input file; its extension selects the format
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,

        /// Output file, same format as the input
        #[arg(value_hint = ValueHint::FilePath)]
        output: PathBuf,
    },
}
