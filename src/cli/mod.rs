pub mod format;
pub mod toml_config;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hilite", version, about = "Test and validate chat highlight rules")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate a rule file against sample text and print the match report
    Test {
        /// Sample text to match against
        sample: Option<String>,

        /// Read the sample text from a file instead
        #[arg(long, conflicts_with = "sample")]
        sample_file: Option<PathBuf>,

        /// Path to the rules file
        #[arg(short, long, default_value = "hilite.toml")]
        rules: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
    /// Check that every enabled regex rule compiles (the commit gate)
    Check {
        /// Path to the rules file
        #[arg(short, long, default_value = "hilite.toml")]
        rules: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
}
