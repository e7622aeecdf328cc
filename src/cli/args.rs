//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::application::services::AggregationStrategy;

/// Count symbol frequencies in parallel and print the Huffman code table
#[derive(Parser, Debug)]
#[command(name = "parhuff")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Explicit config file (TOML)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub input: InputArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Where the text comes from and how it is counted.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Read text from file
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Use this text directly
    #[arg(long, global = true)]
    pub text: Option<String>,

    /// Number of workers (positive integer)
    #[arg(short = 't', long = "tasks", visible_alias = "threads", global = true, allow_hyphen_values = true)]
    pub tasks: Option<String>,

    /// Suppress code table and status messages
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// How workers combine their counts
    #[arg(long, value_enum, global = true)]
    pub strategy: Option<AggregationStrategy>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the code table: symbol, frequency, code (default)
    Codes,

    /// Print symbol frequencies only
    Freq,

    /// Show the Huffman tree structure
    Tree,

    /// Show effective settings
    Config,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
