use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "typeahead")]
#[command(about = "typeahead - Frequency ranked phrase completion with abbreviation matching.")]
#[command(version = env!("VERSION"))]
pub struct Cli {
    /// Path to one or more config files (merged in order).
    #[arg(long, default_value = "config.toml", action = clap::ArgAction::Append)]
    pub config: Vec<PathBuf>,

    /// Path to the tab-delimited frequency file. Overrides `app.corpus` in the config.
    #[arg(long)]
    pub corpus: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a sample config file.
    NewConfig {
        /// Output path for config file.
        #[arg(short, long, default_value = "config.toml")]
        path: PathBuf,
    },

    /// Print completions for an input, or for every line read from stdin.
    Complete {
        /// Maximum number of completions to print. 0 prints all of them.
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Partial input to complete. Reads lines from stdin if not given.
        input: Option<String>,
    },
}
