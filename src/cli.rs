use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use vodforge::recipes::Recipe;

#[derive(Parser)]
#[command(name = "vodforge")]
#[command(
    author,
    version,
    about = "VOD encoding and packaging automation for the Bitmovin platform"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create, start and wait for an encoding workflow
    Run {
        /// Workflow to execute
        #[arg(value_enum)]
        recipe: Recipe,
    },

    /// Print the current status of an encoding or manifest
    Status {
        #[arg(value_enum)]
        kind: TaskKind,

        /// Resource id
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Poll an encoding or manifest until it finishes
    Wait {
        #[arg(value_enum)]
        kind: TaskKind,

        /// Resource id
        id: String,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default locations if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TaskKind {
    Encoding,
    Dash,
    Hls,
}
