//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};

use crate::domain::DuplicatePolicy;

/// Convert `tree` command listings into nested JSON
#[derive(Parser, Debug)]
#[command(name = "tree2json")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Project directory holding .tree2json.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a listing and print it as JSON
    Convert {
        #[command(flatten)]
        input: InputArgs,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,

        /// Write output to file instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,

        /// On failure, print {"error": "..."} to stdout
        #[arg(long)]
        error_json: bool,
    },

    /// Parse a listing and print it back as canonical tree text
    Render {
        #[command(flatten)]
        input: InputArgs,

        /// Write output to file instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Options shared by commands reading a listing.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// File path, "-" for stdin, or http(s) URL (default: `source` setting)
    #[arg(value_hint = ValueHint::AnyPath)]
    pub source: Option<String>,

    /// Source encoding ("auto", "utf-8", "cp950", "big5", ...)
    #[arg(short, long)]
    pub encoding: Option<String>,

    /// Keep ASCII tree art as-is
    #[arg(long)]
    pub no_normalize: bool,

    /// Handling of repeated sibling names
    #[arg(long, value_enum)]
    pub duplicates: Option<DuplicateArg>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateArg {
    Overwrite,
    Merge,
    Reject,
}

impl From<DuplicateArg> for DuplicatePolicy {
    fn from(arg: DuplicateArg) -> Self {
        match arg {
            DuplicateArg::Overwrite => DuplicatePolicy::Overwrite,
            DuplicateArg::Merge => DuplicatePolicy::Merge,
            DuplicateArg::Reject => DuplicatePolicy::Reject,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
