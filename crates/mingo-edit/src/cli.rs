use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mingo-edit")]
#[command(about = "Format, check and run Mingo programs")]
#[command(version)]
pub struct Cli {
    /// Configuration file (missing file means defaults)
    #[arg(short, long, value_name = "PATH", default_value = "mingo.yaml")]
    pub config: PathBuf,

    /// Workspace root; oracle binaries are looked up relative to it
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Reformat a source file
    Fmt {
        /// Source file
        file: PathBuf,
        /// Rewrite the file instead of printing
        #[arg(short, long)]
        write: bool,
    },
    /// Report diagnostics from the diagnostics oracle
    Check {
        /// Source file
        file: PathBuf,
        /// Apply quick fixes and rewrite the file
        #[arg(long)]
        fix: bool,
        /// Give up waiting for the oracle after this many milliseconds
        #[arg(long, value_name = "MS", default_value_t = 5000)]
        timeout_ms: u64,
    },
    /// Run a program through the execution oracle
    Run {
        /// Source file
        file: PathBuf,
    },
    /// Show the workspace file tree
    Tree {
        /// Print the tree as JSON
        #[arg(long)]
        json: bool,
    },
    /// List bundled examples, or print one
    Examples {
        /// Example to print
        name: Option<String>,
    },
    /// Print completion candidates for a source file
    Complete {
        /// Source file
        file: PathBuf,
        /// Only items starting with this prefix
        #[arg(short, long, default_value = "")]
        prefix: String,
    },
}
