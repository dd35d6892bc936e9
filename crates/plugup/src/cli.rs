//! CLI definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Checks GitHub-hosted WordPress plugins for newer releases.
#[derive(Debug, Parser)]
#[command(name = "plugup")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file to use instead of the platform default
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Merge available updates into an update_plugins transient
    Check(CheckArgs),

    /// Report the update status of every configured plugin
    Scan(ScanArgs),

    /// List configured plugins and where their metadata is read from
    Plugins,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Transient JSON to read (stdin when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Where to write the merged transient (stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// JSON object mapping plugin slugs to installed versions
    #[arg(long, value_name = "FILE")]
    pub installed: PathBuf,

    /// Print the full report as JSON
    #[arg(long)]
    pub json: bool,
}
