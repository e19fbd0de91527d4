//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_TIMEOUT_SECS;

pub mod commands;

/// Import macOS Screen Time app usage into ActivityWatch
#[derive(Parser, Debug)]
#[command(name = "aw-import-screentime", author, version, about, long_about = None)]
pub struct Cli {
    /// Command to run (default: import)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to knowledgeC.db (default: well-known macOS locations)
    #[arg(long, global = true, env = "SCREENTIME_DB")]
    pub db: Option<PathBuf>,

    /// ActivityWatch server URL (default: http://127.0.0.1:5600)
    #[arg(long, global = true, env = "AW_SERVER_URL")]
    pub server: Option<String>,

    /// Use the aw-server testing port (5666)
    #[arg(long, global = true, env = "AW_TESTING")]
    pub testing: bool,

    /// HTTP request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send Screen Time usage to ActivityWatch (default)
    Import(ImportArgs),

    /// List devices found in the Screen Time database
    Devices,

    /// Show where the Screen Time database is looked up
    Locate,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print version information
    Version,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ImportArgs {
    /// Read and convert events without contacting ActivityWatch
    #[arg(long)]
    pub dry_run: bool,

    /// Ignore usage recorded on this Mac
    #[arg(long)]
    pub skip_local: bool,

    /// Only import this device id (repeatable)
    #[arg(long = "device", value_name = "ID")]
    pub devices: Vec<String>,
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}
