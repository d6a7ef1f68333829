//! CLI argument definitions using clap derive

use crate::cache::BufferPolicy;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// propnet-cache - Cache compiled propositional networks
///
/// Stores networks built from a rule description on disk, keyed by a
/// digest of the description, and repairs them when they are loaded back.
#[derive(Parser, Debug)]
#[command(name = "propnet-cache")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "PROPNET_CACHE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Cache directory (overrides cache.dir)
    #[arg(long, global = true, env = "PROPNET_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the cache key for a description
    Key(KeyArgs),

    /// Store a network in the cache
    Save(SaveArgs),

    /// Load and repair a cached network
    Load(LoadArgs),

    /// Check a network file for unbuffered gate fan-out
    Verify(VerifyArgs),

    /// List cache entries
    List(ListArgs),

    /// Delete all cache entries
    Clear(ClearArgs),

    /// Show or edit configuration
    Config(ConfigArgs),

    /// Print shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

/// Arguments for the key command
#[derive(Parser, Debug)]
pub struct KeyArgs {
    /// Rule description file (s-expressions)
    pub description: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the save command
#[derive(Parser, Debug)]
pub struct SaveArgs {
    /// Rule description file the network was built from
    pub description: PathBuf,

    /// Network JSON file produced by the builder
    pub network: PathBuf,
}

/// Arguments for the load command
#[derive(Parser, Debug)]
pub struct LoadArgs {
    /// Rule description file
    pub description: PathBuf,

    /// Write the repaired network as JSON to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format for the summary
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the verify command
#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Network JSON file
    pub network: PathBuf,

    /// Buffering rule to check against (default: from config)
    #[arg(long)]
    pub policy: Option<PolicyArg>,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the clear command
#[derive(Parser, Debug)]
pub struct ClearArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., cache.digest)
        key: String,
        /// Value to set
        value: String,
    },
}

/// Output format for listings
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}

/// Buffering rule selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Gates feeding two or more gates
    FanOut,
    /// Every gate-to-gate edge
    EveryEdge,
}

impl From<PolicyArg> for BufferPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::FanOut => BufferPolicy::FanOut,
            PolicyArg::EveryEdge => BufferPolicy::EveryEdge,
        }
    }
}
