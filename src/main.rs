//! propnet-cache CLI entry point
//!
//! Loads configuration, sets up logging and dispatches to subcommands.

use clap::Parser;
use console::style;
use propnet_cache::cache::PropNetCache;
use propnet_cache::cli::{Cli, Commands};
use propnet_cache::config::ConfigManager;
use propnet_cache::error::PropnetResult;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> PropnetResult<()> {
    let cli = Cli::parse();

    // Completions need neither config nor logging
    if let Commands::Completions { shell } = cli.command {
        return propnet_cache::cli::commands::completions(shell);
    }

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load().await?;

    init_logging(cli.verbose, &config.general.log_format);

    let cache = PropNetCache::from_config(&config, cli.cache_dir.as_deref());

    match cli.command {
        Commands::Completions { .. } => unreachable!("Completions handled above"),
        Commands::Key(args) => propnet_cache::cli::commands::key(args, &cache).await,
        Commands::Save(args) => propnet_cache::cli::commands::save(args, &cache).await,
        Commands::Load(args) => propnet_cache::cli::commands::load(args, &cache).await,
        Commands::Verify(args) => propnet_cache::cli::commands::verify(args, &config).await,
        Commands::List(args) => propnet_cache::cli::commands::list(args, &cache).await,
        Commands::Clear(args) => propnet_cache::cli::commands::clear(args, &cache).await,
        Commands::Config(args) => {
            propnet_cache::cli::commands::config(args, &config, &config_manager).await
        }
    }
}

/// Logging: 0 = warn, 1 = info, 2+ = debug; JSON lines when configured
fn init_logging(verbose: u8, format: &str) {
    let filter = match verbose {
        0 => EnvFilter::new("propnet_cache=warn"),
        1 => EnvFilter::new("propnet_cache=info"),
        _ => EnvFilter::new("propnet_cache=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if format == "json" {
        builder.json().init();
    } else {
        builder.without_time().init();
    }
}
