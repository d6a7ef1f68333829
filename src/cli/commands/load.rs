//! Load command - fetch and repair a cached network

use crate::cache::{CacheLookup, PropNetCache};
use crate::cli::args::{LoadArgs, OutputFormat};
use crate::description::Description;
use crate::error::{PropnetError, PropnetResult};
use crate::network::NetworkStats;
use crate::ui::{self, OutputMode};
use tokio::fs;

/// Execute the load command
pub async fn execute(args: LoadArgs, cache: &PropNetCache) -> PropnetResult<()> {
    let description = Description::from_file(&args.description)?;

    let network = match cache.lookup(&description) {
        CacheLookup::Hit(network) => network,
        CacheLookup::Miss(reason) => {
            return Err(PropnetError::User(format!("Cache miss: {}", reason)));
        }
    };

    if let Some(ref output) = args.output {
        let json = serde_json::to_string_pretty(&network)?;
        fs::write(output, json)
            .await
            .map_err(|e| PropnetError::io(format!("writing network to {}", output.display()), e))?;
    }

    let stats = network.stats();
    match args.format {
        OutputFormat::Table => print_stats_table(&stats),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Plain => println!("{} {}", stats.components, stats.edges),
    }

    Ok(())
}

fn print_stats_table(stats: &NetworkStats) {
    let mut rows = vec![
        ("roles", stats.roles.join(", ")),
        ("components", stats.components.to_string()),
        ("edges", stats.edges.to_string()),
    ];
    rows.extend(stats.kinds.iter().map(|(kind, count)| (*kind, count.to_string())));
    ui::fields(OutputMode::detect(), "Loaded network", &rows);
}
