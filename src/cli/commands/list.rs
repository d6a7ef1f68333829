//! List command - show cache entries on disk

use crate::cache::{CacheEntry, PropNetCache};
use crate::cli::args::{ListArgs, OutputFormat};
use crate::error::PropnetResult;

/// Execute the list command
pub async fn execute(args: ListArgs, cache: &PropNetCache) -> PropnetResult<()> {
    let entries = cache.entries()?;

    if entries.is_empty() && !matches!(args.format, OutputFormat::Json) {
        println!("No cache entries in {}", cache.dir().display());
        return Ok(());
    }

    match args.format {
        OutputFormat::Table => print_entry_table(&entries),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Plain => {
            for entry in &entries {
                println!("{}", entry.name);
            }
        }
    }

    Ok(())
}

fn print_entry_table(entries: &[CacheEntry]) {
    println!("{:<60} {:>10} {:<20}", "ENTRY", "SIZE", "MODIFIED");
    println!("{}", "-".repeat(92));

    for entry in entries {
        let modified = entry
            .modified
            .map(|m| m.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<60} {:>10} {:<20}",
            entry.name,
            format_size(entry.size_bytes),
            modified
        );
    }

    println!();
    println!("Total: {} entry file(s)", entries.len());
}

fn format_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    match bytes {
        b if b >= MIB => format!("{:.1} MiB", b as f64 / MIB as f64),
        b if b >= KIB => format!("{:.1} KiB", b as f64 / KIB as f64),
        b => format!("{} B", b),
    }
}
