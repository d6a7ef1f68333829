//! Clear command - delete cache entries on explicit request

use crate::cache::PropNetCache;
use crate::cli::args::ClearArgs;
use crate::error::PropnetResult;
use crate::ui::{self, Mark, OutputMode};
use console::style;

/// Execute the clear command
pub async fn execute(args: ClearArgs, cache: &PropNetCache) -> PropnetResult<()> {
    let mode = OutputMode::detect();
    let entries = cache.entries()?;

    if entries.is_empty() {
        println!("No cache entries to clear.");
        return Ok(());
    }

    println!("This will remove {} cache entry file(s):", entries.len());
    for entry in &entries {
        println!("  {} {}", style("•").red(), entry.name);
    }
    println!();

    if !ui::approve_removal(mode, entries.len(), args.yes).await? {
        ui::status(
            mode,
            Mark::Note,
            "Nothing removed",
            Some("pass --yes to clear without a prompt"),
        );
        return Ok(());
    }

    let removed = cache.clear()?;
    ui::status(mode, Mark::Ok, &format!("Cleared {} cache entries", removed), None);
    Ok(())
}
