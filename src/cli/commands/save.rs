//! Save command - store an externally built network

use super::read_network;
use crate::cache::PropNetCache;
use crate::cli::args::SaveArgs;
use crate::description::Description;
use crate::error::PropnetResult;
use crate::ui::{self, Mark, OutputMode};

/// Execute the save command
pub async fn execute(args: SaveArgs, cache: &PropNetCache) -> PropnetResult<()> {
    let mode = OutputMode::detect();

    if !cache.is_enabled() {
        ui::status(
            mode,
            Mark::Warn,
            "Cache is disabled, nothing saved",
            Some("run: propnet-cache config set cache.enabled true"),
        );
        return Ok(());
    }

    let description = Description::from_file(&args.description)?;
    let network = read_network(&args.network).await?;

    cache.try_save(&description, &network)?;

    let path = cache.entry_path(&description)?;
    ui::status(
        mode,
        Mark::Ok,
        &format!("Saved network with {} components", network.len()),
        Some(&path.display().to_string()),
    );
    Ok(())
}
