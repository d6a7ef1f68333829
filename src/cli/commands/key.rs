//! Key command - show the cache entry a description maps to

use crate::cache::PropNetCache;
use crate::cli::args::{KeyArgs, OutputFormat};
use crate::description::Description;
use crate::error::PropnetResult;
use crate::ui::{self, OutputMode};

/// Execute the key command
pub async fn execute(args: KeyArgs, cache: &PropNetCache) -> PropnetResult<()> {
    let description = Description::from_file(&args.description)?;
    let key = cache.key(&description)?;
    let path = cache.dir().join(key.file_name());
    let cached = path.exists();

    match args.format {
        OutputFormat::Table => ui::fields(
            OutputMode::detect(),
            "Cache key",
            &[
                ("entry", key.file_name()),
                ("path", path.display().to_string()),
                ("digest", key.digest_hex()),
                ("statements", description.len().to_string()),
                ("cached", if cached { "yes" } else { "no" }.to_string()),
            ],
        ),
        OutputFormat::Json => {
            let json = serde_json::json!({
                "entry": key.file_name(),
                "path": path,
                "digest": key.digest_hex(),
                "statements": description.len(),
                "cached": cached,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Plain => println!("{}", key.file_name()),
    }

    Ok(())
}
