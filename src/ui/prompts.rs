//! Confirmation before destructive cache operations

use super::context::OutputMode;
use crate::error::{PropnetError, PropnetResult};

/// Ask before deleting `count` entry files
///
/// `yes` approves outright. Without a terminal nothing is deleted.
pub async fn approve_removal(mode: OutputMode, count: usize, yes: bool) -> PropnetResult<bool> {
    if yes {
        return Ok(true);
    }
    if !mode.is_terminal() {
        return Ok(false);
    }

    let question = format!("Remove {} cache entry file(s)?", count);
    tokio::task::spawn_blocking(move || {
        cliclack::confirm(question)
            .initial_value(false)
            .interact()
    })
    .await
    .map_err(|e| PropnetError::User(format!("Prompt task failed: {}", e)))?
    .map_err(|e| PropnetError::User(format!("Prompt failed: {}", e)))
}
