//! CLI command implementations

pub mod clear;
pub mod completions;
pub mod config;
pub mod key;
pub mod list;
pub mod load;
pub mod save;
pub mod verify;

pub use clear::execute as clear;
pub use completions::execute as completions;
pub use config::execute as config;
pub use key::execute as key;
pub use list::execute as list;
pub use load::execute as load;
pub use save::execute as save;
pub use verify::execute as verify;

use crate::error::{PropnetError, PropnetResult};
use crate::network::Network;
use std::path::Path;
use tokio::fs;

/// Read and check a network JSON file
async fn read_network(path: &Path) -> PropnetResult<Network> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| PropnetError::io(format!("reading network {}", path.display()), e))?;
    let network: Network = serde_json::from_str(&content)?;
    network.validate()?;
    Ok(network)
}
