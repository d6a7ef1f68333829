//! UI helpers for CLI output
//!
//! Uses `cliclack` when attached to a terminal, with plain tagged lines in
//! CI and when output is piped.

mod context;
mod output;
mod prompts;

pub use context::OutputMode;
pub use output::{fields, status, Mark};
pub use prompts::approve_removal;
