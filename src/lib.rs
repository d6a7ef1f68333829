//! propnet-cache - Content-addressed cache for propositional networks
//!
//! Persists networks compiled from a rule description, keyed by a digest
//! of that description, and repairs them on load so they can be handed to
//! an evaluation engine as if freshly built.

pub mod cache;
pub mod cli;
pub mod config;
pub mod description;
pub mod error;
pub mod network;
pub mod symbol;
pub mod ui;

pub use cache::{CacheLookup, NetworkBuilder, PropNetCache};
pub use description::{Description, Term};
pub use error::{PropnetError, PropnetResult};
pub use network::{Component, ComponentId, Network, Role};
pub use symbol::{Interner, Symbol, SymbolPool};
