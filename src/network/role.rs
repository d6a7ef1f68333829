//! Game roles

use crate::symbol::{Interner, Symbol};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A participant of the game a network was compiled for
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role {
    name: Symbol,
}

impl Role {
    pub fn new(name: Symbol) -> Self {
        Self { name }
    }

    /// Create a role whose name is interned in `pool`
    pub fn interned(pool: &dyn Interner, name: &str) -> Self {
        Self::new(pool.intern(name))
    }

    pub fn name(&self) -> &Symbol {
        &self.name
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
