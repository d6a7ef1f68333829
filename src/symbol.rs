//! Symbol interning
//!
//! Names inside a network (proposition names, role names) are `Symbol`s:
//! shared `Arc<str>` handles. A pool hands out one canonical allocation per
//! distinct string so that equal names compare by pointer. Deserialized
//! networks carry fresh allocations and have to be re-interned before use.

use std::collections::HashSet;
use std::fmt;
use std::ops::Deref;
use std::sync::{Arc, Mutex, OnceLock};

use serde::{Deserialize, Serialize};

/// An interned (or not yet interned) symbolic name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(Arc<str>);

impl Symbol {
    /// Wrap a string without interning it
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Pointer identity, the fast path downstream consumers rely on
    pub fn ptr_eq(&self, other: &Symbol) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for Symbol {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Contract of the process-wide symbol pool
pub trait Interner: Send + Sync {
    /// Return the canonical instance for `name`
    fn intern(&self, name: &str) -> Symbol;
}

/// Default interner backed by a set of shared strings
#[derive(Debug, Default)]
pub struct SymbolPool {
    symbols: Mutex<HashSet<Arc<str>>>,
}

impl SymbolPool {
    /// Create an isolated pool
    pub fn new() -> Self {
        Self::default()
    }

    /// The pool shared by the whole process
    pub fn global() -> Arc<SymbolPool> {
        static GLOBAL: OnceLock<Arc<SymbolPool>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(SymbolPool::new())).clone()
    }

    /// Number of distinct symbols interned so far
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<Arc<str>>> {
        // A panic while holding the lock cannot leave the set half-updated.
        self.symbols
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Interner for SymbolPool {
    fn intern(&self, name: &str) -> Symbol {
        let mut symbols = self.lock();
        if let Some(existing) = symbols.get(name) {
            return Symbol(existing.clone());
        }
        let fresh: Arc<str> = Arc::from(name);
        symbols.insert(fresh.clone());
        Symbol(fresh)
    }
}
