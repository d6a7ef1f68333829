//! Persistent propnet cache
//!
//! Provides content-addressed storage of compiled networks keyed by a
//! digest of the description they were built from.
//!
//! # Lifecycle
//!
//! | Step | Component | Notes |
//! |------|-----------|-------|
//! | key | `KeyDeriver` | digest of canonical statements |
//! | save | `StorageCodec` | gzip of description + network, as built |
//! | load | `StorageCodec` | missing or corrupt entry = miss |
//! | verify | `Description::verify_matches` | stale entry = miss |
//! | repair | `GraphNormalizer` | pass-through buffers, re-interning |
//!
//! Entries are never evicted or repaired on disk. Concurrent saves to the
//! same key are not locked against each other; a torn entry reads as a miss.

pub mod codec;
pub mod key;
pub mod normalize;
pub mod store;

pub use codec::{CacheEntry, StorageCodec, StoredEntry};
pub use key::{CacheKey, KeyDeriver};
pub use normalize::{fan_out_violations, BufferPolicy, GraphNormalizer, NormalizeReport};
pub use store::{CacheLookup, MissReason, NetworkBuilder, PropNetCache};
